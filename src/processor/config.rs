// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Processing rule declarations and their compilation into rule sets

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::patterns::Preset;
use super::rule::{compile_pattern, ProcessingRule, RuleKind, RuleSet};

/// Errors raised while turning declarations into a rule set
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("all processing rules must have a name")]
    MissingName,

    #[error("type must be set for processing rule `{0}`")]
    MissingType(String),

    #[error("no pattern provided for processing rule: {0}")]
    MissingPattern(String),

    #[error("invalid pattern {pattern} for processing rule: {name}")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid logs config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rule type as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    ExcludeAtMatch,
    IncludeAtMatch,
    MaskSequences,
    /// Line aggregation rule, consumed by the tailer rather than here
    MultiLine,
}

impl DeclaredType {
    fn rule_kind(self) -> Option<RuleKind> {
        match self {
            DeclaredType::ExcludeAtMatch => Some(RuleKind::Exclude),
            DeclaredType::IncludeAtMatch => Some(RuleKind::Include),
            DeclaredType::MaskSequences => Some(RuleKind::Mask),
            DeclaredType::MultiLine => None,
        }
    }
}

/// A processing rule as authored by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleDeclaration {
    #[serde(rename = "type", default)]
    pub rule_type: Option<DeclaredType>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pattern: String,
    /// Built-in pattern used when `pattern` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_placeholder: Option<String>,
}

impl RuleDeclaration {
    pub fn new(rule_type: DeclaredType, name: &str, pattern: &str) -> Self {
        Self {
            rule_type: Some(rule_type),
            name: name.to_string(),
            pattern: pattern.to_string(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.replace_placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Check the declaration without compiling it
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checked_type()?;
        if self.pattern.is_empty() && self.preset.is_none() {
            return Err(ConfigError::MissingPattern(self.name.clone()));
        }
        if !self.pattern.is_empty() {
            self.compile_pattern()?;
        }
        Ok(())
    }

    /// Compile into a rule; `None` for rule types handled elsewhere
    pub fn compile(&self) -> Result<Option<ProcessingRule>, ConfigError> {
        let rule_type = self.checked_type()?;
        let Some(kind) = rule_type.rule_kind() else {
            debug!(rule = %self.name, "skipping multi_line rule");
            return Ok(None);
        };

        let pattern = match (self.pattern.is_empty(), self.preset) {
            (false, _) => self.compile_pattern()?,
            (true, Some(preset)) => preset.regex(),
            (true, None) => return Err(ConfigError::MissingPattern(self.name.clone())),
        };

        let rule = match kind {
            RuleKind::Exclude => ProcessingRule::exclude(self.name.clone(), pattern),
            RuleKind::Include => ProcessingRule::include(self.name.clone(), pattern),
            RuleKind::Mask => {
                let placeholder = match (&self.replace_placeholder, self.preset) {
                    (Some(placeholder), _) => placeholder.clone(),
                    (None, Some(preset)) => preset.default_placeholder().to_string(),
                    (None, None) => String::new(),
                };
                ProcessingRule::mask(self.name.clone(), pattern, placeholder)
            }
        };
        Ok(Some(rule))
    }

    fn checked_type(&self) -> Result<DeclaredType, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingName);
        }
        self.rule_type
            .ok_or_else(|| ConfigError::MissingType(self.name.clone()))
    }

    fn compile_pattern(&self) -> Result<Regex, ConfigError> {
        compile_pattern(&self.pattern).map_err(|source| ConfigError::InvalidPattern {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            source,
        })
    }
}

/// Validate every declaration, stopping at the first invalid one
pub fn validate_rules(declarations: &[RuleDeclaration]) -> Result<(), ConfigError> {
    declarations.iter().try_for_each(RuleDeclaration::validate)
}

/// Compile declarations into a rule set, preserving their order
///
/// All declarations are validated first, including the `multi_line` ones
/// that never make it into the rule set.
pub fn compile_rules(declarations: &[RuleDeclaration]) -> Result<RuleSet, ConfigError> {
    validate_rules(declarations)?;

    let mut rules = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        if let Some(rule) = declaration.compile()? {
            rules.push(rule);
        }
    }
    Ok(RuleSet::new(rules))
}

/// Processing section of a log source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub processing_rules: Vec<RuleDeclaration>,
}

impl LogsConfig {
    /// Parse a source configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the source's rule set with agent-wide rules evaluated first
    pub fn build_rule_set(&self, global: &[RuleDeclaration]) -> Result<RuleSet, ConfigError> {
        let global = compile_rules(global)?;
        let rules = RuleSet::with_global(&global, compile_rules(&self.processing_rules)?);
        debug!(
            source = %self.source,
            rules = rules.len(),
            global = global.len(),
            include = rules.has_include_rules(),
            "compiled processing rules"
        );
        Ok(rules)
    }
}
