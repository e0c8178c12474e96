// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Processing rule model: a single rule and the ordered rule set of a source

use regex::bytes::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::slice;

/// What a processing rule does when its pattern matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Drop the message as soon as the pattern matches
    #[serde(rename = "exclude_at_match")]
    Exclude,
    /// Keep the message only if some include rule matches
    #[serde(rename = "include_at_match")]
    Include,
    /// Replace every match with the rule's placeholder
    #[serde(rename = "mask_sequences")]
    Mask,
}

impl RuleKind {
    /// Name used in log source configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Exclude => "exclude_at_match",
            RuleKind::Include => "include_at_match",
            RuleKind::Mask => "mask_sequences",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compile a rule pattern for matching raw log bytes
///
/// Unicode mode is off, so `.` and negated classes also match bytes that
/// are not valid UTF-8 and a Latin-1 line is masked through to the end.
/// Perl classes (`\w`, `\d`, `\s`, `\b`) are ASCII. Patterns that need
/// Unicode (non-ASCII literals, `\p{..}` classes) are compiled in Unicode
/// mode instead, as is anything using the `(?u)` flag.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .or_else(|_| Regex::new(pattern))
}

/// A compiled processing rule
///
/// The pattern is compiled before the rule is built, so evaluation never
/// has to deal with an invalid expression. Rules cannot be modified after
/// construction.
#[derive(Debug, Clone)]
pub struct ProcessingRule {
    kind: RuleKind,
    name: String,
    pattern: Regex,
    placeholder: Vec<u8>,
}

impl ProcessingRule {
    /// Rule dropping any message the pattern matches
    pub fn exclude(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            kind: RuleKind::Exclude,
            name: name.into(),
            pattern,
            placeholder: Vec::new(),
        }
    }

    /// Rule keeping only messages the pattern matches
    pub fn include(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            kind: RuleKind::Include,
            name: name.into(),
            pattern,
            placeholder: Vec::new(),
        }
    }

    /// Rule replacing each match with `placeholder`
    ///
    /// The placeholder uses regex replacement syntax: `$1` or `${name}`
    /// expand to capture groups and `$$` is a literal dollar sign.
    pub fn mask(name: impl Into<String>, pattern: Regex, placeholder: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: RuleKind::Mask,
            name: name.into(),
            pattern,
            placeholder: placeholder.into(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Diagnostic label, never used for evaluation
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Replacement bytes; empty unless this is a mask rule
    pub fn placeholder(&self) -> &[u8] {
        &self.placeholder
    }
}

/// Ordered processing rules of one log source
///
/// Built once when the source is configured and shared read-only (usually
/// behind an `Arc`) by every worker handling messages from that source.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ProcessingRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ProcessingRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Agent-wide rules followed by the source's own rules
    pub fn with_global(global: &RuleSet, source: RuleSet) -> Self {
        let mut rules = Vec::with_capacity(global.len() + source.len());
        rules.extend(global.rules.iter().cloned());
        rules.extend(source.rules);
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in configured order
    pub fn iter(&self) -> slice::Iter<'_, ProcessingRule> {
        self.rules.iter()
    }

    pub fn has_include_rules(&self) -> bool {
        self.rules.iter().any(|r| r.kind == RuleKind::Include)
    }
}

impl FromIterator<ProcessingRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = ProcessingRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ProcessingRule;
    type IntoIter = slice::Iter<'a, ProcessingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
