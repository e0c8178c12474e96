// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Log Processor - per-message filtering and redaction
//
// Every captured line is evaluated against its source's ordered rules:
// - exclude_at_match drops the line on the first match
// - include_at_match keeps only lines matching some include rule
// - mask_sequences replaces matches with a placeholder

pub mod config;
pub mod engine;
pub mod message;
pub mod patterns;
#[cfg(feature = "python")]
pub mod python;
pub mod rule;

pub use config::{ConfigError, LogsConfig, RuleDeclaration};
pub use engine::{evaluate, Decision};
pub use message::{Message, Origin};
pub use rule::{ProcessingRule, RuleKind, RuleSet};
