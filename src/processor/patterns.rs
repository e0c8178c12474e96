// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Built-in patterns for common sensitive sequences
// Compiled once on first use and shared by every rule referencing them

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

use super::rule::compile_pattern;

/// Well-known sequences a mask rule can reference by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    CreditCard,
    Email,
    BearerToken,
    AwsAccessKey,
    Ipv4,
}

/// Pattern definition (pattern, default placeholder)
type PresetDef = (&'static str, &'static str);

const CREDIT_CARD: PresetDef = (
    r"(?:4[0-9]{12}(?:[0-9]{3})?|[25][1-7][0-9]{14}|6(?:011|5[0-9][0-9])[0-9]{12}|3[47][0-9]{13}|3(?:0[0-5]|[68][0-9])[0-9]{11}|(?:2131|1800|35\d{3})\d{11})",
    "[masked_credit_card]",
);

const EMAIL: PresetDef = (
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    "[masked_email]",
);

const BEARER_TOKEN: PresetDef = (r"(?i)\bbearer\s+[A-Za-z0-9\-._~+/]+=*", "Bearer [masked_token]");

const AWS_ACCESS_KEY: PresetDef = (r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b", "[masked_aws_key]");

const IPV4: PresetDef = (
    r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
    "[masked_ip]",
);

// Preset patterns are constants; a failure here is a bug in this file.
static CREDIT_CARD_RE: Lazy<Regex> = Lazy::new(|| compile(CREDIT_CARD.0));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| compile(EMAIL.0));
static BEARER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| compile(BEARER_TOKEN.0));
static AWS_ACCESS_KEY_RE: Lazy<Regex> = Lazy::new(|| compile(AWS_ACCESS_KEY.0));
static IPV4_RE: Lazy<Regex> = Lazy::new(|| compile(IPV4.0));

fn compile(pattern: &str) -> Regex {
    compile_pattern(pattern).unwrap_or_else(|e| panic!("invalid preset pattern {pattern}: {e}"))
}

impl Preset {
    fn def(&self) -> PresetDef {
        match self {
            Preset::CreditCard => CREDIT_CARD,
            Preset::Email => EMAIL,
            Preset::BearerToken => BEARER_TOKEN,
            Preset::AwsAccessKey => AWS_ACCESS_KEY,
            Preset::Ipv4 => IPV4,
        }
    }

    /// Compiled pattern; cloning a `Regex` shares the compiled program
    pub fn regex(&self) -> Regex {
        match self {
            Preset::CreditCard => CREDIT_CARD_RE.clone(),
            Preset::Email => EMAIL_RE.clone(),
            Preset::BearerToken => BEARER_TOKEN_RE.clone(),
            Preset::AwsAccessKey => AWS_ACCESS_KEY_RE.clone(),
            Preset::Ipv4 => IPV4_RE.clone(),
        }
    }

    pub fn pattern(&self) -> &'static str {
        self.def().0
    }

    /// Placeholder used when a declaration does not set one
    pub fn default_placeholder(&self) -> &'static str {
        self.def().1
    }
}
