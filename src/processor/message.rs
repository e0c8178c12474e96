// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Message envelope binding raw log content to its source's rules

use std::borrow::Cow;
use std::sync::Arc;

use super::engine::{evaluate, Decision};
use super::rule::RuleSet;

/// The log source a message was captured from
#[derive(Debug, Clone)]
pub struct Origin {
    source: String,
    rules: Arc<RuleSet>,
}

impl Origin {
    pub fn new(source: impl Into<String>, rules: Arc<RuleSet>) -> Self {
        Self {
            source: source.into(),
            rules,
        }
    }

    /// Source identifier, e.g. the tailed file path
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// One captured log line or datagram
#[derive(Debug, Clone)]
pub struct Message {
    content: Vec<u8>,
    origin: Arc<Origin>,
}

impl Message {
    pub fn new(content: impl Into<Vec<u8>>, origin: Arc<Origin>) -> Self {
        Self {
            content: content.into(),
            origin,
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Run the origin's rules against the content
    pub fn evaluate(&self) -> Decision<'_> {
        evaluate(&self.content, self.origin.rules())
    }

    /// Message to hand to batching, with the payload replaced by the
    /// forwarded content, or `None` if the rules drop it
    pub fn apply_rules(self) -> Option<Message> {
        let forwarded = match self.evaluate() {
            Decision::Drop => return None,
            Decision::Forward(Cow::Borrowed(_)) => None,
            Decision::Forward(Cow::Owned(content)) => Some(content),
        };

        match forwarded {
            Some(content) => Some(Message {
                content,
                origin: self.origin,
            }),
            None => Some(self),
        }
    }
}
