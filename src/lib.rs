// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Logs agent message processing
// Filtering and redaction applied to every line before batching

// Allow non-local definitions emitted by PyO3 macros
#![allow(non_local_definitions)]

pub mod processor;

pub use processor::{evaluate, Decision, Message, Origin, ProcessingRule, RuleKind, RuleSet};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module: logs_processor
///
/// # Examples
///
/// ```python
/// from logs_processor import LogProcessorRust
///
/// processor = LogProcessorRust([
///     {"type": "exclude_at_match", "name": "no_health", "pattern": "GET /health"},
///     {"type": "mask_sequences", "name": "users", "pattern": "User=\\w+",
///      "replace_placeholder": "User=[masked]"},
/// ])
///
/// processor.process(b"GET /health 200")      # None
/// processor.process(b"login User=beats ok")   # b"login User=[masked] ok"
/// ```
#[cfg(feature = "python")]
#[pymodule]
fn logs_processor(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
    m.add_class::<processor::python::LogProcessorRust>()?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__doc__", "Log line filtering and redaction")?;

    Ok(())
}
