// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PyO3 bindings for the log processor

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyList};
use std::sync::Arc;

use super::config::{compile_rules, DeclaredType, RuleDeclaration};
use super::engine::evaluate;
use super::patterns::Preset;
use super::rule::RuleSet;

/// Log processor exposed to Python
///
/// # Example (Python)
/// ```python
/// from logs_processor import LogProcessorRust
///
/// processor = LogProcessorRust([
///     {"type": "include_at_match", "name": "errors", "pattern": "ERROR"},
/// ])
/// processor.process(b"ERROR disk full")  # b"ERROR disk full"
/// processor.process(b"INFO started")     # None
/// ```
#[pyclass]
pub struct LogProcessorRust {
    rules: Arc<RuleSet>,
}

#[pymethods]
impl LogProcessorRust {
    /// Create a processor from a list of rule dicts
    ///
    /// # Rule Keys
    /// * `type` (str): "exclude_at_match", "include_at_match", "mask_sequences" or "multi_line"
    /// * `name` (str): Rule name
    /// * `pattern` (str): Regular expression
    /// * `preset` (str): Built-in pattern used when `pattern` is absent
    /// * `replace_placeholder` (str): Replacement for mask rules
    #[new]
    pub fn new(rules: &Bound<'_, PyList>) -> PyResult<Self> {
        let mut declarations = Vec::with_capacity(rules.len());
        for item in rules.iter() {
            let dict = item.cast::<PyDict>()?;
            declarations.push(declaration_from_py_dict(dict)?);
        }

        let rules = compile_rules(&declarations)
            .map_err(|e| PyValueError::new_err(format!("Invalid processing rules: {}", e)))?;

        Ok(Self {
            rules: Arc::new(rules),
        })
    }

    /// Apply the rules to one log line
    ///
    /// Returns the content to forward, or None if the line is dropped
    pub fn process(&self, py: Python<'_>, content: &[u8]) -> Option<Py<PyBytes>> {
        evaluate(content, &self.rules)
            .content()
            .map(|forwarded| PyBytes::new(py, forwarded).unbind())
    }

    /// Number of compiled rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

fn declaration_from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<RuleDeclaration> {
    let mut declaration = RuleDeclaration::default();

    if let Some(value) = dict.get_item("type")? {
        let rule_type: String = value.extract()?;
        declaration.rule_type = Some(parse_name::<DeclaredType>(&rule_type)?);
    }
    if let Some(value) = dict.get_item("name")? {
        declaration.name = value.extract()?;
    }
    if let Some(value) = dict.get_item("pattern")? {
        declaration.pattern = value.extract()?;
    }
    if let Some(value) = dict.get_item("preset")? {
        let preset: String = value.extract()?;
        declaration.preset = Some(parse_name::<Preset>(&preset)?);
    }
    if let Some(value) = dict.get_item("replace_placeholder")? {
        declaration.replace_placeholder = Some(value.extract()?);
    }

    Ok(declaration)
}

/// Parse a snake_case configuration name the same way JSON configs are read
fn parse_name<T: serde::de::DeserializeOwned>(name: &str) -> PyResult<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|e| PyValueError::new_err(format!("Unsupported value '{}': {}", name, e)))
}
