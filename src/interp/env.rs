//! Runtime environment: a flat variable table plus the write log

use rustc_hash::FxHashMap;

use crate::common::Span;
use crate::diagnostics::{InterpError, Result};

/// Execution context for one program run
///
/// There is a single scope. Assigning a name creates or overwrites its
/// binding; reading a name that was never assigned is an error.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: FxHashMap<String, f64>,
    output: Vec<f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the stored value
    pub fn put(&mut self, name: impl Into<String>, value: f64) -> f64 {
        self.variables.insert(name.into(), value);
        value
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Read a variable referenced at `span`
    pub fn lookup(&self, name: &str, span: Span) -> Result<f64> {
        self.get(name).ok_or_else(|| InterpError::UndefinedVariable {
            name: name.to_string(),
            position: span.start,
            span: span.into(),
        })
    }

    pub fn push_output(&mut self, value: f64) {
        self.output.push(value);
    }

    /// Every value written so far, in execution order
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Drain the write log, keeping variable bindings
    pub fn take_output(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.output)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
