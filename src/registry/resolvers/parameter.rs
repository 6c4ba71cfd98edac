//! # Parameter Argument Resolver
//!
//! Substitutes `%name%` placeholders in context arguments with configured
//! parameter values.
//!
//! - An argument that is exactly `%name%` is replaced by the parameter value
//!   itself, keeping its JSON type.
//! - Placeholders embedded in a longer string are interpolated using the
//!   value's string form.
//! - `%%` is a literal `%`.
//! - Arrays and objects are walked recursively.
//!
//! Referencing a parameter that is not configured is an error rather than a
//! silent pass-through.

use crate::context::ContextArguments;
use crate::error::StageError;
use crate::registry::ArgumentResolver;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Argument resolver replacing `%name%` placeholders
#[derive(Debug, Clone, Default)]
pub struct ParameterArgumentResolver {
    parameters: HashMap<String, Value>,
}

impl ParameterArgumentResolver {
    pub fn new(parameters: HashMap<String, Value>) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    fn parameter(&self, name: &str) -> Result<&Value, StageError> {
        self.parameters
            .get(name)
            .ok_or_else(|| StageError::new(format!("unknown parameter '%{name}%'")))
    }

    fn substitute(&self, value: Value) -> Result<Value, StageError> {
        match value {
            Value::String(text) => self.substitute_string(&text),
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.substitute(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, item)| self.substitute(item).map(|item| (key, item)))
                .collect::<Result<Map<_, _>, _>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }

    fn substitute_string(&self, text: &str) -> Result<Value, StageError> {
        if let Some(name) = whole_placeholder(text) {
            return self.parameter(name).cloned();
        }

        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find('%') {
            result.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            if let Some(tail) = after.strip_prefix('%') {
                result.push('%');
                rest = tail;
                continue;
            }

            match after.find('%') {
                Some(end) if end > 0 => {
                    let value = self.parameter(&after[..end])?;
                    match value {
                        Value::String(s) => result.push_str(s),
                        other => result.push_str(&other.to_string()),
                    }
                    rest = &after[end + 1..];
                }
                _ => {
                    // Unterminated; keep the rest verbatim
                    result.push('%');
                    rest = after;
                }
            }
        }
        result.push_str(rest);

        Ok(Value::String(result))
    }
}

/// `%name%` covering the whole string, with a non-empty name
fn whole_placeholder(text: &str) -> Option<&str> {
    let name = text.strip_prefix('%')?.strip_suffix('%')?;
    if name.is_empty() || name.contains('%') {
        None
    } else {
        Some(name)
    }
}

impl ArgumentResolver for ParameterArgumentResolver {
    fn resolver_name(&self) -> &str {
        "ParameterArgumentResolver"
    }

    fn resolve(
        &self,
        _class: &str,
        arguments: ContextArguments,
    ) -> Result<ContextArguments, StageError> {
        arguments
            .into_iter()
            .map(|argument| self.substitute(argument))
            .collect()
    }
}
