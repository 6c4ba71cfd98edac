//! # Environment Configuration
//!
//! Declarative description of the built-in strategies a handler starts with.
//! [`ContextEnvironmentHandlerBuilder::from_config`] turns it into registered
//! resolvers and stored arguments.
//!
//! ```yaml
//! class_namespaces:
//!   - prefix: "acme:"
//!     namespace: "Acme.Contexts."
//! class_aliases:
//!   - alias: web
//!     class: Acme.Contexts.WebContext
//! parameters:
//!   - name: baseUrl
//!     value: http://localhost:8080
//! context_arguments:
//!   - class: web
//!     arguments: ["%baseUrl%", 30]
//! ```
//!
//! Class-keyed settings and parameters are lists of entries, not maps: class
//! identifiers and parameter names may contain dots and mixed case.
//!
//! [`ContextEnvironmentHandlerBuilder::from_config`]:
//!     crate::handler::ContextEnvironmentHandlerBuilder::from_config

pub mod loader;

pub use loader::ConfigLoader;

use crate::context::ContextArguments;
use crate::error::{EnvironmentError, EnvironmentResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Root configuration for a context environment handler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Alias table for an [`AliasClassResolver`](crate::registry::resolvers::AliasClassResolver)
    #[serde(default)]
    pub class_aliases: Vec<ClassAliasConfig>,

    /// One [`NamespaceClassResolver`](crate::registry::resolvers::NamespaceClassResolver) per entry
    #[serde(default)]
    pub class_namespaces: Vec<NamespaceConfig>,

    /// `%name%` substitutions for a [`ParameterArgumentResolver`](crate::registry::resolvers::ParameterArgumentResolver)
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,

    /// Stored constructor arguments, applied in list order
    #[serde(default)]
    pub context_arguments: Vec<ContextArgumentsConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAliasConfig {
    pub alias: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    pub prefix: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextArgumentsConfig {
    pub class: String,
    #[serde(default)]
    pub arguments: ContextArguments,
}

impl EnvironmentConfig {
    /// Parameters as the map a resolver substitutes from
    pub fn parameter_map(&self) -> HashMap<String, Value> {
        self.parameters
            .iter()
            .map(|parameter| (parameter.name.clone(), parameter.value.clone()))
            .collect()
    }

    /// Replace the value of a parameter, or add it.
    ///
    /// Names match case-insensitively: override sources such as environment
    /// variables do not preserve case.
    pub fn override_parameter(&mut self, name: &str, value: Value) {
        match self
            .parameters
            .iter_mut()
            .find(|parameter| parameter.name.eq_ignore_ascii_case(name))
        {
            Some(parameter) => parameter.value = value,
            None => self.parameters.push(ParameterConfig {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn validate(&self) -> EnvironmentResult<()> {
        let mut aliases = HashSet::new();
        for (index, entry) in self.class_aliases.iter().enumerate() {
            if entry.alias.is_empty() {
                return Err(invalid(format!("class_aliases[{index}].alias must not be empty")));
            }
            if entry.class.is_empty() {
                return Err(invalid(format!("class_aliases[{index}].class must not be empty")));
            }
            if !aliases.insert(entry.alias.as_str()) {
                return Err(invalid(format!(
                    "class_aliases[{index}]: alias '{}' is defined more than once",
                    entry.alias
                )));
            }
        }

        for (index, entry) in self.class_namespaces.iter().enumerate() {
            if entry.prefix.is_empty() {
                return Err(invalid(format!(
                    "class_namespaces[{index}].prefix must not be empty"
                )));
            }
        }

        let mut parameters = HashSet::new();
        for (index, parameter) in self.parameters.iter().enumerate() {
            if parameter.name.is_empty() || parameter.name.contains('%') {
                return Err(invalid(format!(
                    "parameters[{index}].name '{}' must be non-empty and must not contain '%'",
                    parameter.name
                )));
            }
            if !parameters.insert(parameter.name.as_str()) {
                return Err(invalid(format!(
                    "parameters[{index}]: parameter '{}' is defined more than once",
                    parameter.name
                )));
            }
        }

        for (index, entry) in self.context_arguments.iter().enumerate() {
            if entry.class.is_empty() {
                return Err(invalid(format!(
                    "context_arguments[{index}].class must not be empty"
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> EnvironmentError {
    EnvironmentError::configuration("EnvironmentConfig", message)
}
