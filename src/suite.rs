//! # Suites
//!
//! A suite is the read-only source of named settings an environment is built
//! from. Loading suites from configuration files belongs to the surrounding
//! test runner; this module only defines the contract the handler reads
//! through, plus [`GenericSuite`], a plain in-memory implementation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Setting holding a single context class identifier
pub const CONTEXT_SETTING: &str = "context";

/// Setting holding an ordered list of context class identifiers
pub const CONTEXTS_SETTING: &str = "contexts";

/// Read-only access to a suite's named settings.
///
/// A setting may be present with a `null` value; callers distinguish
/// "absent" from "null" through [`Suite::has_setting`].
pub trait Suite: Send + Sync + fmt::Debug {
    /// Suite name, used in diagnostics
    fn name(&self) -> &str;

    /// Whether the setting exists at all (it may still be `null`)
    fn has_setting(&self, key: &str) -> bool;

    /// Raw setting value
    fn get_setting(&self, key: &str) -> Option<&Value>;
}

/// In-memory suite backed by a JSON object of settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericSuite {
    pub name: String,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl GenericSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Map::new(),
        }
    }

    /// Builder-style setter
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Suite with a single `context` setting
    pub fn with_context(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(name).with_setting(CONTEXT_SETTING, class.into())
    }

    /// Suite with an ordered `contexts` setting
    pub fn with_contexts<I, S>(name: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<Value> = classes
            .into_iter()
            .map(|class| Value::String(class.into()))
            .collect();
        Self::new(name).with_setting(CONTEXTS_SETTING, Value::Array(classes))
    }
}

impl Suite for GenericSuite {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_setting(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    fn get_setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }
}
