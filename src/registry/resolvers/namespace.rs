//! # Namespace Class Resolver
//!
//! Expands a short prefix into a full namespace, so suites can write
//! `app:WebContext` instead of `App.Contexts.WebContext`.

use crate::error::StageError;
use crate::registry::ClassResolver;

/// Class resolver replacing a configured prefix with a namespace
#[derive(Debug, Clone)]
pub struct NamespaceClassResolver {
    prefix: String,
    namespace: String,
    name: String,
}

impl NamespaceClassResolver {
    pub fn new(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let name = format!("NamespaceClassResolver({prefix})");
        Self {
            prefix,
            namespace: namespace.into(),
            name,
        }
    }
}

impl ClassResolver for NamespaceClassResolver {
    fn resolver_name(&self) -> &str {
        &self.name
    }

    fn supports(&self, identifier: &str) -> bool {
        identifier.starts_with(&self.prefix)
    }

    fn resolve(&self, identifier: &str) -> Result<String, StageError> {
        let remainder = identifier
            .strip_prefix(&self.prefix)
            .ok_or_else(|| StageError::new(format!("'{identifier}' lacks prefix '{}'", self.prefix)))?;

        if remainder.is_empty() {
            return Err(StageError::new(format!(
                "'{identifier}' names no class after prefix '{}'",
                self.prefix
            )));
        }

        Ok(format!("{}{remainder}", self.namespace))
    }
}
