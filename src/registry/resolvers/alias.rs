//! # Alias Class Resolver
//!
//! Direct short-name to canonical-name mapping, the usual first entry of a
//! class resolver chain.
//!
//! ```rust
//! use behave_env::registry::resolvers::AliasClassResolver;
//! use behave_env::registry::ClassResolver;
//!
//! let resolver = AliasClassResolver::new()
//!     .with_alias("web", "App.Contexts.WebContext")
//!     .with_alias("api", "App.Contexts.ApiContext");
//!
//! assert!(resolver.supports("web"));
//! assert_eq!(resolver.resolve("api").unwrap(), "App.Contexts.ApiContext");
//! ```

use crate::error::StageError;
use crate::registry::ClassResolver;
use std::collections::HashMap;

/// Class resolver expanding registered aliases
#[derive(Debug, Clone, Default)]
pub struct AliasClassResolver {
    aliases: HashMap<String, String>,
    name: String,
}

impl AliasClassResolver {
    pub fn new() -> Self {
        Self::with_name("AliasClassResolver")
    }

    /// Useful when more than one alias resolver sits in the chain
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            aliases: HashMap::new(),
            name: name.into(),
        }
    }

    pub fn from_aliases(aliases: HashMap<String, String>) -> Self {
        Self {
            aliases,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl ClassResolver for AliasClassResolver {
    fn resolver_name(&self) -> &str {
        &self.name
    }

    fn supports(&self, identifier: &str) -> bool {
        self.aliases.contains_key(identifier)
    }

    fn resolve(&self, identifier: &str) -> Result<String, StageError> {
        self.aliases
            .get(identifier)
            .cloned()
            .ok_or_else(|| StageError::new(format!("no alias registered for '{identifier}'")))
    }
}
