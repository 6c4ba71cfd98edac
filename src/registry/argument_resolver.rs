//! # Argument Resolver Chain
//!
//! Ordered pipeline of pure argument-sequence transformers.
//!
//! Unlike the class resolver chain this is not first-match: every stage runs,
//! in registration order, and each one receives the previous stage's output.
//! An empty chain returns the stored arguments unchanged.

use crate::context::ContextArguments;
use crate::error::{EnvironmentError, EnvironmentResult, StageError};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Strategy transforming the constructor arguments of one context class
pub trait ArgumentResolver: Send + Sync + fmt::Debug {
    /// Name used in logs and error messages
    fn resolver_name(&self) -> &str;

    /// Transform `arguments` for the canonical class `class`
    fn resolve(
        &self,
        class: &str,
        arguments: ContextArguments,
    ) -> Result<ContextArguments, StageError>;
}

/// Registration-ordered pipeline of argument resolvers
#[derive(Debug, Default, Clone)]
pub struct ArgumentResolverChain {
    resolvers: Vec<Arc<dyn ArgumentResolver>>,
}

impl ArgumentResolverChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn ArgumentResolver>) -> Self {
        self.add_resolver(resolver);
        self
    }

    pub fn add_resolver(&mut self, resolver: Arc<dyn ArgumentResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn resolver_names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.resolver_name()).collect()
    }

    /// Run every stage over the arguments of `class`
    pub fn resolve(
        &self,
        class: &str,
        arguments: ContextArguments,
    ) -> EnvironmentResult<ContextArguments> {
        self.resolvers
            .iter()
            .try_fold(arguments, |arguments, resolver| {
                let resolver_name = resolver.resolver_name();
                trace!(
                    resolver = resolver_name,
                    class,
                    argument_count = arguments.len(),
                    "Applying argument resolver"
                );
                resolver.resolve(class, arguments).map_err(|e| {
                    EnvironmentError::argument_resolution(class, resolver_name, e.message)
                })
            })
    }
}

type ArgumentsFn =
    Box<dyn Fn(&str, ContextArguments) -> Result<ContextArguments, StageError> + Send + Sync>;

/// Argument resolver built from a closure
pub struct FnArgumentResolver {
    name: String,
    resolve: ArgumentsFn,
}

impl FnArgumentResolver {
    pub fn new<F>(name: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&str, ContextArguments) -> Result<ContextArguments, StageError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            resolve: Box::new(resolve),
        }
    }
}

impl fmt::Debug for FnArgumentResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnArgumentResolver")
            .field("name", &self.name)
            .finish()
    }
}

impl ArgumentResolver for FnArgumentResolver {
    fn resolver_name(&self) -> &str {
        &self.name
    }

    fn resolve(
        &self,
        class: &str,
        arguments: ContextArguments,
    ) -> Result<ContextArguments, StageError> {
        (self.resolve)(class, arguments)
    }
}
