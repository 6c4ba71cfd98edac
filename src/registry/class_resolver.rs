//! # Class Resolver Chain
//!
//! Ordered chain of pure class-identifier transformers.
//!
//! ## Resolution Flow
//!
//! ```text
//! identifier ──► resolver 1 ──supports?──no──► resolver 2 ──no──► ... ──► identifier (unchanged)
//!                    │                             │
//!                   yes                           yes
//!                    ▼                             ▼
//!               resolve() (final)             resolve() (final)
//! ```
//!
//! Resolvers are tried in registration order and the first one whose
//! `supports` returns `true` produces the canonical identifier. Its output is
//! not fed back into the chain.

use crate::error::{EnvironmentError, EnvironmentResult, StageError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Strategy turning a configured class identifier into a canonical one.
///
/// Implementations must be pure: the same identifier always yields the same
/// answer from both methods.
pub trait ClassResolver: Send + Sync + fmt::Debug {
    /// Name used in logs and error messages
    fn resolver_name(&self) -> &str;

    /// Whether this resolver claims the identifier
    fn supports(&self, identifier: &str) -> bool;

    /// Canonical identifier for a supported identifier
    fn resolve(&self, identifier: &str) -> Result<String, StageError>;
}

/// Registration-ordered chain of class resolvers
#[derive(Debug, Default, Clone)]
pub struct ClassResolverChain {
    resolvers: Vec<Arc<dyn ClassResolver>>,
}

impl ClassResolverChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn ClassResolver>) -> Self {
        self.add_resolver(resolver);
        self
    }

    /// Append a resolver. No deduplication; order is priority.
    pub fn add_resolver(&mut self, resolver: Arc<dyn ClassResolver>) {
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

    /// Resolve an identifier: first supporting resolver wins, identity otherwise
    pub fn resolve(&self, identifier: &str) -> EnvironmentResult<String> {
        for resolver in &self.resolvers {
            let resolver_name = resolver.resolver_name();

            if !resolver.supports(identifier) {
                trace!(
                    resolver = resolver_name,
                    identifier,
                    "Class resolver does not support identifier"
                );
                continue;
            }

            let canonical = resolver.resolve(identifier).map_err(|e| {
                EnvironmentError::class_resolution(identifier, resolver_name, e.message)
            })?;

            if canonical.is_empty() {
                return Err(EnvironmentError::class_resolution(
                    identifier,
                    resolver_name,
                    "resolver produced an empty class identifier",
                ));
            }

            debug!(
                resolver = resolver_name,
                identifier,
                canonical = %canonical,
                "Resolved context class"
            );
            return Ok(canonical);
        }

        Ok(identifier.to_string())
    }
}

type SupportsFn = Box<dyn Fn(&str) -> bool + Send + Sync>;
type ResolveFn = Box<dyn Fn(&str) -> Result<String, StageError> + Send + Sync>;

/// Class resolver built from a pair of closures
pub struct FnClassResolver {
    name: String,
    supports: SupportsFn,
    resolve: ResolveFn,
}

impl FnClassResolver {
    pub fn new<S, R>(name: impl Into<String>, supports: S, resolve: R) -> Self
    where
        S: Fn(&str) -> bool + Send + Sync + 'static,
        R: Fn(&str) -> Result<String, StageError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            supports: Box::new(supports),
            resolve: Box::new(resolve),
        }
    }
}

impl fmt::Debug for FnClassResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnClassResolver")
            .field("name", &self.name)
            .finish()
    }
}

impl ClassResolver for FnClassResolver {
    fn resolver_name(&self) -> &str {
        &self.name
    }

    fn supports(&self, identifier: &str) -> bool {
        (self.supports)(identifier)
    }

    fn resolve(&self, identifier: &str) -> Result<String, StageError> {
        (self.resolve)(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct SuffixResolver {
        name: String,
        suffix: String,
    }

    impl SuffixResolver {
        fn new(name: &str, suffix: &str) -> Arc<dyn ClassResolver> {
            Arc::new(Self {
                name: name.to_string(),
                suffix: suffix.to_string(),
            })
        }
    }

    impl ClassResolver for SuffixResolver {
        fn resolver_name(&self) -> &str {
            &self.name
        }

        fn supports(&self, identifier: &str) -> bool {
            !identifier.ends_with(&self.suffix)
        }

        fn resolve(&self, identifier: &str) -> Result<String, StageError> {
            Ok(format!("{identifier}{}", self.suffix))
        }
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = ClassResolverChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve("Anything").unwrap(), "Anything");
    }

    #[test]
    fn test_first_supporting_resolver_wins() {
        let chain = ClassResolverChain::new()
            .with_resolver(SuffixResolver::new("First", "Context"))
            .with_resolver(SuffixResolver::new("Second", "Steps"));

        // First supports it; Second never runs on the output
        assert_eq!(chain.resolve("Web").unwrap(), "WebContext");
        assert_eq!(chain.resolver_names(), vec!["First", "Second"]);
    }

    #[test]
    fn test_unsupported_falls_through_to_later_resolver() {
        let chain = ClassResolverChain::new()
            .with_resolver(SuffixResolver::new("First", "Context"))
            .with_resolver(SuffixResolver::new("Second", "Steps"));

        assert_eq!(chain.resolve("WebContext").unwrap(), "WebContextSteps");
    }

    #[test]
    fn test_resolver_failure_names_resolver() {
        let chain = ClassResolverChain::new().with_resolver(Arc::new(FnClassResolver::new(
            "Broken",
            |_| true,
            |_| Err(StageError::new("lookup table unavailable")),
        )));

        let error = chain.resolve("Short").unwrap_err();
        assert_eq!(
            error,
            EnvironmentError::class_resolution("Short", "Broken", "lookup table unavailable")
        );
    }

    #[test]
    fn test_empty_output_is_rejected() {
        let chain = ClassResolverChain::new().with_resolver(Arc::new(FnClassResolver::new(
            "Eraser",
            |_| true,
            |_| Ok(String::new()),
        )));

        assert!(matches!(
            chain.resolve("X"),
            Err(EnvironmentError::ClassResolution { .. })
        ));
    }

    #[test]
    fn test_chain_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassResolverChain>();
    }
}
