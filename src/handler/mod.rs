//! # Context Environment Handler
//!
//! Builds and isolates environments for suites configured with `context` or
//! `contexts` settings.
//!
//! ## Pipeline
//!
//! ```text
//! build:    suite settings ──► ClassResolverChain ──► UninitializedEnvironment
//!
//! isolate:  for each canonical class, in order
//!             stored arguments (or [])
//!               ──► ArgumentResolverChain
//!               ──► ContextRegistry::create(class, arguments)
//!               ──► ContextInitializerChain
//!           ──► InitializedEnvironment
//! ```
//!
//! ## Lifecycle
//!
//! Configuration happens on a [`ContextEnvironmentHandlerBuilder`]; calling
//! `build()` freezes it into a [`ContextEnvironmentHandler`], which has no
//! mutators and is `Send + Sync`, so one instance can serve concurrent
//! suites behind an `Arc`.
//!
//! ## Usage
//!
//! ```rust
//! use behave_env::handler::ContextEnvironmentHandler;
//! use behave_env::registry::resolvers::AliasClassResolver;
//! use behave_env::suite::{GenericSuite, Suite};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default)]
//! struct WebContext;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ContextEnvironmentHandler::builder();
//! builder
//!     .register_class_resolver(Arc::new(
//!         AliasClassResolver::new().with_alias("web", "App.WebContext"),
//!     ))
//!     .register_default_context::<WebContext>("App.WebContext");
//! builder.set_context_arguments("web", vec![json!("http://localhost")])?;
//! let handler = builder.build();
//!
//! let suite: Arc<dyn Suite> = Arc::new(GenericSuite::with_context("default", "web"));
//! let environment = handler.build_environment(suite)?;
//! assert_eq!(environment.context_classes(), ["App.WebContext"]);
//!
//! let isolated = handler.isolate_environment(&environment, None)?;
//! assert!(isolated.context_as::<WebContext>().is_some());
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::ContextEnvironmentHandlerBuilder;

use crate::context::{Context, ContextArguments, ContextRegistry};
use crate::environment::{
    Environment, EnvironmentHandler, InitializedEnvironment, Subject, UninitializedEnvironment,
};
use crate::error::{EnvironmentError, EnvironmentResult};
use crate::logging::{log_environment_operation, log_error};
use crate::registry::{ArgumentResolverChain, ClassResolverChain, ContextInitializerChain};
use crate::suite::{Suite, CONTEXTS_SETTING, CONTEXT_SETTING};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Frozen handler configuration plus the build/isolate pipeline
#[derive(Debug)]
pub struct ContextEnvironmentHandler {
    class_resolvers: ClassResolverChain,
    argument_resolvers: ArgumentResolverChain,
    context_initializers: ContextInitializerChain,
    context_arguments: HashMap<String, ContextArguments>,
    contexts: ContextRegistry,
}

impl ContextEnvironmentHandler {
    pub fn builder() -> ContextEnvironmentHandlerBuilder {
        ContextEnvironmentHandlerBuilder::new()
    }

    /// True iff `context` is set and non-null, or `contexts` is a sequence
    /// (an empty one included).
    pub fn supports_suite(&self, suite: &dyn Suite) -> bool {
        let has_context = suite
            .get_setting(CONTEXT_SETTING)
            .is_some_and(|value| !value.is_null());
        let has_contexts = suite
            .get_setting(CONTEXTS_SETTING)
            .is_some_and(Value::is_array);

        has_context || has_contexts
    }

    /// Canonicalize the suite's context classes into a new environment.
    ///
    /// Only the class resolver chain is consulted here.
    #[instrument(skip(self, suite), fields(suite = %suite.name()))]
    pub fn build_environment(
        &self,
        suite: Arc<dyn Suite>,
    ) -> EnvironmentResult<UninitializedEnvironment> {
        let context_classes = self
            .get_context_classes(suite.as_ref())?
            .iter()
            .map(|class| self.resolve_class(class))
            .collect::<EnvironmentResult<Vec<_>>>()?;

        log_environment_operation(
            "build_environment",
            suite.name(),
            context_classes.len(),
            "completed",
            None,
        );

        Ok(UninitializedEnvironment::new(suite, context_classes))
    }

    /// True iff the environment has not been isolated yet. The subject is
    /// not inspected.
    pub fn supports_environment_and_subject(
        &self,
        environment: &Environment,
        _subject: Option<&Subject>,
    ) -> bool {
        matches!(environment, Environment::Uninitialized(_))
    }

    /// Construct and initialize one context per class, in class order.
    ///
    /// Any failure aborts the whole isolation; no partial environment is
    /// returned. The input environment is not modified and can be isolated
    /// again.
    #[instrument(skip(self, environment, _subject), fields(suite = %environment.suite().name()))]
    pub fn isolate_environment(
        &self,
        environment: &UninitializedEnvironment,
        _subject: Option<&Subject>,
    ) -> EnvironmentResult<InitializedEnvironment> {
        let mut contexts = Vec::with_capacity(environment.context_classes().len());

        for class in environment.context_classes() {
            let context = self.create_context(class).inspect_err(|error| {
                log_error(
                    "ContextEnvironmentHandler",
                    "isolate_environment",
                    &error.to_string(),
                    Some(class.as_str()),
                );
            })?;
            contexts.push((class.clone(), context));
        }

        log_environment_operation(
            "isolate_environment",
            environment.suite().name(),
            contexts.len(),
            "completed",
            None,
        );

        Ok(InitializedEnvironment::new(
            Arc::clone(environment.suite()),
            contexts,
        ))
    }

    /// Canonical identifier for a configured class identifier
    pub fn resolve_class(&self, identifier: &str) -> EnvironmentResult<String> {
        self.class_resolvers.resolve(identifier)
    }

    /// Final constructor arguments for a canonical class
    pub fn resolve_class_arguments(&self, class: &str) -> EnvironmentResult<ContextArguments> {
        let raw = self.context_arguments.get(class).cloned().unwrap_or_default();
        self.argument_resolvers.resolve(class, raw)
    }

    /// Raw arguments stored for a canonical class, before argument resolution
    pub fn context_arguments(&self, class: &str) -> Option<&ContextArguments> {
        self.context_arguments.get(class)
    }

    pub fn stats(&self) -> HandlerStats {
        let mut argument_classes: Vec<String> = self.context_arguments.keys().cloned().collect();
        argument_classes.sort();

        HandlerStats {
            class_resolvers: names(self.class_resolvers.resolver_names()),
            argument_resolvers: names(self.argument_resolvers.resolver_names()),
            context_initializers: names(self.context_initializers.initializer_names()),
            argument_classes,
            registered_contexts: self.contexts.registered_identifiers(),
        }
    }

    fn get_context_classes(&self, suite: &dyn Suite) -> EnvironmentResult<Vec<String>> {
        if let Some(value) = suite
            .get_setting(CONTEXT_SETTING)
            .filter(|value| !value.is_null())
        {
            let class = value.as_str().ok_or_else(|| {
                EnvironmentError::invalid_suite_setting(
                    suite.name(),
                    CONTEXT_SETTING,
                    format!("expected a class identifier string, got {value}"),
                )
            })?;
            return Ok(vec![class.to_string()]);
        }

        match suite.get_setting(CONTEXTS_SETTING) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        EnvironmentError::invalid_suite_setting(
                            suite.name(),
                            CONTEXTS_SETTING,
                            format!("entry {index} is not a class identifier string: {item}"),
                        )
                    })
                })
                .collect(),
            Some(value) if !value.is_null() => Err(EnvironmentError::invalid_suite_setting(
                suite.name(),
                CONTEXTS_SETTING,
                format!("expected a sequence of class identifiers, got {value}"),
            )),
            _ => Err(EnvironmentError::UnsupportedSuite {
                suite: suite.name().to_string(),
            }),
        }
    }

    fn create_context(&self, class: &str) -> EnvironmentResult<Box<dyn Context>> {
        let arguments = self.resolve_class_arguments(class)?;
        debug!(
            class,
            argument_count = arguments.len(),
            "Constructing context"
        );

        let mut context = self.contexts.create(class, arguments)?;
        self.context_initializers.initialize(class, context.as_mut())?;
        Ok(context)
    }
}

fn names(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}

impl EnvironmentHandler for ContextEnvironmentHandler {
    fn supports_suite(&self, suite: &dyn Suite) -> bool {
        ContextEnvironmentHandler::supports_suite(self, suite)
    }

    fn build_environment(&self, suite: Arc<dyn Suite>) -> EnvironmentResult<Environment> {
        ContextEnvironmentHandler::build_environment(self, suite).map(Environment::from)
    }

    fn supports_environment_and_subject(
        &self,
        environment: &Environment,
        subject: Option<&Subject>,
    ) -> bool {
        ContextEnvironmentHandler::supports_environment_and_subject(self, environment, subject)
    }

    fn isolate_environment(
        &self,
        environment: &Environment,
        subject: Option<&Subject>,
    ) -> EnvironmentResult<Environment> {
        let uninitialized = environment.as_uninitialized().ok_or_else(|| {
            EnvironmentError::UnsupportedEnvironment {
                state: environment.state().to_string(),
            }
        })?;

        ContextEnvironmentHandler::isolate_environment(self, uninitialized, subject)
            .map(Environment::from)
    }
}

/// Snapshot of a handler's frozen configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerStats {
    /// Class resolvers in evaluation order
    pub class_resolvers: Vec<String>,

    /// Argument resolvers in evaluation order
    pub argument_resolvers: Vec<String>,

    /// Context initializers in evaluation order
    pub context_initializers: Vec<String>,

    /// Canonical classes with stored arguments, sorted
    pub argument_classes: Vec<String>,

    /// Classes with a registered context factory, sorted
    pub registered_contexts: Vec<String>,
}
