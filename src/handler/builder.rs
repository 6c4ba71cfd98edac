//! Handler builder.
//!
//! Strategies and stored arguments are registered here before the handler
//! is frozen. Registration order is evaluation order for all three chains.

use super::ContextEnvironmentHandler;
use crate::config::EnvironmentConfig;
use crate::context::{Context, ContextArguments, ContextRegistry, FromContextArguments};
use crate::error::{ContextFactoryError, EnvironmentResult};
use crate::logging::log_registry_operation;
use crate::registry::resolvers::{
    AliasClassResolver, NamespaceClassResolver, ParameterArgumentResolver,
};
use crate::registry::{
    ArgumentResolver, ArgumentResolverChain, ClassResolver, ClassResolverChain,
    ContextInitializer, ContextInitializerChain,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Mutable configuration phase of a [`ContextEnvironmentHandler`]
#[derive(Debug, Default)]
pub struct ContextEnvironmentHandlerBuilder {
    class_resolvers: ClassResolverChain,
    argument_resolvers: ArgumentResolverChain,
    context_initializers: ContextInitializerChain,
    context_arguments: HashMap<String, ContextArguments>,
    contexts: ContextRegistry,
}

impl ContextEnvironmentHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated from a loaded configuration.
    ///
    /// Namespace resolvers are registered first, in list order, followed by
    /// a single alias resolver.
    pub fn from_config(config: &EnvironmentConfig) -> EnvironmentResult<Self> {
        let mut builder = Self::new();
        builder.apply_config(config)?;
        Ok(builder)
    }

    /// Register the strategies and arguments described by `config`
    pub fn apply_config(&mut self, config: &EnvironmentConfig) -> EnvironmentResult<&mut Self> {
        config.validate()?;

        for namespace in &config.class_namespaces {
            self.register_class_resolver(Arc::new(NamespaceClassResolver::new(
                namespace.prefix.clone(),
                namespace.namespace.clone(),
            )));
        }

        if !config.class_aliases.is_empty() {
            let resolver = config
                .class_aliases
                .iter()
                .fold(AliasClassResolver::new(), |resolver, entry| {
                    resolver.with_alias(entry.alias.clone(), entry.class.clone())
                });
            self.register_class_resolver(Arc::new(resolver));
        }

        if !config.parameters.is_empty() {
            self.register_argument_resolver(Arc::new(ParameterArgumentResolver::new(
                config.parameter_map(),
            )));
        }

        for entry in &config.context_arguments {
            self.set_context_arguments(&entry.class, entry.arguments.clone())?;
        }

        debug!(
            class_resolvers = self.class_resolvers.len(),
            argument_resolvers = self.argument_resolvers.len(),
            stored_arguments = self.context_arguments.len(),
            "Applied environment configuration"
        );

        Ok(self)
    }

    pub fn register_class_resolver(&mut self, resolver: Arc<dyn ClassResolver>) -> &mut Self {
        log_registry_operation(
            "register",
            "ClassResolverChain",
            Some(resolver.resolver_name()),
            "success",
            None,
        );
        self.class_resolvers.add_resolver(resolver);
        self
    }

    pub fn register_argument_resolver(
        &mut self,
        resolver: Arc<dyn ArgumentResolver>,
    ) -> &mut Self {
        log_registry_operation(
            "register",
            "ArgumentResolverChain",
            Some(resolver.resolver_name()),
            "success",
            None,
        );
        self.argument_resolvers.add_resolver(resolver);
        self
    }

    pub fn register_context_initializer(
        &mut self,
        initializer: Arc<dyn ContextInitializer>,
    ) -> &mut Self {
        log_registry_operation(
            "register",
            "ContextInitializerChain",
            Some(initializer.initializer_name()),
            "success",
            None,
        );
        self.context_initializers.add_initializer(initializer);
        self
    }

    /// Register a context factory under a canonical class identifier
    pub fn register_context<F>(&mut self, class: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(ContextArguments) -> Result<Box<dyn Context>, ContextFactoryError>
            + Send
            + Sync
            + 'static,
    {
        self.contexts.register(class, factory);
        self
    }

    pub fn register_context_type<T>(&mut self, class: impl Into<String>) -> &mut Self
    where
        T: Context + FromContextArguments,
    {
        self.contexts.register_type::<T>(class);
        self
    }

    pub fn register_default_context<T>(&mut self, class: impl Into<String>) -> &mut Self
    where
        T: Context + Default,
    {
        self.contexts.register_default::<T>(class);
        self
    }

    /// Replace the context registry wholesale
    pub fn with_context_registry(&mut self, contexts: ContextRegistry) -> &mut Self {
        self.contexts = contexts;
        self
    }

    /// Store constructor arguments for a class.
    ///
    /// The identifier is canonicalized now, through the class resolvers
    /// registered so far; later lookups use the canonical form only. A second
    /// call for the same canonical class replaces the stored arguments.
    pub fn set_context_arguments(
        &mut self,
        class: &str,
        arguments: ContextArguments,
    ) -> EnvironmentResult<&mut Self> {
        let canonical = self.class_resolvers.resolve(class)?;

        if self
            .context_arguments
            .insert(canonical.clone(), arguments)
            .is_some()
        {
            warn!(class = %canonical, "Replacing stored context arguments");
        } else {
            debug!(identifier = %class, class = %canonical, "Stored context arguments");
        }

        Ok(self)
    }

    /// Freeze the configuration
    pub fn build(self) -> ContextEnvironmentHandler {
        let details = format!(
            "class_resolvers={}, argument_resolvers={}, context_initializers={}, contexts={}",
            self.class_resolvers.len(),
            self.argument_resolvers.len(),
            self.context_initializers.len(),
            self.contexts.len()
        );
        log_registry_operation(
            "build",
            "ContextEnvironmentHandler",
            None,
            "success",
            Some(&details),
        );

        ContextEnvironmentHandler {
            class_resolvers: self.class_resolvers,
            argument_resolvers: self.argument_resolvers,
            context_initializers: self.context_initializers,
            context_arguments: self.context_arguments,
            contexts: self.contexts,
        }
    }
}
