//! # Context Initializer Chain
//!
//! Side-effecting hooks applied to every freshly constructed context, in
//! registration order. Initializers typically inject collaborators into the
//! contexts they recognise and leave the rest alone (see
//! [`TypedContextInitializer`](crate::registry::resolvers::TypedContextInitializer)).

use crate::context::Context;
use crate::error::{EnvironmentError, EnvironmentResult, StageError};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Post-construction hook for contexts
pub trait ContextInitializer: Send + Sync + fmt::Debug {
    /// Name used in logs and error messages
    fn initializer_name(&self) -> &str;

    /// Configure the context in place
    fn initialize(&self, context: &mut dyn Context) -> Result<(), StageError>;
}

/// Registration-ordered chain of context initializers
#[derive(Debug, Default, Clone)]
pub struct ContextInitializerChain {
    initializers: Vec<Arc<dyn ContextInitializer>>,
}

impl ContextInitializerChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_initializer(mut self, initializer: Arc<dyn ContextInitializer>) -> Self {
        self.add_initializer(initializer);
        self
    }

    pub fn add_initializer(&mut self, initializer: Arc<dyn ContextInitializer>) {
        self.initializers.push(initializer);
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }

    pub fn initializer_names(&self) -> Vec<&str> {
        self.initializers
            .iter()
            .map(|i| i.initializer_name())
            .collect()
    }

    /// Apply every initializer to the context built for `class`.
    ///
    /// Stops at the first failure; the context may be partially configured.
    pub fn initialize(&self, class: &str, context: &mut dyn Context) -> EnvironmentResult<()> {
        for initializer in &self.initializers {
            let initializer_name = initializer.initializer_name();
            trace!(
                initializer = initializer_name,
                class,
                "Applying context initializer"
            );
            initializer.initialize(context).map_err(|e| {
                EnvironmentError::context_initialization(class, initializer_name, e.message)
            })?;
        }
        Ok(())
    }
}

type InitializeFn = Box<dyn Fn(&mut dyn Context) -> Result<(), StageError> + Send + Sync>;

/// Context initializer built from a closure
pub struct FnContextInitializer {
    name: String,
    initialize: InitializeFn,
}

impl FnContextInitializer {
    pub fn new<F>(name: impl Into<String>, initialize: F) -> Self
    where
        F: Fn(&mut dyn Context) -> Result<(), StageError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            initialize: Box::new(initialize),
        }
    }
}

impl fmt::Debug for FnContextInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnContextInitializer")
            .field("name", &self.name)
            .finish()
    }
}

impl ContextInitializer for FnContextInitializer {
    fn initializer_name(&self) -> &str {
        &self.name
    }

    fn initialize(&self, context: &mut dyn Context) -> Result<(), StageError> {
        (self.initialize)(context)
    }
}
