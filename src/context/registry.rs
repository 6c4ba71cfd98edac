//! # Context Registry
//!
//! Explicit factory registry mapping canonical class identifiers to context
//! constructors.
//!
//! Every factory receives exactly one [`ContextArguments`] value, the ordered
//! sequence produced by the argument resolver chain. Factories destructure it
//! themselves; arguments are never spread into positional parameters.
//!
//! ## Usage
//!
//! ```rust
//! use behave_env::context::{ContextArguments, ContextRegistry, FromContextArguments};
//! use behave_env::error::ContextFactoryError;
//!
//! #[derive(Debug)]
//! struct ApiContext {
//!     base_url: String,
//! }
//!
//! impl FromContextArguments for ApiContext {
//!     fn from_arguments(arguments: ContextArguments) -> Result<Self, ContextFactoryError> {
//!         let base_url = arguments
//!             .first()
//!             .and_then(|v| v.as_str())
//!             .unwrap_or("http://localhost")
//!             .to_string();
//!         Ok(Self { base_url })
//!     }
//! }
//!
//! let mut registry = ContextRegistry::new();
//! registry.register_type::<ApiContext>("App.ApiContext");
//! assert!(registry.is_registered("App.ApiContext"));
//! ```

use super::{Context, ContextArguments};
use crate::error::{ContextFactoryError, EnvironmentError, EnvironmentResult};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Constructor callback for one context class
pub type ContextFactory =
    Box<dyn Fn(ContextArguments) -> Result<Box<dyn Context>, ContextFactoryError> + Send + Sync>;

/// Contexts that know how to build themselves from an argument sequence
pub trait FromContextArguments: Sized {
    fn from_arguments(arguments: ContextArguments) -> Result<Self, ContextFactoryError>;
}

/// Registry of context factories keyed by canonical class identifier
#[derive(Default)]
pub struct ContextRegistry {
    factories: HashMap<String, ContextFactory>,
}

impl fmt::Debug for ContextRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRegistry")
            .field("registered_contexts", &self.registered_identifiers())
            .finish()
    }
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory closure.
    ///
    /// Registering the same identifier twice replaces the earlier factory.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn(ContextArguments) -> Result<Box<dyn Context>, ContextFactoryError>
            + Send
            + Sync
            + 'static,
    {
        let identifier = identifier.into();
        if self
            .factories
            .insert(identifier.clone(), Box::new(factory))
            .is_some()
        {
            warn!(class = %identifier, "Replacing previously registered context factory");
        } else {
            debug!(class = %identifier, "Registered context factory");
        }
    }

    /// Register a type implementing [`FromContextArguments`]
    pub fn register_type<T>(&mut self, identifier: impl Into<String>)
    where
        T: Context + FromContextArguments,
    {
        self.register(identifier, |arguments| {
            T::from_arguments(arguments).map(|context| Box::new(context) as Box<dyn Context>)
        });
    }

    /// Register a type that ignores its arguments and starts from `Default`
    pub fn register_default<T>(&mut self, identifier: impl Into<String>)
    where
        T: Context + Default,
    {
        self.register(identifier, |_arguments| {
            Ok(Box::new(T::default()) as Box<dyn Context>)
        });
    }

    pub fn unregister(&mut self, identifier: &str) -> bool {
        self.factories.remove(identifier).is_some()
    }

    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered identifiers, sorted
    pub fn registered_identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.factories.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }

    /// Construct a context from its canonical identifier and final arguments
    pub fn create(
        &self,
        identifier: &str,
        arguments: ContextArguments,
    ) -> EnvironmentResult<Box<dyn Context>> {
        let factory = self.factories.get(identifier).ok_or_else(|| {
            EnvironmentError::context_construction(
                identifier,
                format!(
                    "no context factory registered (registered: {})",
                    self.registered_identifiers().join(", ")
                ),
            )
        })?;

        factory(arguments)
            .map_err(|e| EnvironmentError::context_construction(identifier, e.message))
    }
}
