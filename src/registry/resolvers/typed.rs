//! # Typed Context Initializer
//!
//! Applies a closure only to contexts of one concrete type and skips every
//! other context. This is how collaborators get injected into the contexts
//! that want them:
//!
//! ```rust
//! use behave_env::registry::resolvers::TypedContextInitializer;
//! use behave_env::registry::ContextInitializer;
//!
//! #[derive(Debug, Default)]
//! struct ApiContext {
//!     token: Option<String>,
//! }
//!
//! let initializer = TypedContextInitializer::<ApiContext>::new("TokenInjector", |context| {
//!     context.token = Some("secret".to_string());
//!     Ok(())
//! });
//!
//! let mut context = ApiContext::default();
//! initializer.initialize(&mut context).unwrap();
//! assert_eq!(context.token.as_deref(), Some("secret"));
//! ```

use crate::context::Context;
use crate::error::StageError;
use crate::registry::ContextInitializer;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

type TypedInitializeFn<T> = Box<dyn Fn(&mut T) -> Result<(), StageError> + Send + Sync>;

/// Initializer restricted to contexts of type `T`
pub struct TypedContextInitializer<T: Context> {
    name: String,
    initialize: TypedInitializeFn<T>,
    _context: PhantomData<fn(&mut T)>,
}

impl<T: Context> TypedContextInitializer<T> {
    pub fn new<F>(name: impl Into<String>, initialize: F) -> Self
    where
        F: Fn(&mut T) -> Result<(), StageError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            initialize: Box::new(initialize),
            _context: PhantomData,
        }
    }
}

impl<T: Context> fmt::Debug for TypedContextInitializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedContextInitializer")
            .field("name", &self.name)
            .field("context_type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Context> ContextInitializer for TypedContextInitializer<T> {
    fn initializer_name(&self) -> &str {
        &self.name
    }

    fn initialize(&self, context: &mut dyn Context) -> Result<(), StageError> {
        match context.downcast_mut::<T>() {
            Some(typed) => (self.initialize)(typed),
            None => {
                trace!(
                    initializer = %self.name,
                    "Context type does not match typed initializer, skipping"
                );
                Ok(())
            }
        }
    }
}
