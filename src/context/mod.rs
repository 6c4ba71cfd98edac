//! # Contexts
//!
//! A context is the user-defined object step definitions run against. The
//! pipeline treats it as opaque: it only needs to be constructible from one
//! ordered argument sequence (see [`ContextRegistry`]) and mutable in place
//! by initializers.
//!
//! Any `'static + Send + Debug` type is a [`Context`]. Concrete types are
//! recovered from a `&dyn Context` with `downcast_ref` / `downcast_mut`.
//! Call `as_any` on `&dyn Context`, not on the `Box`: the box is itself a
//! `Context` and would downcast as `Box<dyn Context>`.

pub mod registry;

pub use registry::{ContextFactory, ContextRegistry, FromContextArguments};

use serde_json::Value;
use std::any::Any;
use std::fmt;

/// The single ordered argument sequence a context is constructed from
pub type ContextArguments = Vec<Value>;

/// Opaque, mutable test context
pub trait Context: Any + Send + fmt::Debug + 'static {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Send + fmt::Debug> Context for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn Context {
    /// Borrow the context as its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the context as its concrete type
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
