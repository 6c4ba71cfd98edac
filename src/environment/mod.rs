//! # Environments
//!
//! Two-state environment lifecycle:
//!
//! ```text
//! Suite ──build──► UninitializedEnvironment ──isolate──► InitializedEnvironment
//!                  (canonical class list)                (constructed contexts)
//! ```
//!
//! The two states are distinct types, so isolating an already isolated
//! environment or running steps against an unbuilt one does not type-check.
//! [`Environment`] is the tagged union handed across the
//! [`EnvironmentHandler`] boundary, where several handler implementations may
//! coexist. Isolation reads an uninitialized environment and returns a new
//! value; the class list of either state never changes after construction.

pub mod handler;

pub use handler::{EnvironmentHandler, Subject};

use crate::context::Context;
use crate::suite::Suite;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Lifecycle state of an [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentState {
    Uninitialized,
    Initialized,
}

impl fmt::Display for EnvironmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentState::Uninitialized => write!(f, "uninitialized"),
            EnvironmentState::Initialized => write!(f, "initialized"),
        }
    }
}

/// Built environment: the ordered canonical class identifiers of a suite
#[derive(Debug, Clone)]
pub struct UninitializedEnvironment {
    suite: Arc<dyn Suite>,
    context_classes: Vec<String>,
}

impl UninitializedEnvironment {
    /// Duplicates are kept; order decides construction order.
    pub fn new(suite: Arc<dyn Suite>, context_classes: Vec<String>) -> Self {
        Self {
            suite,
            context_classes,
        }
    }

    pub fn suite(&self) -> &Arc<dyn Suite> {
        &self.suite
    }

    pub fn context_classes(&self) -> &[String] {
        &self.context_classes
    }

    pub fn has_contexts(&self) -> bool {
        !self.context_classes.is_empty()
    }

    pub fn has_context_class(&self, class: &str) -> bool {
        self.context_classes.iter().any(|c| c == class)
    }
}

/// Isolated environment: constructed and initialized contexts, in class order
pub struct InitializedEnvironment {
    suite: Arc<dyn Suite>,
    contexts: Vec<(String, Box<dyn Context>)>,
}

impl fmt::Debug for InitializedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializedEnvironment")
            .field("suite", &self.suite.name())
            .field("contexts", &self.contexts)
            .finish()
    }
}

impl InitializedEnvironment {
    /// Each context is paired with the canonical class it was built from.
    pub fn new(suite: Arc<dyn Suite>, contexts: Vec<(String, Box<dyn Context>)>) -> Self {
        Self { suite, contexts }
    }

    pub fn suite(&self) -> &Arc<dyn Suite> {
        &self.suite
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn context_classes(&self) -> Vec<&str> {
        self.contexts.iter().map(|(class, _)| class.as_str()).collect()
    }

    pub fn has_context_class(&self, class: &str) -> bool {
        self.contexts.iter().any(|(c, _)| c == class)
    }

    /// Contexts in construction order
    pub fn contexts(&self) -> impl Iterator<Item = &dyn Context> {
        self.contexts.iter().map(|(_, context)| &**context)
    }

    /// First context built for `class`
    pub fn context(&self, class: &str) -> Option<&dyn Context> {
        self.contexts
            .iter()
            .find(|(c, _)| c == class)
            .map(|(_, context)| &**context)
    }

    /// First context of concrete type `T`
    pub fn context_as<T: Any>(&self) -> Option<&T> {
        self.contexts().find_map(|context| context.downcast_ref::<T>())
    }

    /// Mutable access for step code running against the environment
    pub fn context_as_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.contexts
            .iter_mut()
            .find_map(|(_, context)| context.downcast_mut::<T>())
    }

    /// Hand the contexts over to the step runner
    pub fn into_contexts(self) -> Vec<(String, Box<dyn Context>)> {
        self.contexts
    }
}

/// Environment in either lifecycle state
#[derive(Debug)]
pub enum Environment {
    Uninitialized(UninitializedEnvironment),
    Initialized(InitializedEnvironment),
}

impl Environment {
    pub fn state(&self) -> EnvironmentState {
        match self {
            Environment::Uninitialized(_) => EnvironmentState::Uninitialized,
            Environment::Initialized(_) => EnvironmentState::Initialized,
        }
    }

    pub fn suite(&self) -> &Arc<dyn Suite> {
        match self {
            Environment::Uninitialized(environment) => environment.suite(),
            Environment::Initialized(environment) => environment.suite(),
        }
    }

    pub fn as_uninitialized(&self) -> Option<&UninitializedEnvironment> {
        match self {
            Environment::Uninitialized(environment) => Some(environment),
            Environment::Initialized(_) => None,
        }
    }

    pub fn as_initialized(&self) -> Option<&InitializedEnvironment> {
        match self {
            Environment::Initialized(environment) => Some(environment),
            Environment::Uninitialized(_) => None,
        }
    }

    pub fn into_initialized(self) -> Option<InitializedEnvironment> {
        match self {
            Environment::Initialized(environment) => Some(environment),
            Environment::Uninitialized(_) => None,
        }
    }
}

impl From<UninitializedEnvironment> for Environment {
    fn from(environment: UninitializedEnvironment) -> Self {
        Environment::Uninitialized(environment)
    }
}

impl From<InitializedEnvironment> for Environment {
    fn from(environment: InitializedEnvironment) -> Self {
        Environment::Initialized(environment)
    }
}
