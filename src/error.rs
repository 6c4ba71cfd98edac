//! # Error Types
//!
//! Structured errors for the environment construction pipeline.
//!
//! Strategy implementations (resolvers, initializers, context factories) report
//! failures with the small stage-level types [`StageError`] and
//! [`ContextFactoryError`]. The handler wraps those into [`EnvironmentError`],
//! attaching the offending class identifier and the name of the failing chain
//! stage so a misconfigured chain can be diagnosed from the message alone.

use thiserror::Error;

/// Errors raised while building or isolating a context environment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvironmentError {
    #[error("Class resolution failed for '{identifier}' in resolver {resolver}: {reason}")]
    ClassResolution {
        identifier: String,
        resolver: String,
        reason: String,
    },

    #[error("Argument resolution failed for context '{class}' in resolver {resolver}: {reason}")]
    ArgumentResolution {
        class: String,
        resolver: String,
        reason: String,
    },

    #[error("Context construction failed for '{class}': {reason}")]
    ContextConstruction { class: String, reason: String },

    #[error("Context initialization failed for '{class}' in initializer {initializer}: {reason}")]
    ContextInitialization {
        class: String,
        initializer: String,
        reason: String,
    },

    #[error("Environment in state {state} cannot be isolated by this handler")]
    UnsupportedEnvironment { state: String },

    #[error("Suite '{suite}' does not configure any contexts")]
    UnsupportedSuite { suite: String },

    #[error("Invalid setting '{setting}' in suite '{suite}': {reason}")]
    InvalidSuiteSetting {
        suite: String,
        setting: String,
        reason: String,
    },

    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },
}

impl EnvironmentError {
    /// Create a class resolution error
    pub fn class_resolution(
        identifier: impl Into<String>,
        resolver: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ClassResolution {
            identifier: identifier.into(),
            resolver: resolver.into(),
            reason: reason.into(),
        }
    }

    /// Create an argument resolution error
    pub fn argument_resolution(
        class: impl Into<String>,
        resolver: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ArgumentResolution {
            class: class.into(),
            resolver: resolver.into(),
            reason: reason.into(),
        }
    }

    /// Create a context construction error
    pub fn context_construction(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContextConstruction {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Create a context initialization error
    pub fn context_initialization(
        class: impl Into<String>,
        initializer: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ContextInitialization {
            class: class.into(),
            initializer: initializer.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid suite setting error
    pub fn invalid_suite_setting(
        suite: impl Into<String>,
        setting: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSuiteSetting {
            suite: suite.into(),
            setting: setting.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// The class identifier this error is about, if any
    pub fn class_identifier(&self) -> Option<&str> {
        match self {
            Self::ClassResolution { identifier, .. } => Some(identifier),
            Self::ArgumentResolution { class, .. }
            | Self::ContextConstruction { class, .. }
            | Self::ContextInitialization { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Name of the chain stage that failed, if the error came from one
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::ClassResolution { resolver, .. } | Self::ArgumentResolution { resolver, .. } => {
                Some(resolver)
            }
            Self::ContextInitialization { initializer, .. } => Some(initializer),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for EnvironmentError {
    fn from(error: config::ConfigError) -> Self {
        EnvironmentError::configuration("ConfigLoader", error.to_string())
    }
}

pub type EnvironmentResult<T> = std::result::Result<T, EnvironmentError>;

/// Failure reported by a single resolver or initializer stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StageError {
    pub message: String,
}

impl StageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by a context factory while constructing an instance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ContextFactoryError {
    pub message: String,
}

impl ContextFactoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Shorthand for a factory receiving the wrong number of arguments
    pub fn arity(expected: usize, actual: usize) -> Self {
        Self::new(format!("expected {expected} argument(s), got {actual}"))
    }
}
