#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Behave Environment Core
//!
//! Context environment construction for behavior-driven test runners.
//!
//! ## Overview
//!
//! A test suite names the context classes its steps run against. Before each
//! test, the runner needs fresh, fully configured instances of those classes.
//! This crate turns the names into instances through three pluggable strategy
//! chains:
//!
//! - **Class resolvers** map a configured identifier (an alias, a short
//!   name) to a canonical class. First supporting resolver wins; with no
//!   match the identifier is already canonical.
//! - **Argument resolvers** transform the stored constructor arguments of a
//!   class. Every resolver runs, each seeing the previous one's output.
//! - **Context initializers** run side effects on each freshly constructed
//!   context, in registration order.
//!
//! ## Lifecycle
//!
//! ```text
//! builder ──build()──► ContextEnvironmentHandler   (immutable, Send + Sync)
//!
//! Suite ──build_environment──► UninitializedEnvironment
//!       ──isolate_environment──► InitializedEnvironment (per test)
//! ```
//!
//! ## Module Organization
//!
//! - [`handler`] - The environment handler and its builder
//! - [`environment`] - Environment states and the handler contract
//! - [`registry`] - Strategy traits, chains and built-in resolvers
//! - [`context`] - Context trait and the factory registry
//! - [`suite`] - Suite settings contract
//! - [`config`] - Layered configuration loading
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use behave_env::{ContextEnvironmentHandler, GenericSuite, Suite};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default)]
//! struct FeatureContext {
//!     visited: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ContextEnvironmentHandler::builder();
//! builder.register_default_context::<FeatureContext>("FeatureContext");
//! let handler = builder.build();
//!
//! let suite: Arc<dyn Suite> = Arc::new(GenericSuite::with_context("default", "FeatureContext"));
//! assert!(handler.supports_suite(suite.as_ref()));
//!
//! let environment = handler.build_environment(suite)?;
//! let isolated = handler.isolate_environment(&environment, None)?;
//! assert!(isolated.context_as::<FeatureContext>().unwrap().visited.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod suite;

pub use crate::config::{ConfigLoader, EnvironmentConfig};
pub use context::{Context, ContextArguments, ContextRegistry, FromContextArguments};
pub use environment::{
    Environment, EnvironmentHandler, EnvironmentState, InitializedEnvironment, Subject,
    UninitializedEnvironment,
};
pub use error::{ContextFactoryError, EnvironmentError, EnvironmentResult, StageError};
pub use handler::{ContextEnvironmentHandler, ContextEnvironmentHandlerBuilder, HandlerStats};
pub use registry::{
    ArgumentResolver, ArgumentResolverChain, ClassResolver, ClassResolverChain,
    ContextInitializer, ContextInitializerChain,
};
pub use suite::{GenericSuite, Suite};
