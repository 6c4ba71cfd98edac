//! # Environment Handler Contract
//!
//! The interface a test-run orchestrator uses to pick a handler for a suite
//! and drive it through build and isolation. Several handlers may be
//! registered with one orchestrator; the `supports_*` methods let it choose.

use super::Environment;
use crate::error::EnvironmentResult;
use crate::suite::Suite;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Optional test target hint (feature file, scenario, example) passed by
/// the orchestrator. Handlers may use it to pick a strategy; the context
/// handler in this crate ignores it.
pub type Subject = dyn Any + Send + Sync;

/// Orchestrator-facing environment handler
pub trait EnvironmentHandler: Send + Sync + fmt::Debug {
    /// Whether this handler can build an environment for the suite
    fn supports_suite(&self, suite: &dyn Suite) -> bool;

    /// Build an uninitialized environment for the suite
    fn build_environment(&self, suite: Arc<dyn Suite>) -> EnvironmentResult<Environment>;

    /// Whether this handler can isolate the environment for the subject
    fn supports_environment_and_subject(
        &self,
        environment: &Environment,
        subject: Option<&Subject>,
    ) -> bool;

    /// Produce an initialized environment; the input is left untouched
    fn isolate_environment(
        &self,
        environment: &Environment,
        subject: Option<&Subject>,
    ) -> EnvironmentResult<Environment>;
}
