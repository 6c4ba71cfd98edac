#![allow(dead_code)]

pub mod strategies;

use behave_env::{
    ContextArguments, ContextEnvironmentHandlerBuilder, ContextFactoryError, FromContextArguments,
    GenericSuite, InitializedEnvironment, StageError, Suite,
};
use behave_env::registry::{FnArgumentResolver, FnClassResolver, FnContextInitializer};
use serde_json::{json, Value};
use std::sync::Arc;

/// Context that records what it was built from and what touched it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingContext {
    pub arguments: ContextArguments,
    pub initialized_by: Vec<String>,
}

impl FromContextArguments for RecordingContext {
    fn from_arguments(arguments: ContextArguments) -> Result<Self, ContextFactoryError> {
        Ok(Self {
            arguments,
            initialized_by: Vec::new(),
        })
    }
}

/// Minimal context with a strict constructor
#[derive(Debug, PartialEq)]
pub struct ApiContext {
    pub base_url: String,
    pub timeout: u64,
    pub token: Option<String>,
}

impl FromContextArguments for ApiContext {
    fn from_arguments(arguments: ContextArguments) -> Result<Self, ContextFactoryError> {
        let [base_url, timeout] = arguments.as_slice() else {
            return Err(ContextFactoryError::arity(2, arguments.len()));
        };
        let base_url = base_url
            .as_str()
            .ok_or_else(|| ContextFactoryError::new("base_url must be a string"))?;
        let timeout = timeout
            .as_u64()
            .ok_or_else(|| ContextFactoryError::new("timeout must be an unsigned integer"))?;

        Ok(Self {
            base_url: base_url.to_string(),
            timeout,
            token: None,
        })
    }
}

pub fn suite(suite: GenericSuite) -> Arc<dyn Suite> {
    Arc::new(suite)
}

/// Builder with a `RecordingContext` factory for each class
pub fn recording_builder<'a>(
    classes: impl IntoIterator<Item = &'a str>,
) -> ContextEnvironmentHandlerBuilder {
    let mut builder = ContextEnvironmentHandlerBuilder::new();
    for class in classes {
        builder.register_context_type::<RecordingContext>(class);
    }
    builder
}

pub fn recorded(environment: &InitializedEnvironment) -> Vec<RecordingContext> {
    environment
        .contexts()
        .map(|context| {
            context
                .downcast_ref::<RecordingContext>()
                .expect("context should be a RecordingContext")
                .clone()
        })
        .collect()
}

/// Argument resolver appending `value` to the sequence
pub fn appending(name: &'static str, value: &'static str) -> Arc<FnArgumentResolver> {
    Arc::new(FnArgumentResolver::new(name, move |_, mut arguments| {
        arguments.push(json!(value));
        Ok(arguments)
    }))
}

/// Initializer recording its own name on `RecordingContext`s
pub fn tagging(name: &'static str) -> Arc<FnContextInitializer> {
    Arc::new(FnContextInitializer::new(name, move |context| {
        if let Some(recorded) = context.downcast_mut::<RecordingContext>() {
            recorded.initialized_by.push(name.to_string());
        }
        Ok(())
    }))
}

/// Class resolver mapping exactly one identifier
pub fn mapping(from: &'static str, to: &'static str) -> Arc<FnClassResolver> {
    Arc::new(FnClassResolver::new(
        format!("Map({from})"),
        move |identifier| identifier == from,
        move |_| Ok(to.to_string()),
    ))
}

pub fn failing_stage(message: &'static str) -> StageError {
    StageError::new(message)
}

pub fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|value| json!(value)).collect()
}
