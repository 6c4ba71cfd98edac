//! End-to-end tests for building and isolating context environments.

mod common;

use behave_env::registry::resolvers::{
    AliasClassResolver, NamespaceClassResolver, ParameterArgumentResolver, TypedContextInitializer,
};
use behave_env::registry::{FnArgumentResolver, FnContextInitializer};
use behave_env::{
    ContextEnvironmentHandler, Environment, EnvironmentError, EnvironmentHandler, GenericSuite,
};
use common::*;
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn test_single_context_without_strategies() {
    let handler = recording_builder(["MyContext"]).build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_context("default", "MyContext")))
        .unwrap();
    assert_eq!(environment.context_classes(), ["MyContext"]);

    let isolated = handler.isolate_environment(&environment, None).unwrap();
    assert_eq!(
        recorded(&isolated),
        vec![RecordingContext {
            arguments: vec![],
            initialized_by: vec![],
        }]
    );
}

#[test]
fn test_stored_arguments_follow_their_class() {
    let mut builder = recording_builder(["A", "B"]);
    builder.set_context_arguments("A", strings(&["x"])).unwrap();
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_contexts("default", ["A", "B"])))
        .unwrap();
    let isolated = handler.isolate_environment(&environment, None).unwrap();

    assert_eq!(isolated.context_classes(), vec!["A", "B"]);
    let contexts = recorded(&isolated);
    assert_eq!(contexts[0].arguments, strings(&["x"]));
    assert!(contexts[1].arguments.is_empty());
}

#[test]
fn test_resolved_class_uses_canonical_arguments() {
    let mut builder = recording_builder(["Full.Name"]);
    builder.register_class_resolver(mapping("Short", "Full.Name"));
    builder.set_context_arguments("Full.Name", strings(&["y"])).unwrap();
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_context("default", "Short")))
        .unwrap();
    assert_eq!(environment.context_classes(), ["Full.Name"]);

    let isolated = handler.isolate_environment(&environment, None).unwrap();
    assert_eq!(recorded(&isolated)[0].arguments, strings(&["y"]));
}

#[test]
fn test_alias_and_canonical_registration_are_equivalent() {
    let via_alias = {
        let mut builder = recording_builder([]);
        builder.register_class_resolver(mapping("Short", "Full.Name"));
        builder.set_context_arguments("Short", vec![json!(1), json!(2)]).unwrap();
        builder.build()
    };
    let direct = {
        let mut builder = recording_builder([]);
        builder.register_class_resolver(mapping("Short", "Full.Name"));
        builder.set_context_arguments("Full.Name", vec![json!(1), json!(2)]).unwrap();
        builder.set_context_arguments("Other", vec![json!(3)]).unwrap();
        builder.build()
    };

    assert_eq!(
        via_alias.context_arguments("Full.Name"),
        direct.context_arguments("Full.Name")
    );
    assert_eq!(
        direct.context_arguments("Full.Name"),
        Some(&vec![json!(1), json!(2)])
    );
}

#[test]
fn test_argument_chain_composes_in_registration_order() {
    let build = |first: &'static str, second: &'static str| {
        let mut builder = recording_builder(["C"]);
        builder
            .register_argument_resolver(appending(first, first))
            .register_argument_resolver(appending(second, second));
        builder.set_context_arguments("C", strings(&["base"])).unwrap();
        builder.build()
    };

    for (handler, expected) in [
        (build("a", "b"), strings(&["base", "a", "b"])),
        (build("b", "a"), strings(&["base", "b", "a"])),
    ] {
        let environment = handler
            .build_environment(suite(GenericSuite::with_context("s", "C")))
            .unwrap();
        let isolated = handler.isolate_environment(&environment, None).unwrap();
        assert_eq!(recorded(&isolated)[0].arguments, expected);
    }
}

#[test]
fn test_every_context_gets_every_initializer_once() {
    let mut builder = recording_builder(["A", "B", "C"]);
    builder
        .register_context_initializer(tagging("first"))
        .register_context_initializer(tagging("second"))
        .register_context_initializer(tagging("third"));
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_contexts("s", ["C", "A", "B"])))
        .unwrap();
    let isolated = handler.isolate_environment(&environment, None).unwrap();

    assert_eq!(isolated.context_classes(), vec!["C", "A", "B"]);
    for context in recorded(&isolated) {
        assert_eq!(context.initialized_by, vec!["first", "second", "third"]);
    }
}

#[test]
fn test_isolation_is_repeatable_and_independent() {
    let mut builder = recording_builder(["A", "B"]);
    builder.register_context_initializer(tagging("init"));
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_contexts("s", ["A", "B"])))
        .unwrap();

    let mut first = handler.isolate_environment(&environment, None).unwrap();
    let second = handler.isolate_environment(&environment, None).unwrap();
    assert_eq!(environment.context_classes(), ["A", "B"]);

    first
        .context_as_mut::<RecordingContext>()
        .unwrap()
        .initialized_by
        .push("mutated".to_string());

    assert_eq!(recorded(&second)[0].initialized_by, vec!["init"]);
    assert_eq!(recorded(&first)[0].initialized_by, vec!["init", "mutated"]);
}

#[test]
fn test_context_precedence_over_contexts() {
    let handler = recording_builder(["X", "A", "B"]).build();
    let environment = handler
        .build_environment(suite(
            GenericSuite::new("s")
                .with_setting("context", "X")
                .with_setting("contexts", json!(["A", "B"])),
        ))
        .unwrap();

    assert_eq!(environment.context_classes(), ["X"]);
}

#[test]
fn test_built_in_strategies_end_to_end() {
    let mut builder = ContextEnvironmentHandler::builder();
    builder
        .register_class_resolver(Arc::new(NamespaceClassResolver::new("api:", "Acme.Api.")))
        .register_class_resolver(Arc::new(
            AliasClassResolver::new().with_alias("api", "Acme.Api.Client"),
        ))
        .register_argument_resolver(Arc::new(
            ParameterArgumentResolver::default()
                .with_parameter("host", "staging.acme.test")
                .with_parameter("timeout", 15),
        ))
        .register_context_initializer(Arc::new(TypedContextInitializer::<ApiContext>::new(
            "TokenInitializer",
            |context| {
                context.token = Some(format!("token-for-{}", context.base_url));
                Ok(())
            },
        )))
        .register_context_type::<ApiContext>("Acme.Api.Client");
    builder
        .set_context_arguments("api:Client", vec![json!("https://%host%"), json!("%timeout%")])
        .unwrap();
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_context("default", "api")))
        .unwrap();
    assert_eq!(environment.context_classes(), ["Acme.Api.Client"]);

    let isolated = handler.isolate_environment(&environment, None).unwrap();
    assert_eq!(
        isolated.context_as::<ApiContext>(),
        Some(&ApiContext {
            base_url: "https://staging.acme.test".to_string(),
            timeout: 15,
            token: Some("token-for-https://staging.acme.test".to_string()),
        })
    );
}

#[test]
fn test_constructor_rejection_names_class() {
    let mut builder = ContextEnvironmentHandler::builder();
    builder.register_context_type::<ApiContext>("Acme.Api");
    builder.set_context_arguments("Acme.Api", vec![json!("only-one")]).unwrap();
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_context("s", "Acme.Api")))
        .unwrap();
    let error = handler.isolate_environment(&environment, None).unwrap_err();

    assert_eq!(error.class_identifier(), Some("Acme.Api"));
    assert!(error.to_string().contains("expected 2 argument(s), got 1"));
}

#[test]
fn test_argument_failure_names_stage_and_stops_isolation() {
    let mut builder = recording_builder(["A", "B"]);
    builder
        .register_argument_resolver(appending("Appender", "a"))
        .register_argument_resolver(Arc::new(FnArgumentResolver::new(
            "Validator",
            |class, arguments| {
                if class == "B" {
                    Err(failing_stage("B is not allowed"))
                } else {
                    Ok(arguments)
                }
            },
        )));
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_contexts("s", ["A", "B", "A"])))
        .unwrap();
    let error = handler.isolate_environment(&environment, None).unwrap_err();

    assert_eq!(
        error,
        EnvironmentError::ArgumentResolution {
            class: "B".to_string(),
            resolver: "Validator".to_string(),
            reason: "B is not allowed".to_string(),
        }
    );
    assert_eq!(error.stage(), Some("Validator"));
}

#[test]
fn test_initializer_failure_names_stage() {
    let mut builder = recording_builder(["A"]);
    builder
        .register_context_initializer(tagging("ok"))
        .register_context_initializer(Arc::new(FnContextInitializer::new(
            "Database",
            |_| Err(failing_stage("connection refused")),
        )));
    let handler = builder.build();

    let environment = handler
        .build_environment(suite(GenericSuite::with_context("s", "A")))
        .unwrap();
    let error = handler.isolate_environment(&environment, None).unwrap_err();

    assert!(matches!(
        error,
        EnvironmentError::ContextInitialization { ref class, ref initializer, .. }
            if class == "A" && initializer == "Database"
    ));
}

#[test]
fn test_handler_selection_through_trait_objects() {
    let handlers: Vec<Arc<dyn EnvironmentHandler>> =
        vec![Arc::new(recording_builder(["A"]).build())];
    let configured = suite(GenericSuite::with_context("configured", "A"));
    let bare = suite(GenericSuite::new("bare"));

    let chosen = handlers
        .iter()
        .find(|handler| handler.supports_suite(configured.as_ref()))
        .unwrap();
    assert!(handlers.iter().all(|handler| !handler.supports_suite(bare.as_ref())));

    let environment = chosen.build_environment(configured).unwrap();
    assert!(chosen.supports_environment_and_subject(&environment, None));

    let isolated = chosen.isolate_environment(&environment, None).unwrap();
    assert!(matches!(isolated, Environment::Initialized(_)));
    assert!(!chosen.supports_environment_and_subject(&isolated, None));
}

#[test]
fn test_shared_handler_across_threads() {
    let mut builder = recording_builder(["A", "B"]);
    builder.register_context_initializer(tagging("init"));
    let handler = Arc::new(builder.build());

    let workers: Vec<_> = (0..4)
        .map(|index| {
            let handler = Arc::clone(&handler);
            thread::spawn(move || {
                let classes = if index % 2 == 0 { vec!["A", "B"] } else { vec!["B"] };
                let environment = handler
                    .build_environment(suite(GenericSuite::with_contexts(
                        format!("suite-{index}"),
                        classes.clone(),
                    )))
                    .unwrap();
                let isolated = handler.isolate_environment(&environment, None).unwrap();
                assert_eq!(isolated.context_classes(), classes);
                isolated.len()
            })
        })
        .collect();

    let counts: Vec<usize> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    assert_eq!(counts, vec![2, 1, 2, 1]);
}
