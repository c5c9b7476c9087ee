// tests/execution.rs

use anyhow::{Context, anyhow};
use initorder::dag::{Resolution, ResolvedUnit};
use initorder::exec::{ExecutionEngine, OrderEntry};
use initorder::pipeline::Pipeline;
use initorder::unit::{UnitDescriptor, UnitRegistry};
use initorder_test_utils::init_tracing;
use initorder_test_utils::recorder::Recorder;

#[test]
fn failing_unit_does_not_stop_the_pass() {
    init_tracing();

    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("X").with_action(recorder.failing("X", "boom")))
        .unwrap();
    registry
        .register(UnitDescriptor::new("Y").with_action(recorder.action("Y")))
        .unwrap();
    registry
        .register(UnitDescriptor::new("Z").with_action(recorder.action("Z")))
        .unwrap();

    let report = Pipeline::default().run(&registry).unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed_ids(), vec!["X"]);
    assert_eq!(report.failed[0].detail, "boom");
    assert!(!report.is_success());
    assert_eq!(recorder.calls(), vec!["X", "Y", "Z"]);
}

#[test]
fn dependents_of_a_failed_unit_still_run() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("base").with_action(recorder.failing("base", "no device")))
        .unwrap();
    registry
        .register(
            UnitDescriptor::new("top")
                .depends_on(["base"])
                .with_action(recorder.action("top")),
        )
        .unwrap();

    let report = Pipeline::default().run(&registry).unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(recorder.calls(), vec!["base", "top"]);
}

#[test]
fn panicking_unit_is_captured_as_failure() {
    init_tracing();

    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("bad").with_action(recorder.panicking("bad", "exploded")))
        .unwrap();
    registry
        .register(UnitDescriptor::new("good").with_action(recorder.action("good")))
        .unwrap();

    let report = Pipeline::default().run(&registry).unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, "bad");
    assert!(report.failed[0].detail.contains("panicked"));
    assert!(report.failed[0].detail.contains("exploded"));
    assert_eq!(recorder.calls(), vec!["bad", "good"]);
}

#[test]
fn failure_detail_keeps_the_error_context() {
    let mut registry = UnitRegistry::new();
    registry
        .register(
            UnitDescriptor::new("db")
                .with_fn(|| Err(anyhow!("connection refused")).context("opening database")),
        )
        .unwrap();

    let report = Pipeline::default().run(&registry).unwrap();

    assert_eq!(report.failed[0].detail, "opening database: connection refused");
}

#[test]
fn actions_run_in_dependency_order() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    for (id, deps) in [("ui", vec!["audio"]), ("audio", vec!["core"]), ("core", vec![])] {
        registry
            .register(
                UnitDescriptor::new(id)
                    .depends_on(deps)
                    .with_action(recorder.action(id)),
            )
            .unwrap();
    }

    let report = Pipeline::default().run(&registry).unwrap();

    assert!(report.is_success());
    assert_eq!(recorder.calls(), vec!["core", "audio", "ui"]);
    assert_eq!(
        report.order,
        vec![
            OrderEntry { id: "core".to_string(), order: 1, priority: 1000 },
            OrderEntry { id: "audio".to_string(), order: 2, priority: 990 },
            OrderEntry { id: "ui".to_string(), order: 3, priority: 980 },
        ]
    );
}

#[test]
fn units_without_actions_are_skipped() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry.register(UnitDescriptor::new("marker")).unwrap();
    registry
        .register(
            UnitDescriptor::new("worker")
                .depends_on(["marker"])
                .with_action(recorder.action("worker")),
        )
        .unwrap();

    let report = Pipeline::default().run(&registry).unwrap();

    assert_eq!(report.attempted, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.skipped, vec!["marker".to_string()]);
    assert_eq!(report.order.len(), 2);
    assert!(report.is_success());
}

#[test]
fn cycle_affected_units_still_run_once() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(
            UnitDescriptor::new("A")
                .depends_on(["B"])
                .with_action(recorder.action("A")),
        )
        .unwrap();
    registry
        .register(
            UnitDescriptor::new("B")
                .depends_on(["A"])
                .with_action(recorder.action("B")),
        )
        .unwrap();

    let pipeline = Pipeline::default();
    let resolution = pipeline.resolve(&registry).unwrap();
    let report = ExecutionEngine::new().execute(&resolution);

    assert_eq!(report.attempted, 2);
    assert_eq!(recorder.calls(), vec!["B", "A"]);
}

#[test]
fn executing_the_same_resolution_twice_runs_each_unit_once_per_pass() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("only").with_action(recorder.action("only")))
        .unwrap();

    let resolution = Pipeline::default().resolve(&registry).unwrap();
    let engine = ExecutionEngine::new();

    let first = engine.execute(&resolution);
    let second = engine.execute(&resolution);

    assert_eq!(first, second);
    assert_eq!(recorder.calls(), vec!["only", "only"]);
}

#[test]
fn repeated_id_in_a_resolution_runs_once() {
    let recorder = Recorder::new();
    let action = recorder.action("net");
    let entry = |order: usize, priority: i64| ResolvedUnit {
        id: "net".to_string(),
        order,
        priority,
        priority_hint: None,
        depth: 0,
        dependencies: Vec::new(),
        dependents: Vec::new(),
        unresolved_dependencies: Vec::new(),
        cycle_affected: false,
        action: Some(action.clone()),
    };
    let resolution = Resolution::new(vec![entry(1, 1000), entry(2, 990)], Vec::new());

    let report = ExecutionEngine::new().execute(&resolution);

    assert_eq!(report.attempted, 1);
    assert_eq!(report.succeeded, 1);
    assert!(report.skipped.is_empty());
    assert_eq!(report.order.len(), 2);
    assert_eq!(recorder.calls(), vec!["net"]);
}
