// tests/registry.rs

use std::thread;

use initorder::pipeline::Pipeline;
use initorder::unit::{
    RegisterOutcome, RunAction, SharedRegistry, UnitDescriptor, UnitRegistry, ValidationError,
};
use initorder_test_utils::recorder::Recorder;

#[test]
fn empty_ids_are_rejected() {
    let mut registry = UnitRegistry::new();

    assert_eq!(
        registry.register(UnitDescriptor::new("")),
        Err(ValidationError::EmptyId)
    );
    assert_eq!(
        registry.register(UnitDescriptor::new("   ")),
        Err(ValidationError::EmptyId)
    );
    assert!(registry.is_empty());
}

#[test]
fn duplicate_ids_without_actions_are_rejected() {
    let mut registry = UnitRegistry::new();
    registry.register(UnitDescriptor::new("core")).unwrap();

    let err = registry
        .register(UnitDescriptor::new("core").depends_on(["other"]))
        .unwrap_err();
    assert_eq!(err, ValidationError::DuplicateId("core".to_string()));

    // First registration wins.
    assert_eq!(registry.len(), 1);
    assert!(registry.get("core").unwrap().dependencies().is_empty());
}

#[test]
fn same_action_registered_twice_is_coalesced() {
    let recorder = Recorder::new();
    let action = recorder.action("core");

    let mut registry = UnitRegistry::new();
    assert_eq!(
        registry.register(UnitDescriptor::new("core").with_action(action.clone())),
        Ok(RegisterOutcome::Added)
    );
    assert_eq!(
        registry.register(UnitDescriptor::new("core").with_action(action)),
        Ok(RegisterOutcome::Coalesced)
    );
    assert_eq!(registry.len(), 1);

    let report = Pipeline::default().run(&registry).unwrap();
    assert_eq!(report.attempted, 1);
    assert_eq!(recorder.calls(), vec!["core"]);
}

#[test]
fn distinct_actions_under_one_id_conflict() {
    let recorder = Recorder::new();

    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("core").with_action(recorder.action("core")))
        .unwrap();

    let err = registry
        .register(UnitDescriptor::new("core").with_action(recorder.action("core")))
        .unwrap_err();
    assert_eq!(err, ValidationError::ConflictingAction("core".to_string()));
}

#[test]
fn action_against_no_action_is_a_duplicate() {
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("core").with_fn(|| Ok(())))
        .unwrap();

    assert_eq!(
        registry.register(UnitDescriptor::new("core")),
        Err(ValidationError::DuplicateId("core".to_string()))
    );
}

#[test]
fn batch_registration_drops_only_offending_units() {
    let units = vec![
        UnitDescriptor::new("a"),
        UnitDescriptor::new(""),
        UnitDescriptor::new("a"),
        UnitDescriptor::new("b").depends_on(["a"]),
    ];

    let (registry, rejected) = UnitRegistry::from_provider(&units);

    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(
        rejected,
        vec![
            ValidationError::EmptyId,
            ValidationError::DuplicateId("a".to_string()),
        ]
    );

    let resolution = Pipeline::default().resolve(&registry).unwrap();
    assert_eq!(resolution.ids(), vec!["a", "b"]);
}

#[test]
fn dependencies_behave_as_an_ordered_set() {
    let unit = UnitDescriptor::new("x").depends_on(["b", "a", "b", "", "c", "a"]);
    assert_eq!(unit.dependencies(), &["b", "a", "c"]);
}

#[test]
fn run_action_identity_follows_clones() {
    let a = RunAction::new(|| Ok(()));
    let b = a.clone();
    let c = RunAction::new(|| Ok(()));

    assert!(a.same_as(&b));
    assert!(!a.same_as(&c));
}

#[test]
fn shared_registry_snapshot_sees_all_writers() {
    let shared = SharedRegistry::default();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared
                    .register(UnitDescriptor::new(format!("unit-{i}")))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.len(), 8);

    // Later writes do not leak into an existing snapshot.
    shared.register(UnitDescriptor::new("late")).unwrap();
    assert_eq!(snapshot.len(), 8);
    assert!(shared.snapshot().contains("late"));

    let rejected = shared.extend([UnitDescriptor::new("late"), UnitDescriptor::new("later")]);
    assert_eq!(rejected, vec![ValidationError::DuplicateId("late".to_string())]);
    assert_eq!(shared.snapshot().len(), 10);
}

#[test]
fn independent_pipelines_do_not_share_state() {
    let first: Vec<UnitDescriptor> = vec![
        UnitDescriptor::new("a"),
        UnitDescriptor::new("b").depends_on(["a"]),
    ];
    let second: Vec<UnitDescriptor> = vec![UnitDescriptor::new("x"), UnitDescriptor::new("y")];

    let handles: Vec<_> = [first, second]
        .into_iter()
        .map(|units| {
            thread::spawn(move || {
                let (registry, _) = UnitRegistry::from_provider(&units);
                Pipeline::default()
                    .resolve(&registry).unwrap()
                    .ids()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], vec!["a", "b"]);
    assert_eq!(results[1], vec!["x", "y"]);
}
