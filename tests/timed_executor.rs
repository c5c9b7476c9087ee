// tests/timed_executor.rs

use std::time::Duration;

use initorder::exec::TimedExecutor;
use initorder::pipeline::Pipeline;
use initorder::unit::{UnitDescriptor, UnitRegistry};
use initorder_test_utils::recorder::Recorder;
use initorder_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn slow_unit_times_out_and_the_pass_continues() {
    init_tracing();

    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("slow").with_action(recorder.sleeping("slow", 2_000)))
        .unwrap();
    registry
        .register(
            UnitDescriptor::new("after-slow")
                .depends_on(["slow"])
                .with_action(recorder.action("after-slow")),
        )
        .unwrap();

    let report = with_timeout(
        Pipeline::default().run_with_timeout(&registry, Duration::from_millis(100)),
    )
    .await
    .unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed_ids(), vec!["slow"]);
    assert!(report.failed[0].detail.contains("timed out"));
    assert_eq!(recorder.calls(), vec!["slow", "after-slow"]);
}

#[tokio::test]
async fn timed_pass_captures_errors_and_panics() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    registry
        .register(UnitDescriptor::new("err").with_action(recorder.failing("err", "bad config")))
        .unwrap();
    registry
        .register(UnitDescriptor::new("boom").with_action(recorder.panicking("boom", "kaboom")))
        .unwrap();
    registry
        .register(UnitDescriptor::new("fine").with_action(recorder.action("fine")))
        .unwrap();

    let resolution = Pipeline::default().resolve(&registry).unwrap();
    let executor = TimedExecutor::new(Duration::from_secs(2));
    let report = with_timeout(executor.execute(&resolution)).await;

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed_ids(), vec!["err", "boom"]);
    assert_eq!(report.failed[0].detail, "bad config");
    assert!(report.failed[1].detail.contains("kaboom"));
    assert_eq!(recorder.calls(), vec!["err", "boom", "fine"]);
}

#[tokio::test]
async fn timed_pass_follows_resolved_order() {
    let recorder = Recorder::new();
    let mut registry = UnitRegistry::new();
    for (id, deps) in [("net", vec!["core"]), ("ui", vec!["net", "core"]), ("core", vec![])] {
        registry
            .register(
                UnitDescriptor::new(id)
                    .depends_on(deps)
                    .with_action(recorder.action(id)),
            )
            .unwrap();
    }
    registry.register(UnitDescriptor::new("docs")).unwrap();

    let resolution = Pipeline::default().resolve(&registry).unwrap();
    let executor = TimedExecutor::new(Duration::from_secs(1));
    assert_eq!(executor.timeout(), Duration::from_secs(1));

    let report = with_timeout(executor.execute(&resolution)).await;

    assert!(report.is_success());
    assert_eq!(recorder.calls(), vec!["core", "net", "ui"]);
    assert_eq!(report.skipped, vec!["docs".to_string()]);
    assert_eq!(
        report.order.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        vec!["core", "net", "ui", "docs"]
    );
}
