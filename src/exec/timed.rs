// src/exec/timed.rs

//! Async shell around the execution pass with a per-unit timeout.
//!
//! Units still run one after another in resolved order; each action runs on
//! its own OS thread while the pass awaits the result with
//! [`tokio::time::timeout`]. When the timeout fires the unit is recorded as
//! failed and the pass continues. The stalled thread is left detached: Rust
//! cannot stop an arbitrary closure, and it must not block shutdown the way
//! a `spawn_blocking` task would.

use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::dag::{Resolution, ResolvedUnit};
use crate::exec::engine::{log_summary, plan_pass};
use crate::exec::invoke::invoke;
use crate::exec::report::RunReport;
use crate::unit::RunAction;

#[derive(Debug, Clone, Copy)]
pub struct TimedExecutor {
    timeout: Duration,
}

impl TimedExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn execute(&self, resolution: &Resolution) -> RunReport {
        let mut report = RunReport::for_resolution(resolution);
        let plan = plan_pass(resolution, &mut report);

        info!(
            units = resolution.len(),
            runnable = plan.len(),
            timeout_ms = self.timeout.as_millis() as u64,
            "starting timed execution pass"
        );

        for (unit, action) in plan {
            match self.run_one(unit, action).await {
                Ok(()) => {
                    debug!(unit = %unit.id, "unit succeeded");
                    report.record_success();
                }
                Err(detail) => {
                    warn!(
                        unit = %unit.id,
                        error = %detail,
                        "unit failed; continuing with the next unit"
                    );
                    report.record_failure(&unit.id, detail);
                }
            }
        }

        log_summary(&report);
        report
    }

    async fn run_one(&self, unit: &ResolvedUnit, action: &RunAction) -> Result<(), String> {
        debug!(
            unit = %unit.id,
            order = unit.order,
            priority = unit.priority,
            "running unit"
        );

        let (tx, rx) = oneshot::channel();
        let action = action.clone();
        std::thread::Builder::new()
            .name(format!("unit-{}", unit.id))
            .spawn(move || {
                let _ = tx.send(invoke(&action));
            })
            .map_err(|e| format!("failed to start unit thread: {e}"))?;

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err("unit thread exited without reporting an outcome".to_string()),
            Err(_) => Err(format!("timed out after {} ms", self.timeout.as_millis())),
        }
    }
}
