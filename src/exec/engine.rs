// src/exec/engine.rs

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::dag::{Resolution, ResolvedUnit};
use crate::exec::invoke::invoke;
use crate::exec::report::RunReport;
use crate::unit::RunAction;

/// Runs every resolved unit's action once, lowest order first.
///
/// A failing unit is recorded and the pass moves on; nothing is retried.
/// Cycle-affected units still run at their best-effort position.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionEngine;

impl ExecutionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, resolution: &Resolution) -> RunReport {
        let mut report = RunReport::for_resolution(resolution);
        let plan = plan_pass(resolution, &mut report);

        info!(units = resolution.len(), runnable = plan.len(), "starting execution pass");

        for (unit, action) in plan {
            debug!(
                unit = %unit.id,
                order = unit.order,
                priority = unit.priority,
                "running unit"
            );
            match invoke(action) {
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
}

/// Units to run, in order, each id at most once.
///
/// Units without an action are recorded as skipped in `report`.
pub(crate) fn plan_pass<'a>(
    resolution: &'a Resolution,
    report: &mut RunReport,
) -> Vec<(&'a ResolvedUnit, &'a RunAction)> {
    let mut executed: HashSet<&str> = HashSet::new();
    let mut plan = Vec::with_capacity(resolution.len());

    for unit in resolution.units() {
        if !executed.insert(unit.id.as_str()) {
            debug!(unit = %unit.id, "unit already scheduled in this pass; not running again");
            continue;
        }
        match unit.action.as_ref() {
            Some(action) => plan.push((unit, action)),
            None => {
                debug!(unit = %unit.id, "unit has no run action; skipping");
                report.record_skip(&unit.id);
            }
        }
    }

    plan
}

pub(crate) fn log_summary(report: &RunReport) {
    if report.is_success() {
        info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            skipped = report.skipped.len(),
            "execution pass finished"
        );
    } else {
        warn!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed_count(),
            failed_units = ?report.failed_ids(),
            "execution pass finished with failures"
        );
    }
}
