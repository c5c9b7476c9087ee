// src/exec/report.rs

use serde::Serialize;

use crate::dag::Resolution;
use crate::types::UnitId;

/// A unit whose action returned an error, panicked or timed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionFailure {
    pub id: UnitId,
    pub detail: String,
}

/// Audit entry: where a unit was placed and with which priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    pub id: UnitId,
    pub order: usize,
    pub priority: i64,
}

/// Summary of one execution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Actions that were invoked.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<ExecutionFailure>,
    /// Units without an action; nothing was run for them.
    pub skipped: Vec<UnitId>,
    /// The resolved order the pass followed.
    pub order: Vec<OrderEntry>,
}

impl RunReport {
    /// Empty report carrying the order table of `resolution`.
    pub fn for_resolution(resolution: &Resolution) -> Self {
        let order = resolution
            .units()
            .iter()
            .map(|u| OrderEntry {
                id: u.id.clone(),
                order: u.order,
                priority: u.priority,
            })
            .collect();

        Self {
            order,
            ..Self::default()
        }
    }

    /// No attempted action failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.id.as_str()).collect()
    }

    pub(crate) fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub(crate) fn record_failure(&mut self, id: &str, detail: String) {
        self.attempted += 1;
        self.failed.push(ExecutionFailure {
            id: id.to_string(),
            detail,
        });
    }

    pub(crate) fn record_skip(&mut self, id: &str) {
        self.skipped.push(id.to_string());
    }
}
