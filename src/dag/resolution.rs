// src/dag/resolution.rs

//! Output of a resolution pass.

use std::fmt;

use serde::Serialize;

use crate::types::UnitId;
use crate::unit::RunAction;

/// Non-fatal finding from graph construction or linearization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `unit` declared a dependency on `missing`, which is not registered.
    UnresolvedDependency { unit: UnitId, missing: UnitId },
    /// The walk reached `unit` again while it was still in progress.
    /// `path` is the closed loop, e.g. `["A", "B", "A"]`.
    CycleDetected { unit: UnitId, path: Vec<UnitId> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedDependency { unit, missing } => {
                write!(f, "unit '{unit}' depends on unknown unit '{missing}'")
            }
            Diagnostic::CycleDetected { unit, path } => {
                write!(f, "dependency cycle at '{unit}': {}", path.join(" -> "))
            }
        }
    }
}

/// One unit with its place in the final order.
#[derive(Debug, Clone)]
pub struct ResolvedUnit {
    pub id: UnitId,
    /// 1-based position; 1 runs first.
    pub order: usize,
    /// Non-increasing as `order` grows.
    pub priority: i64,
    /// What the unit reported for itself, if anything.
    pub priority_hint: Option<i64>,
    pub depth: usize,
    pub dependencies: Vec<UnitId>,
    pub dependents: Vec<UnitId>,
    pub unresolved_dependencies: Vec<UnitId>,
    /// Strict precedence could not be guaranteed for this unit.
    pub cycle_affected: bool,
    pub action: Option<RunAction>,
}

impl ResolvedUnit {
    /// The unit's self-reported priority differs from the computed one.
    pub fn needs_update(&self) -> bool {
        self.priority_hint.is_some_and(|hint| hint != self.priority)
    }

    pub fn to_row(&self) -> AnalysisRow {
        AnalysisRow {
            id: self.id.clone(),
            order: self.order,
            priority: self.priority,
            priority_hint: self.priority_hint,
            needs_update: self.needs_update(),
            depth: self.depth,
            dependencies: self.dependencies.clone(),
            dependents: self.dependents.clone(),
            cycle_affected: self.cycle_affected,
            unresolved_dependencies: self.unresolved_dependencies.clone(),
        }
    }
}

/// Serializable per-unit row for reporting and inspection tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRow {
    pub id: UnitId,
    pub order: usize,
    pub priority: i64,
    pub priority_hint: Option<i64>,
    pub needs_update: bool,
    pub depth: usize,
    pub dependencies: Vec<UnitId>,
    pub dependents: Vec<UnitId>,
    pub cycle_affected: bool,
    pub unresolved_dependencies: Vec<UnitId>,
}

/// Every registered unit in run order, plus the diagnostics of the pass.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    units: Vec<ResolvedUnit>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// `units` must already be sorted by `order`.
    pub fn new(units: Vec<ResolvedUnit>, diagnostics: Vec<Diagnostic>) -> Self {
        Self { units, diagnostics }
    }

    /// Units sorted by ascending order (descending priority).
    pub fn units(&self) -> &[ResolvedUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn order_of(&self, id: &str) -> Option<usize> {
        self.get(id).map(|u| u.order)
    }

    pub fn priority_of(&self, id: &str) -> Option<i64> {
        self.get(id).map(|u| u.priority)
    }

    /// Ids in run order.
    pub fn ids(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.id.as_str()).collect()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_cycles(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::CycleDetected { .. }))
    }

    pub fn cycle_affected(&self) -> impl Iterator<Item = &ResolvedUnit> {
        self.units.iter().filter(|u| u.cycle_affected)
    }

    /// Units whose self-reported priority is out of date.
    pub fn needing_update(&self) -> impl Iterator<Item = &ResolvedUnit> {
        self.units.iter().filter(|u| u.needs_update())
    }

    pub fn table(&self) -> Vec<AnalysisRow> {
        self.units.iter().map(ResolvedUnit::to_row).collect()
    }
}
