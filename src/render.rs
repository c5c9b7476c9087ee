// src/render.rs

//! Text and JSON rendering of analysis tables and run reports.

use std::fmt::Write as _;

use serde::Serialize;

use crate::dag::{AnalysisRow, Diagnostic, Resolution};
use crate::exec::RunReport;

#[derive(Serialize)]
struct AnalysisDocument<'a> {
    units: Vec<AnalysisRow>,
    diagnostics: &'a [Diagnostic],
}

/// Human-readable analysis table, one block per unit in run order.
pub fn render_table(resolution: &Resolution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "units ({}):", resolution.len());

    for unit in resolution.units() {
        let _ = write!(
            out,
            "  {:>3}. {}  priority={} depth={}",
            unit.order, unit.id, unit.priority, unit.depth
        );
        if let Some(hint) = unit.priority_hint {
            if unit.needs_update() {
                let _ = write!(out, "  (current {hint}, needs update)");
            } else {
                let _ = write!(out, "  (current {hint})");
            }
        }
        if unit.cycle_affected {
            out.push_str("  [cycle]");
        }
        out.push('\n');

        if !unit.dependencies.is_empty() {
            let _ = writeln!(out, "       after: {}", unit.dependencies.join(", "));
        }
        if !unit.dependents.is_empty() {
            let _ = writeln!(out, "       needed by: {}", unit.dependents.join(", "));
        }
        if !unit.unresolved_dependencies.is_empty() {
            let _ = writeln!(
                out,
                "       unresolved: {}",
                unit.unresolved_dependencies.join(", ")
            );
        }
    }

    if !resolution.diagnostics().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "diagnostics ({}):", resolution.diagnostics().len());
        for diagnostic in resolution.diagnostics() {
            let _ = writeln!(out, "  - {diagnostic}");
        }
    }

    out
}

/// Analysis table and diagnostics as pretty JSON.
pub fn table_to_json(resolution: &Resolution) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&AnalysisDocument {
        units: resolution.table(),
        diagnostics: resolution.diagnostics(),
    })
}

pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "attempted {}, succeeded {}, failed {}, skipped {}",
        report.attempted,
        report.succeeded,
        report.failed_count(),
        report.skipped.len()
    );

    for failure in &report.failed {
        let _ = writeln!(out, "  FAILED {}: {}", failure.id, failure.detail);
    }

    let _ = writeln!(out, "order:");
    for entry in &report.order {
        let _ = writeln!(
            out,
            "  {:>3}. {} ({})",
            entry.order, entry.id, entry.priority
        );
    }

    out
}

pub fn report_to_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
