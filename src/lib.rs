// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod unit;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{Manifest, ResolverConfig, load_and_validate};
use crate::dag::DependencyGraph;
use crate::exec::{ExecutionEngine, TimedExecutor};
use crate::unit::UnitRegistry;

pub use crate::pipeline::Pipeline;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - manifest loading and CLI overrides
/// - registry construction (rejected units are logged and dropped)
/// - resolution, and either printing it or running the units
///
/// Returns `Ok(false)` when the execution pass recorded failed units.
pub async fn run(args: CliArgs) -> Result<bool> {
    let manifest_path = PathBuf::from(&args.manifest);
    let manifest = load_and_validate(&manifest_path)
        .with_context(|| format!("loading manifest {}", manifest_path.display()))?;

    let config = effective_config(&manifest, &args);
    let pipeline = Pipeline::new(config)?;

    let (registry, rejected) = UnitRegistry::from_provider(&manifest);
    for err in &rejected {
        warn!(error = %err, "unit dropped from manifest");
    }
    info!(
        units = registry.len(),
        rejected = rejected.len(),
        start_order = %config.start_order,
        "manifest loaded"
    );

    if args.dot {
        print!("{}", DependencyGraph::build(&registry).to_dot());
        return Ok(true);
    }

    let resolution = pipeline.resolve(&registry)?;

    if args.analyze {
        if args.json {
            println!("{}", render::table_to_json(&resolution)?);
        } else {
            print!("{}", render::render_table(&resolution));
        }
        debug!("analysis complete (no execution)");
        return Ok(true);
    }

    let report = match args.timeout_ms {
        Some(ms) => {
            TimedExecutor::new(Duration::from_millis(ms))
                .execute(&resolution)
                .await
        }
        None => ExecutionEngine::new().execute(&resolution),
    };

    if args.json {
        println!("{}", render::report_to_json(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }

    Ok(report.is_success())
}

/// `[config]` from the manifest with CLI overrides applied.
fn effective_config(manifest: &Manifest, args: &CliArgs) -> ResolverConfig {
    let mut config = manifest.config;
    if let Some(order) = args.start_order {
        config.start_order = order;
    }
    if let Some(base) = args.base_priority {
        config.base_priority = base;
    }
    if let Some(step) = args.priority_step {
        config.priority_step = step;
    }
    config
}
