// src/pipeline.rs

//! descriptors -> graph -> order -> priorities -> (execution).
//!
//! Every call recomputes from scratch from the registry it is given; the
//! pipeline itself only holds its configuration, so independent callers can
//! share one or build their own without coordinating.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::dag::{DependencyGraph, PriorityAssigner, Resolution, ResolvedUnit, Resolver};
use crate::errors::Result;
use crate::exec::{ExecutionEngine, RunReport, TimedExecutor};
use crate::unit::UnitRegistry;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: ResolverConfig,
}

impl Pipeline {
    /// Build a pipeline, rejecting unusable settings (e.g. a zero step).
    pub fn new(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Analysis mode: resolve order, priorities and diagnostics.
    ///
    /// Only fails when the configured priority scale cannot be represented
    /// for this many units.
    pub fn resolve(&self, registry: &UnitRegistry) -> Result<Resolution> {
        let graph = DependencyGraph::build(registry);
        let linear = Resolver::new(self.config.start_order).linearize(&graph);

        let assigner = PriorityAssigner::from_config(&self.config);
        let priorities = assigner.assign(linear.order.len())?;
        let depths = PriorityAssigner::depths(&graph, &linear.order);

        let units: Vec<ResolvedUnit> = linear
            .order
            .iter()
            .zip(priorities)
            .enumerate()
            .map(|(pos, (&idx, priority))| {
                let node = &graph.nodes()[idx];
                let descriptor = registry.get(&node.id);
                ResolvedUnit {
                    id: node.id.clone(),
                    order: pos + 1,
                    priority,
                    priority_hint: descriptor.and_then(|d| d.priority_hint()),
                    depth: depths[idx],
                    dependencies: node.dependencies.clone(),
                    dependents: node.dependents.clone(),
                    unresolved_dependencies: node.unresolved.clone(),
                    cycle_affected: linear.cycle_affected[idx],
                    action: descriptor.and_then(|d| d.action().cloned()),
                }
            })
            .collect();

        let mut diagnostics = graph.diagnostics().to_vec();
        diagnostics.extend(linear.diagnostics);

        info!(
            units = units.len(),
            diagnostics = diagnostics.len(),
            "resolution finished"
        );
        debug!(order = ?units.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), "resolved order");

        Ok(Resolution::new(units, diagnostics))
    }

    /// Execution mode: resolve, then run every action once in order.
    pub fn run(&self, registry: &UnitRegistry) -> Result<RunReport> {
        let resolution = self.resolve(registry)?;
        Ok(ExecutionEngine::new().execute(&resolution))
    }

    /// Like [`Pipeline::run`], bounding each action by `timeout`.
    pub async fn run_with_timeout(
        &self,
        registry: &UnitRegistry,
        timeout: Duration,
    ) -> Result<RunReport> {
        let resolution = self.resolve(registry)?;
        Ok(TimedExecutor::new(timeout).execute(&resolution).await)
    }
}
