// src/dag/mod.rs

//! Dependency graph, ordering and priorities.
//!
//! - [`graph`] builds forward/reverse adjacency from a registry and records
//!   unresolved references.
//! - [`resolver`] linearizes the graph with a three-colour depth-first walk
//!   and reports cycles as data.
//! - [`priority`] maps the linear order onto a numeric priority scale and
//!   computes dependency depth.
//! - [`resolution`] holds the per-unit output table and diagnostics.

pub mod graph;
pub mod priority;
pub mod resolution;
pub mod resolver;

pub use graph::{DependencyGraph, GraphNode};
pub use priority::PriorityAssigner;
pub use resolution::{AnalysisRow, Diagnostic, Resolution, ResolvedUnit};
pub use resolver::{Linearization, Resolver};
