// src/exec/mod.rs

//! Execution of resolved units.
//!
//! - [`engine`] holds the synchronous [`ExecutionEngine`]: one pass, in
//!   order, every action at most once, failures isolated per unit.
//! - [`timed`] is an async shell around the same pass that bounds each
//!   action with a timeout on a Tokio runtime.
//! - [`invoke`] runs a single action and turns errors and panics into a
//!   failure detail.
//! - [`report`] defines the [`RunReport`] both executors produce.
//! - [`command`] builds run actions from shell commands for manifest units.

pub mod command;
pub mod engine;
pub mod invoke;
pub mod report;
pub mod timed;

pub use engine::ExecutionEngine;
pub use report::{ExecutionFailure, OrderEntry, RunReport};
pub use timed::TimedExecutor;
