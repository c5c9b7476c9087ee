// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::StartOrder;

/// Command-line arguments for `initorder`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "initorder",
    version,
    about = "Order initialization units by their dependencies and run them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the unit manifest (TOML).
    #[arg(long, value_name = "PATH", default_value = "Initorder.toml")]
    pub manifest: String,

    /// Resolve and print the order/priority table without running anything.
    #[arg(long)]
    pub analyze: bool,

    /// Print tables and reports as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the dependency graph in Graphviz DOT format and exit.
    #[arg(long)]
    pub dot: bool,

    /// Tie-break policy (declaration or lexicographic). Overrides `[config]`.
    #[arg(long, value_name = "ORDER")]
    pub start_order: Option<StartOrder>,

    /// Priority of the first unit. Overrides `[config]`.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub base_priority: Option<i64>,

    /// Priority gap between consecutive units. Overrides `[config]`.
    #[arg(long, value_name = "N")]
    pub priority_step: Option<i64>,

    /// Fail any unit whose command runs longer than this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `INITORDER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
