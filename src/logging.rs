// src/logging.rs

//! Global `tracing` subscriber for the binary.
//!
//! The filter comes from `--log-level` when given, otherwise from the
//! `INITORDER_LOG` directive string (same syntax as `RUST_LOG`, e.g.
//! `warn,initorder::dag=debug`), otherwise `info`. Events go to stderr so
//! stdout only carries the rendered table, report or DOT output.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "INITORDER_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialising logging: {e}"))?;

    Ok(())
}

/// Filter for the given CLI level and `INITORDER_LOG` value.
///
/// A CLI level applies to every target. An empty or unset variable falls
/// back to `info`; a malformed one is an error rather than being ignored.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(EnvFilter::new(level.directive()));
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value {directives:?}")),
        None => Ok(EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
