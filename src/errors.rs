// src/errors.rs

//! Crate-wide error types.
//!
//! Only configuration and IO problems are errors here. A rejected unit is a
//! [`crate::unit::ValidationError`] that drops that unit alone. Unresolved
//! dependencies and cycles are reported as [`crate::dag::Diagnostic`]s and
//! failing run actions end up in a [`crate::exec::RunReport`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitOrderError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, InitOrderError>;
