// src/config/mod.rs

//! Manifest loading and validation for initorder.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest from disk (`loader.rs`).
//! - Validate global settings (`validate.rs`).
//!
//! Per-unit problems (empty or repeated ids) are left to
//! [`crate::unit::UnitRegistry`], which drops the offending unit instead of
//! rejecting the whole file.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_manifest_path, load_and_validate, load_from_path};
pub use model::{Manifest, RawManifest, ResolverConfig, UnitConfig};
