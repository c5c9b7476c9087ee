// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{Manifest, RawManifest};
use crate::errors::Result;

/// Load a manifest from `path` without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawManifest> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let manifest: RawManifest = toml::from_str(&contents)?;

    Ok(manifest)
}

/// Load a manifest and validate its global settings.
///
/// This is the entry point the binary uses. It checks that:
/// - there is at least one `[[unit]]`,
/// - `[config]` values are usable.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Manifest> {
    let raw = load_from_path(&path)?;
    let manifest = Manifest::try_from(raw)?;
    Ok(manifest)
}

/// `Initorder.toml` in the current working directory.
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from("Initorder.toml")
}
