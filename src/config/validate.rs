// src/config/validate.rs

use crate::config::model::{Manifest, RawManifest, ResolverConfig};
use crate::errors::{InitOrderError, Result};

impl TryFrom<RawManifest> for Manifest {
    type Error = InitOrderError;

    fn try_from(raw: RawManifest) -> std::result::Result<Self, Self::Error> {
        ensure_has_units(&raw)?;
        raw.config.validate()?;
        Ok(Manifest::new_unchecked(raw.config, raw.unit))
    }
}

impl ResolverConfig {
    /// Check that the priority scale is strictly decreasing.
    pub fn validate(&self) -> Result<()> {
        if self.priority_step < 1 {
            return Err(InitOrderError::ConfigError(format!(
                "[config].priority_step must be >= 1 (got {})",
                self.priority_step
            )));
        }
        Ok(())
    }
}

fn ensure_has_units(raw: &RawManifest) -> Result<()> {
    if raw.unit.is_empty() {
        return Err(InitOrderError::ConfigError(
            "manifest must contain at least one [[unit]] entry".to_string(),
        ));
    }
    Ok(())
}
