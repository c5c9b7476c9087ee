#![allow(dead_code)]

use initorder::config::{Manifest, RawManifest, ResolverConfig, UnitConfig};
use initorder::types::StartOrder;
use initorder::unit::{UnitDescriptor, UnitRegistry};

/// Builder for `Manifest` to simplify test setup.
pub struct ManifestBuilder {
    manifest: RawManifest,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: RawManifest {
                config: ResolverConfig::default(),
                unit: Vec::new(),
            },
        }
    }

    pub fn with_unit(mut self, unit: UnitConfig) -> Self {
        self.manifest.unit.push(unit);
        self
    }

    pub fn base_priority(mut self, base: i64) -> Self {
        self.manifest.config.base_priority = base;
        self
    }

    pub fn priority_step(mut self, step: i64) -> Self {
        self.manifest.config.priority_step = step;
        self
    }

    pub fn normalize_non_negative(mut self, on: bool) -> Self {
        self.manifest.config.normalize_non_negative = on;
        self
    }

    pub fn start_order(mut self, order: StartOrder) -> Self {
        self.manifest.config.start_order = order;
        self
    }

    pub fn build_raw(self) -> RawManifest {
        self.manifest
    }

    pub fn build(self) -> Manifest {
        Manifest::try_from(self.manifest).expect("Failed to build valid manifest from builder")
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `UnitConfig`.
pub struct UnitConfigBuilder {
    unit: UnitConfig,
}

impl UnitConfigBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            unit: UnitConfig {
                id: id.to_string(),
                cmd: None,
                after: vec![],
                priority: None,
            },
        }
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        self.unit.cmd = Some(cmd.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.unit.after.push(dep.to_string());
        self
    }

    pub fn priority(mut self, hint: i64) -> Self {
        self.unit.priority = Some(hint);
        self
    }

    pub fn build(self) -> UnitConfig {
        self.unit
    }
}

/// Registry from `(id, deps)` pairs, for analysis-only tests.
pub fn registry_of(units: &[(&str, &[&str])]) -> UnitRegistry {
    let mut registry = UnitRegistry::new();
    for (id, deps) in units {
        registry
            .register(UnitDescriptor::new(*id).depends_on(deps.iter().copied()))
            .expect("test units must be valid");
    }
    registry
}
