// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::exec::command::ShellCommand;
use crate::types::StartOrder;
use crate::unit::{DescriptorProvider, UnitDescriptor};

/// Manifest as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// base_priority = 1000
/// priority_step = 10
/// normalize_non_negative = true
/// start_order = "declaration"
///
/// [[unit]]
/// id = "core"
/// cmd = "echo core"
///
/// [[unit]]
/// id = "audio"
/// cmd = "echo audio"
/// after = ["core"]
/// priority = 500
/// ```
///
/// Units are an array of tables so their declaration order survives
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawManifest {
    #[serde(default)]
    pub config: ResolverConfig,

    #[serde(default)]
    pub unit: Vec<UnitConfig>,
}

/// Validated manifest. Only obtainable through `TryFrom<RawManifest>`.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub config: ResolverConfig,
    pub unit: Vec<UnitConfig>,
}

impl Manifest {
    pub(crate) fn new_unchecked(config: ResolverConfig, unit: Vec<UnitConfig>) -> Self {
        Self { config, unit }
    }
}

/// `[config]` section: how orders are turned into priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Priority of the unit that runs first.
    #[serde(default = "default_base_priority")]
    pub base_priority: i64,

    /// Gap between consecutive units. Must be at least 1.
    #[serde(default = "default_priority_step")]
    pub priority_step: i64,

    /// Shift all priorities up when the lowest one would be negative.
    #[serde(default = "default_normalize_non_negative")]
    pub normalize_non_negative: bool,

    #[serde(default)]
    pub start_order: StartOrder,
}

fn default_base_priority() -> i64 {
    1000
}

fn default_priority_step() -> i64 {
    10
}

fn default_normalize_non_negative() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_priority: default_base_priority(),
            priority_step: default_priority_step(),
            normalize_non_negative: default_normalize_non_negative(),
            start_order: StartOrder::default(),
        }
    }
}

/// `[[unit]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    pub id: String,

    /// Shell command run for this unit. Without one the unit only takes part
    /// in analysis.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Units that must run before this one.
    #[serde(default)]
    pub after: Vec<String>,

    /// Priority the unit currently claims; reported against the computed one.
    #[serde(default)]
    pub priority: Option<i64>,
}

impl UnitConfig {
    pub fn to_descriptor(&self) -> UnitDescriptor {
        let mut descriptor =
            UnitDescriptor::new(self.id.clone()).depends_on(self.after.iter().cloned());
        if let Some(cmd) = &self.cmd {
            let command = ShellCommand::new(self.id.clone(), cmd.clone());
            descriptor = descriptor.with_action(command.into_action());
        }
        if let Some(hint) = self.priority {
            descriptor = descriptor.with_priority_hint(hint);
        }
        descriptor
    }
}

impl DescriptorProvider for Manifest {
    fn descriptors(&self) -> Vec<UnitDescriptor> {
        self.unit.iter().map(UnitConfig::to_descriptor).collect()
    }
}
