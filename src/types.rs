use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical unit identifier type used throughout the crate.
pub type UnitId = String;

/// Order in which the resolver picks entry points (and walks each unit's
/// dependency list) when several valid linearizations exist.
///
/// - `Declaration`: the order units were registered / declared in the
///   manifest, and each unit's dependencies in the order they were listed.
/// - `Lexicographic`: ascending byte-wise id order at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOrder {
    #[default]
    Declaration,
    Lexicographic,
}

impl FromStr for StartOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declaration" | "declaration-order" => Ok(StartOrder::Declaration),
            "lexicographic" | "lexicographic-id" => Ok(StartOrder::Lexicographic),
            other => Err(format!(
                "invalid start_order: {other} (expected \"declaration\" or \"lexicographic\")"
            )),
        }
    }
}

impl fmt::Display for StartOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartOrder::Declaration => f.write_str("declaration"),
            StartOrder::Lexicographic => f.write_str("lexicographic"),
        }
    }
}
