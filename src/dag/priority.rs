// src/dag/priority.rs

//! Priority scale and dependency depth.

use tracing::debug;

use crate::config::ResolverConfig;
use crate::dag::DependencyGraph;
use crate::errors::{InitOrderError, Result};

/// Maps 1-based positions onto `base - step * (order - 1)`.
///
/// The first unit gets `base`, every following unit `step` less, so a higher
/// priority always means "runs earlier" and the values work as a plain sort
/// key for consumers.
#[derive(Debug, Clone, Copy)]
pub struct PriorityAssigner {
    base: i64,
    step: i64,
    normalize_non_negative: bool,
}

impl Default for PriorityAssigner {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl PriorityAssigner {
    pub fn new(base: i64, step: i64) -> Self {
        Self {
            base,
            step,
            normalize_non_negative: false,
        }
    }

    pub fn from_config(cfg: &ResolverConfig) -> Self {
        Self {
            base: cfg.base_priority,
            step: cfg.priority_step,
            normalize_non_negative: cfg.normalize_non_negative,
        }
    }

    pub fn normalizing(mut self, on: bool) -> Self {
        self.normalize_non_negative = on;
        self
    }

    /// Raw priority for a 1-based `order`, before any normalization.
    ///
    /// `None` when the value does not fit in an `i64`.
    pub fn priority_for(&self, order: usize) -> Option<i64> {
        let offset = i64::try_from(order.checked_sub(1)?).ok()?;
        self.base.checked_sub(self.step.checked_mul(offset)?)
    }

    /// Priorities for positions `1..=len`, normalized if configured.
    ///
    /// The scale is computed in `i128` so a base close to `i64::MIN` can
    /// still be normalized. A scale that cannot be represented as `i64`
    /// once finished is a configuration error.
    pub fn assign(&self, len: usize) -> Result<Vec<i64>> {
        let base = i128::from(self.base);
        let step = i128::from(self.step);

        let mut raw = Vec::with_capacity(len);
        for k in 0..len {
            let value = i128::try_from(k)
                .ok()
                .and_then(|k| step.checked_mul(k))
                .and_then(|drop| base.checked_sub(drop))
                .ok_or_else(|| self.out_of_range(len))?;
            raw.push(value);
        }

        if self.normalize_non_negative {
            shift_to_zero(&mut raw);
        }

        raw.into_iter()
            .map(|p| i64::try_from(p).map_err(|_| self.out_of_range(len)))
            .collect()
    }

    /// Shift every priority up by the same amount so the minimum is zero.
    ///
    /// Leaves the slice untouched when nothing is negative. Relative order
    /// is preserved. Fails without touching the slice when the shifted
    /// maximum would not fit.
    pub fn normalize(priorities: &mut [i64]) -> Result<()> {
        let mut wide: Vec<i128> = priorities.iter().map(|&p| i128::from(p)).collect();
        shift_to_zero(&mut wide);

        let shifted = wide
            .into_iter()
            .map(i64::try_from)
            .collect::<std::result::Result<Vec<i64>, _>>()
            .map_err(|_| {
                InitOrderError::ConfigError(
                    "normalized priorities do not fit in a 64-bit integer".to_string(),
                )
            })?;
        priorities.copy_from_slice(&shifted);
        Ok(())
    }

    fn out_of_range(&self, len: usize) -> InitOrderError {
        InitOrderError::ConfigError(format!(
            "priority scale out of range: base {} with step {} over {len} units \
             does not fit in a 64-bit integer",
            self.base, self.step
        ))
    }

    /// Longest dependency chain below each unit, indexed by graph node.
    ///
    /// Walks `order` once: a unit with no resolved dependency placed before
    /// it has depth 0, otherwise one more than the deepest such dependency.
    /// An edge that a cycle forced to point forward in the order contributes
    /// depth 0 for that branch instead of looping.
    pub fn depths(graph: &DependencyGraph, order: &[usize]) -> Vec<usize> {
        let mut position = vec![usize::MAX; graph.len()];
        for (pos, &idx) in order.iter().enumerate() {
            position[idx] = pos;
        }

        let mut depth = vec![0usize; graph.len()];
        for (pos, &idx) in order.iter().enumerate() {
            depth[idx] = graph
                .resolved_deps(idx)
                .iter()
                .filter(|&&dep| position[dep] < pos)
                .map(|&dep| depth[dep] + 1)
                .max()
                .unwrap_or(0);
        }
        depth
    }
}

fn shift_to_zero(priorities: &mut [i128]) {
    let Some(&min) = priorities.iter().min() else {
        return;
    };
    if min >= 0 {
        return;
    }

    let offset = -min;
    for p in priorities.iter_mut() {
        *p += offset;
    }
    debug!(offset = %offset, "normalized priorities to be non-negative");
}
