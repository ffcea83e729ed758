use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{PavlovError, PavlovResult};

/// Causal structure learner and controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalConfig {
    /// Absolute tolerance when comparing P(A,B) against P(A)·P(B).
    pub independence_tolerance: f64,
    /// Largest conditioning-set size tried. `None` grows until no node has enough neighbours.
    pub max_conditioning_size: Option<usize>,
    /// Record an empty separating set for pairs removed by the unconditioned test,
    /// making them eligible for collider orientation.
    pub orient_unconditioned_pairs: bool,
    /// Orient every edge between a `@t-1` node and a `@t` node forward in time.
    pub temporal_tiers: bool,
    /// Pre-allocate the full cross product when building tables.
    pub dense_tables: bool,
    /// History entries gathered with random actions before the first network build.
    pub explore_steps: usize,
    /// Steps between network rebuilds once the controller is acting.
    pub rebuild_interval: usize,
}

impl Default for CausalConfig {
    fn default() -> Self {
        Self {
            independence_tolerance: defaults::DEFAULT_INDEPENDENCE_TOLERANCE,
            max_conditioning_size: None,
            orient_unconditioned_pairs: defaults::DEFAULT_ORIENT_UNCONDITIONED_PAIRS,
            temporal_tiers: defaults::DEFAULT_TEMPORAL_TIERS,
            dense_tables: defaults::DEFAULT_DENSE_TABLES,
            explore_steps: defaults::DEFAULT_EXPLORE_STEPS,
            rebuild_interval: defaults::DEFAULT_REBUILD_INTERVAL,
        }
    }
}

impl CausalConfig {
    pub fn validate(&self) -> PavlovResult<()> {
        if !(self.independence_tolerance >= 0.0) {
            return Err(PavlovError::invalid_configuration(
                "causal.independence_tolerance must be non-negative",
            ));
        }
        if self.rebuild_interval == 0 {
            return Err(PavlovError::invalid_configuration(
                "causal.rebuild_interval must be at least 1",
            ));
        }
        Ok(())
    }
}
