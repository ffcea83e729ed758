use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{PavlovError, PavlovResult};

/// Reinforcer/predictor engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OperantConfig {
    /// Oldest age kept in working memory (MAX_AGE). Ages run 0..=memory_depth.
    pub memory_depth: usize,
    /// Longest conjunction the generator will register.
    pub max_conjunction_terms: usize,
    /// Cap on tracked conjunctions per reinforcer.
    pub max_conjunctions: usize,
    /// A predictor that false-alarms is deleted when its demerit falls below this.
    pub demerit_threshold: f64,
    /// Merit gap under which a predictor and its strict subset count as equivalent.
    pub subsumption_tolerance: f64,
    /// Trials both predictors need before the subset rule may delete one.
    pub subsumption_min_trials: u64,
    /// Also generate FUTURE-tagged sensory terms.
    pub future_terms: bool,
}

impl Default for OperantConfig {
    fn default() -> Self {
        Self {
            memory_depth: defaults::DEFAULT_MEMORY_DEPTH,
            max_conjunction_terms: defaults::DEFAULT_MAX_CONJUNCTION_TERMS,
            max_conjunctions: defaults::DEFAULT_MAX_CONJUNCTIONS,
            demerit_threshold: defaults::DEFAULT_DEMERIT_THRESHOLD,
            subsumption_tolerance: defaults::DEFAULT_SUBSUMPTION_TOLERANCE,
            subsumption_min_trials: defaults::DEFAULT_SUBSUMPTION_MIN_TRIALS,
            future_terms: defaults::DEFAULT_FUTURE_TERMS,
        }
    }
}

impl OperantConfig {
    pub fn validate(&self) -> PavlovResult<()> {
        // Count updates look two steps back (PREVIOUS relative to age 1).
        if self.memory_depth < 2 {
            return Err(PavlovError::invalid_configuration(
                "operant.memory_depth must be at least 2",
            ));
        }
        if self.max_conjunction_terms == 0 {
            return Err(PavlovError::invalid_configuration(
                "operant.max_conjunction_terms must be at least 1",
            ));
        }
        Ok(())
    }
}
