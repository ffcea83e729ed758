use serde::{Deserialize, Serialize};

/// Which learner drives an agent's actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerKind {
    /// Reinforcer/predictor induction over working memory.
    #[default]
    Operant,
    /// PC-algorithm causal network over the observation history.
    Causal,
}

impl LearnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operant => "operant",
            Self::Causal => "causal",
        }
    }
}

/// Agent-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub learner: LearnerKind,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}
