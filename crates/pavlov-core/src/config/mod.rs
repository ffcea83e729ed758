//! Layered configuration. Every section falls back to the values in [`defaults`].

mod agent_config;
mod causal_config;
pub mod defaults;
mod observability_config;
mod operant_config;

pub use agent_config::{AgentConfig, LearnerKind};
pub use causal_config::CausalConfig;
pub use observability_config::ObservabilityConfig;
pub use operant_config::OperantConfig;

use serde::{Deserialize, Serialize};

use crate::errors::PavlovResult;

/// Top-level configuration for an agent and its learners.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PavlovConfig {
    pub agent: AgentConfig,
    pub causal: CausalConfig,
    pub operant: OperantConfig,
    pub observability: ObservabilityConfig,
}

impl PavlovConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(source: &str) -> PavlovResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the learners cannot run with.
    pub fn validate(&self) -> PavlovResult<()> {
        self.causal.validate()?;
        self.operant.validate()
    }
}
