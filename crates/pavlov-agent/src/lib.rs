//! # pavlov-agent
//!
//! The orchestrator around the learners. An [`Agent`] owns the variable schema,
//! the observation history, working memory, the RNG and the event sink, and
//! exposes the `init` / `sense` / `act` cycle a simulation loop drives.

pub mod agent;
pub mod learner;

pub use agent::Agent;
pub use learner::{build_learner, CausalLearner, ILearner, OperantLearner, StepView};
