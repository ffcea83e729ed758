//! # pavlov-causal
//!
//! The causal structure learner. Folds an observation history into sparse or dense
//! probability tables, runs a PC-algorithm variant over a petgraph dependency graph,
//! and drives actions toward an aim through the explore → build → act → verify cycle.

pub mod controller;
pub mod graph;
pub mod history;
pub mod lagged;
pub mod pc;
pub mod probability;

pub use controller::{CausalController, ControllerPhase, EdgeUnderTest};
pub use graph::{DependencyGraph, EdgeMark, GraphEdge};
pub use history::ObservationHistory;
pub use pc::{PcLearner, PcOutcome, SeparatingSets};
pub use probability::{are_conditionally_independent, are_independent, ProbabilityTable};
