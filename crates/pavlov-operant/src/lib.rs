//! # pavlov-operant
//!
//! Reinforcer/predictor learning over a working memory of time-tagged predicates.
//! Each step the engine acquires secondary reinforcers, grows conjunctions, updates
//! their statistics, creates and deletes predictors, and picks an action.

pub mod conjunction;
pub mod engine;
pub mod reinforcer;
pub mod scoring;
pub mod temporal;
pub mod working_memory;

pub use conjunction::{Conjunction, Term};
pub use engine::{Decision, DecisionSource, OperantEngine};
pub use reinforcer::{ConjunctionStats, Reinforcer};
pub use scoring::{demerit, merit};
pub use temporal::TemporalTag;
pub use working_memory::{MemorySlot, WorkingMemory};
