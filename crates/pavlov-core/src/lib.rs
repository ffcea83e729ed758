//! # pavlov-core
//!
//! Foundation crate for the Pavlov learners.
//! Defines the variable schema, predicates, events, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PavlovConfig;
pub use errors::{PavlovError, PavlovResult};
pub use models::{Assignment, Event, EventKind, Predicate, Schema, Variable, VariableKind};
pub use traits::{IEventSink, NullSink};
