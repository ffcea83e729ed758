//! # pavlov-observability
//!
//! Structured tracing setup with span definitions, typed log events for learner
//! occurrences, and the event sinks handed to an agent: an in-memory append-only
//! [`EventLog`] with JSON-lines export and a [`TracingSink`] that forwards to `tracing`.

pub mod event_log;
pub mod tracing_setup;

pub use event_log::{EventLog, EventLogEntry};
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter, TracingSink};
