//! Structured log events for learner occurrences.
//!
//! Each function emits a `tracing` event with structured fields. [`emit`] routes a
//! core [`Event`] to the matching function.

use pavlov_core::models::{Event, EventKind};

/// Log a secondary reinforcer acquisition.
pub fn reinforcer_acquired(time: u64, reinforcer: &str, source: &str) {
    tracing::info!(
        event = "reinforcer_acquired",
        time = time,
        reinforcer = %reinforcer,
        source = %source,
        "reinforcer acquired"
    );
}

/// Log a predictor promotion.
pub fn predictor_created(time: u64, reinforcer: &str, predictor: &str, merit: &str, reason: &str) {
    tracing::info!(
        event = "predictor_created",
        time = time,
        reinforcer = %reinforcer,
        predictor = %predictor,
        merit = %merit,
        reason = %reason,
        "predictor created"
    );
}

/// Log a predictor deletion and the rule that removed it.
pub fn predictor_deleted(time: u64, reinforcer: &str, predictor: &str, rule: &str, demerit: &str) {
    tracing::info!(
        event = "predictor_deleted",
        time = time,
        reinforcer = %reinforcer,
        predictor = %predictor,
        rule = %rule,
        demerit = %demerit,
        "predictor deleted"
    );
}

/// Log a chosen action with its source and estimated probability.
pub fn action_chosen(time: u64, action: &str, source: &str, probability: Option<&str>) {
    tracing::info!(
        event = "action_chosen",
        time = time,
        action = %action,
        source = %source,
        probability = ?probability,
        "action chosen"
    );
}

/// Log a causal network rebuild.
pub fn graph_rebuilt(time: u64, nodes: &str, edges: &str, acyclic: &str) {
    tracing::info!(
        event = "graph_rebuilt",
        time = time,
        nodes = %nodes,
        edges = %edges,
        acyclic = %acyclic,
        "graph rebuilt"
    );
}

/// Log a cyclic learned network.
pub fn cycle_detected(time: u64, cycles: &str) {
    tracing::warn!(
        event = "cycle_detected",
        time = time,
        cycles = %cycles,
        "cycle detected"
    );
}

/// Log the verification outcome of the edge under test.
pub fn edge_verified(time: u64, from: &str, to: &str, outcome: &str) {
    tracing::info!(
        event = "edge_verified",
        time = time,
        from = %from,
        to = %to,
        outcome = %outcome,
        "edge verified"
    );
}

/// Emit `event` through the function for its kind. Missing fields log as empty.
pub fn emit(event: &Event) {
    let field = |key| field_or_empty(event, key);
    let time = event.time;
    match event.kind {
        EventKind::ReinforcerAcquired => {
            reinforcer_acquired(time, field("reinforcer"), field("source"))
        }
        EventKind::PredictorCreated => predictor_created(
            time,
            field("reinforcer"),
            field("predictor"),
            field("merit"),
            field("reason"),
        ),
        EventKind::PredictorDeleted => predictor_deleted(
            time,
            field("reinforcer"),
            field("predictor"),
            field("rule"),
            field("demerit"),
        ),
        EventKind::ActionChosen => action_chosen(
            time,
            field("action"),
            field("source"),
            event.field("probability"),
        ),
        EventKind::GraphRebuilt => {
            graph_rebuilt(time, field("nodes"), field("edges"), field("acyclic"))
        }
        EventKind::CycleDetected => cycle_detected(time, field("cycles")),
        EventKind::EdgeVerified => {
            edge_verified(time, field("from"), field("to"), field("outcome"))
        }
    }
}

fn field_or_empty<'a>(event: &'a Event, key: &str) -> &'a str {
    event.field(key).unwrap_or_default()
}
