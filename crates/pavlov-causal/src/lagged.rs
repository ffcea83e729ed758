//! The lagged causal schema: a `@t-1` copy of every variable and a `@t` copy of
//! every sensory variable. Causal claims run from the former to the latter.

use pavlov_core::constants::{CURRENT_STEP_SUFFIX, PREVIOUS_STEP_SUFFIX};
use pavlov_core::models::{Assignment, Schema, Variable};

/// Name of the previous-step copy of `name`.
pub fn previous(name: &str) -> String {
    format!("{name}{PREVIOUS_STEP_SUFFIX}")
}

/// Name of the current-step copy of `name`.
pub fn current(name: &str) -> String {
    format!("{name}{CURRENT_STEP_SUFFIX}")
}

/// Time tier of a lagged name: 0 for `@t-1`, 1 for `@t`, `None` for plain names.
pub fn tier_of(name: &str) -> Option<usize> {
    if name.ends_with(PREVIOUS_STEP_SUFFIX) {
        Some(0)
    } else if name.ends_with(CURRENT_STEP_SUFFIX) {
        Some(1)
    } else {
        None
    }
}

/// The original variable name behind a lagged name.
pub fn base_name(name: &str) -> &str {
    name.strip_suffix(PREVIOUS_STEP_SUFFIX)
        .or_else(|| name.strip_suffix(CURRENT_STEP_SUFFIX))
        .unwrap_or(name)
}

/// Lagged variables for `schema`, previous-step copies first.
pub fn lagged_variables(schema: &Schema) -> Vec<Variable> {
    let previous_step = schema.variables().iter().map(|v| v.renamed(previous(&v.name)));
    let current_step = schema.sensors().map(|v| v.renamed(current(&v.name)));
    previous_step.chain(current_step).collect()
}

/// One lagged row from two consecutive full entries.
pub fn lagged_row(schema: &Schema, before: &Assignment, after: &Assignment) -> Assignment {
    let mut row = Assignment::new();
    for variable in schema.variables() {
        if let Some(value) = before.get(&variable.name) {
            row.insert(previous(&variable.name), value.clone());
        }
    }
    for variable in schema.sensors() {
        if let Some(value) = after.get(&variable.name) {
            row.insert(current(&variable.name), value.clone());
        }
    }
    row
}
