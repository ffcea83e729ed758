mod event;
mod predicate;
mod schema;

use std::collections::BTreeMap;

pub use event::{Event, EventKind};
pub use predicate::Predicate;
pub use schema::{Schema, Variable, VariableKind};

/// A mapping from variable names to one value each. Ordered by name so that
/// iteration, hashing, and display are deterministic.
pub type Assignment = BTreeMap<String, String>;
