use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(name, value)` pair. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    pub value: String,
}

impl Predicate {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether `assignment` gives this predicate's variable this predicate's value.
    pub fn holds_in(&self, assignment: &super::Assignment) -> bool {
        assignment.get(&self.name) == Some(&self.value)
    }

    pub fn into_pair(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl From<(&str, &str)> for Predicate {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}
