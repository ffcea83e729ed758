//! Separating sets recorded for pairs removed from the skeleton.

use std::collections::{BTreeMap, BTreeSet};

/// Conditioning sets that rendered a removed pair independent, keyed by the
/// unordered pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparatingSets {
    sets: BTreeMap<(String, String), BTreeSet<String>>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl SeparatingSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `set` for the pair. A later record for the same pair replaces it.
    pub fn insert<I, S>(&mut self, a: &str, b: &str, set: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .insert(pair_key(a, b), set.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&BTreeSet<String>> {
        self.sets.get(&pair_key(a, b))
    }

    /// Whether `v` separates `a` from `b`. `None` when the pair has no record.
    pub fn separates(&self, a: &str, b: &str, v: &str) -> Option<bool> {
        self.get(a, b).map(|set| set.contains(v))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &BTreeSet<String>)> {
        self.sets.iter()
    }
}
