//! Conjunctions of time-tagged predicates.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use pavlov_core::models::{Predicate, VariableKind};

use crate::temporal::TemporalTag;
use crate::working_memory::WorkingMemory;

/// One time-tagged predicate of a conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term {
    pub predicate: Predicate,
    pub kind: VariableKind,
    pub tag: TemporalTag,
}

impl Term {
    pub fn new(predicate: Predicate, kind: VariableKind, tag: TemporalTag) -> Self {
        Self {
            predicate,
            kind,
            tag,
        }
    }

    pub fn action(predicate: Predicate, tag: TemporalTag) -> Self {
        Self::new(predicate, VariableKind::Action, tag)
    }

    pub fn sensory(predicate: Predicate, tag: TemporalTag) -> Self {
        Self::new(predicate, VariableKind::Sensory, tag)
    }

    pub fn is_action(&self) -> bool {
        self.kind == VariableKind::Action
    }

    /// Whether the term holds in `memory` evaluated at `instant`. With
    /// `choosable_actions`, action terms tagged `Now` always hold: the agent can
    /// still perform them.
    pub fn holds(&self, memory: &WorkingMemory, instant: usize, choosable_actions: bool) -> bool {
        if choosable_actions && self.is_action() && self.tag == TemporalTag::Now {
            return true;
        }
        self.tag
            .age_at(instant)
            .is_some_and(|age| memory.holds(&self.predicate, self.kind, age))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.predicate, self.tag)
    }
}

/// An unordered set of terms. The empty set is the null conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Conjunction {
    terms: BTreeSet<Term>,
}

impl Conjunction {
    pub fn null() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    /// This conjunction plus `term`; `None` when the term is already present.
    pub fn extended(&self, term: &Term) -> Option<Self> {
        if self.terms.contains(term) {
            return None;
        }
        let mut terms = self.terms.clone();
        terms.insert(term.clone());
        Some(Self { terms })
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_null(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_strict_subset_of(&self, other: &Conjunction) -> bool {
        self.terms.len() < other.terms.len() && self.terms.is_subset(&other.terms)
    }

    pub fn has_action(&self) -> bool {
        self.terms.iter().any(Term::is_action)
    }

    /// Action predicates the agent could perform now.
    pub fn actions_now(&self) -> impl Iterator<Item = &Predicate> {
        self.terms
            .iter()
            .filter(|t| t.is_action() && t.tag == TemporalTag::Now)
            .map(|t| &t.predicate)
    }

    /// Sensory predicates mentioned, whatever their tag.
    pub fn sensory_predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.terms
            .iter()
            .filter(|t| !t.is_action())
            .map(|t| &t.predicate)
    }

    /// Whether every term holds at `instant`. The null conjunction always holds.
    pub fn matches(&self, memory: &WorkingMemory, instant: usize, choosable_actions: bool) -> bool {
        self.terms
            .iter()
            .all(|t| t.holds(memory, instant, choosable_actions))
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{term}")?;
        }
        f.write_str("}")
    }
}
