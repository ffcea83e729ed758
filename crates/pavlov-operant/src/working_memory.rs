//! Fixed-depth, age-indexed buffer of sensory and action predicates.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use pavlov_core::errors::{OperantError, PavlovResult};
use pavlov_core::models::{Predicate, VariableKind};

/// What was sensed and done at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySlot {
    pub sensory: BTreeSet<Predicate>,
    pub actions: BTreeSet<Predicate>,
}

impl MemorySlot {
    pub fn contains(&self, predicate: &Predicate, kind: VariableKind) -> bool {
        match kind {
            VariableKind::Action => self.actions.contains(predicate),
            VariableKind::Sensory => self.sensory.contains(predicate),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sensory.is_empty() && self.actions.is_empty()
    }
}

/// Slots for ages `0..=max_age`; age 0 is the current instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingMemory {
    slots: VecDeque<MemorySlot>,
    max_age: usize,
}

impl WorkingMemory {
    pub fn new(max_age: usize) -> Self {
        Self {
            slots: (0..=max_age).map(|_| MemorySlot::default()).collect(),
            max_age,
        }
    }

    pub fn max_age(&self) -> usize {
        self.max_age
    }

    /// Shift every slot one age older, evict the slot past `max_age` and open a
    /// fresh age-0 slot.
    pub fn age(&mut self) {
        self.slots.push_front(MemorySlot::default());
        self.slots.truncate(self.max_age + 1);
    }

    pub fn add_sensory(&mut self, predicate: Predicate) {
        self.now_mut().sensory.insert(predicate);
    }

    pub fn add_action(&mut self, predicate: Predicate) {
        self.now_mut().actions.insert(predicate);
    }

    pub fn slot(&self, age: usize) -> PavlovResult<&MemorySlot> {
        self.slots.get(age).ok_or_else(|| {
            OperantError::AgeOutOfRange {
                age,
                max_age: self.max_age,
            }
            .into()
        })
    }

    /// Whether `predicate` of `kind` was recorded at `age`. Ages past `max_age`
    /// hold nothing.
    pub fn holds(&self, predicate: &Predicate, kind: VariableKind, age: usize) -> bool {
        self.slots
            .get(age)
            .is_some_and(|slot| slot.contains(predicate, kind))
    }

    pub fn slots(&self) -> impl Iterator<Item = &MemorySlot> {
        self.slots.iter()
    }

    fn now_mut(&mut self) -> &mut MemorySlot {
        if self.slots.is_empty() {
            self.slots.push_front(MemorySlot::default());
        }
        &mut self.slots[0]
    }
}
