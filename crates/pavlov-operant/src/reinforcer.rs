//! A rewarding predicate, its conjunction statistics, and its predictors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pavlov_core::config::OperantConfig;
use pavlov_core::constants::MERIT_TIE_EPSILON;
use pavlov_core::models::{Predicate, VariableKind};

use crate::conjunction::{Conjunction, Term};
use crate::scoring;
use crate::working_memory::WorkingMemory;

/// Instant (memory age) at which conjunctions are tested against the reward at age 0.
pub const EVALUATION_INSTANT: usize = 1;

/// Satisfied-count `n` and followed-count `r` of one conjunction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjunctionStats {
    pub satisfied: u64,
    pub followed: u64,
}

impl ConjunctionStats {
    pub fn merit(&self) -> f64 {
        scoring::merit(self.followed, self.satisfied)
    }

    pub fn demerit(&self) -> f64 {
        scoring::demerit(self.followed, self.satisfied)
    }

    /// Raw followed/satisfied ratio, 0 before the first trial.
    pub fn rate(&self) -> f64 {
        if self.satisfied == 0 {
            0.0
        } else {
            self.followed as f64 / self.satisfied as f64
        }
    }
}

/// Why a predictor was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionRule {
    /// Fired without reward and its demerit fell below the threshold.
    FalseAlarm,
    /// Fired correctly but a sibling predictor's merit beats its demerit.
    Outperformed,
    /// A strict subset predictor performs as well.
    Subsumed,
}

impl DeletionRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FalseAlarm => "false_alarm",
            Self::Outperformed => "outperformed",
            Self::Subsumed => "subsumed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reinforcer {
    predicate: Predicate,
    primary: bool,
    conjunctions: BTreeMap<Conjunction, ConjunctionStats>,
    predictors: Vec<Conjunction>,
}

impl Reinforcer {
    /// A reinforcer tracking only the null conjunction.
    pub fn new(predicate: Predicate, primary: bool) -> Self {
        let mut conjunctions = BTreeMap::new();
        conjunctions.insert(Conjunction::null(), ConjunctionStats::default());
        Self {
            predicate,
            primary,
            conjunctions,
            predictors: Vec::new(),
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn conjunctions(&self) -> &BTreeMap<Conjunction, ConjunctionStats> {
        &self.conjunctions
    }

    pub fn predictors(&self) -> &[Conjunction] {
        &self.predictors
    }

    pub fn has_predictor(&self, conjunction: &Conjunction) -> bool {
        self.predictors.contains(conjunction)
    }

    /// Statistics of `conjunction`; zero counts when it is not tracked.
    pub fn stats(&self, conjunction: &Conjunction) -> ConjunctionStats {
        self.conjunctions
            .get(conjunction)
            .copied()
            .unwrap_or_default()
    }

    pub fn merit_of(&self, conjunction: &Conjunction) -> f64 {
        self.stats(conjunction).merit()
    }

    pub fn demerit_of(&self, conjunction: &Conjunction) -> f64 {
        self.stats(conjunction).demerit()
    }

    /// Whether the reinforcing predicate was sensed at `age`.
    pub fn is_reinforced(&self, memory: &WorkingMemory, age: usize) -> bool {
        memory.holds(&self.predicate, VariableKind::Sensory, age)
    }

    /// Conjunctions whose reward rate or reward count is at least one standard
    /// deviation above the mean over every tracked conjunction.
    pub fn best_conjunctions(&self) -> Vec<&Conjunction> {
        let rates: Vec<f64> = self.conjunctions.values().map(ConjunctionStats::rate).collect();
        let counts: Vec<f64> = self
            .conjunctions
            .values()
            .map(|s| s.followed as f64)
            .collect();
        let rate_bar = one_sigma_above(&rates);
        let count_bar = one_sigma_above(&counts);
        self.conjunctions
            .iter()
            .filter(|(_, s)| {
                s.rate() >= rate_bar - MERIT_TIE_EPSILON
                    || s.followed as f64 >= count_bar - MERIT_TIE_EPSILON
            })
            .map(|(c, _)| c)
            .collect()
    }

    /// Extend every best conjunction that held at the evaluation instant by each
    /// candidate term. Returns the newly tracked conjunctions.
    pub fn generate(
        &mut self,
        memory: &WorkingMemory,
        candidates: &[Term],
        config: &OperantConfig,
    ) -> Vec<Conjunction> {
        let bases: Vec<Conjunction> = self
            .best_conjunctions()
            .into_iter()
            .filter(|c| c.len() < config.max_conjunction_terms)
            .filter(|c| c.matches(memory, EVALUATION_INSTANT, false))
            .cloned()
            .collect();

        let mut added = Vec::new();
        for base in &bases {
            for term in candidates {
                if self.conjunctions.len() >= config.max_conjunctions {
                    return added;
                }
                let Some(extended) = base.extended(term) else {
                    continue;
                };
                if !self.conjunctions.contains_key(&extended) {
                    self.conjunctions
                        .insert(extended.clone(), ConjunctionStats::default());
                    added.push(extended);
                }
            }
        }
        added
    }

    /// Count every conjunction that held at the evaluation instant, and whether
    /// the reward followed at age 0. Returns whether the reward is present.
    pub fn update_counts(&mut self, memory: &WorkingMemory) -> bool {
        let reinforced = self.is_reinforced(memory, 0);
        for (conjunction, stats) in self.conjunctions.iter_mut() {
            if conjunction.matches(memory, EVALUATION_INSTANT, false) {
                stats.satisfied += 1;
                if reinforced {
                    stats.followed += 1;
                }
            }
        }
        reinforced
    }

    /// Predictors that held at the evaluation instant.
    pub fn fired_predictors(&self, memory: &WorkingMemory) -> Vec<Conjunction> {
        self.predictors
            .iter()
            .filter(|p| p.matches(memory, EVALUATION_INSTANT, false))
            .cloned()
            .collect()
    }

    /// Best untracked-as-predictor conjunctions by merit, then by fewest terms.
    /// After an unexpected reward only conjunctions that held at the evaluation
    /// instant qualify. At most two are returned; a wider tie keeps the first.
    pub fn predictor_candidates(&self, memory: &WorkingMemory, unexpected_reward: bool) -> Vec<Conjunction> {
        let mut candidates: Vec<(&Conjunction, f64)> = self
            .conjunctions
            .iter()
            .filter(|(c, s)| !c.is_null() && s.followed > 0 && !self.has_predictor(c))
            .filter(|(c, _)| !unexpected_reward || c.matches(memory, EVALUATION_INSTANT, false))
            .map(|(c, s)| (c, s.merit()))
            .collect();

        let Some(best) = candidates.iter().map(|(_, m)| *m).reduce(f64::max) else {
            return Vec::new();
        };
        candidates.retain(|(_, m)| best - m <= MERIT_TIE_EPSILON);
        let shortest = candidates.iter().map(|(c, _)| c.len()).min().unwrap_or(0);
        candidates.retain(|(c, _)| c.len() == shortest);
        if candidates.len() > 2 {
            candidates.truncate(1);
        }
        candidates.into_iter().map(|(c, _)| c.clone()).collect()
    }

    /// Promote `conjunction` to a predictor. No-op when it already is one.
    pub fn add_predictor(&mut self, conjunction: Conjunction) -> bool {
        if self.has_predictor(&conjunction) {
            return false;
        }
        self.conjunctions.entry(conjunction.clone()).or_default();
        self.predictors.push(conjunction);
        true
    }

    /// Apply the deletion rules to the predictors in `fired`, in order: false
    /// alarm, outperformed, subsumed.
    pub fn prune_predictors(
        &mut self,
        fired: &[Conjunction],
        reinforced: bool,
        config: &OperantConfig,
    ) -> Vec<(Conjunction, DeletionRule)> {
        let mut removed = Vec::new();

        for predictor in fired {
            if !self.has_predictor(predictor) {
                continue;
            }
            let rule = if reinforced {
                let best_other = self
                    .predictors
                    .iter()
                    .filter(|p| *p != predictor)
                    .map(|p| self.merit_of(p))
                    .reduce(f64::max);
                best_other
                    .is_some_and(|best| self.demerit_of(predictor) < best)
                    .then_some(DeletionRule::Outperformed)
            } else {
                (self.demerit_of(predictor) < config.demerit_threshold)
                    .then_some(DeletionRule::FalseAlarm)
            };
            if let Some(rule) = rule {
                self.remove_predictor(predictor);
                removed.push((predictor.clone(), rule));
            }
        }

        for predictor in fired {
            if !self.has_predictor(predictor) {
                continue;
            }
            let stats = self.stats(predictor);
            let subsumed = self.predictors.iter().any(|other| {
                let other_stats = self.stats(other);
                other.is_strict_subset_of(predictor)
                    && (stats.merit() - other_stats.merit()).abs() <= config.subsumption_tolerance
                    && stats.satisfied >= config.subsumption_min_trials
                    && other_stats.satisfied >= config.subsumption_min_trials
            });
            if subsumed {
                self.remove_predictor(predictor);
                removed.push((predictor.clone(), DeletionRule::Subsumed));
            }
        }

        removed
    }

    /// Sensory predicates mentioned by any predictor.
    pub fn predicted_percepts(&self) -> Vec<Predicate> {
        let mut percepts: Vec<Predicate> = self
            .predictors
            .iter()
            .flat_map(Conjunction::sensory_predicates)
            .cloned()
            .collect();
        percepts.sort();
        percepts.dedup();
        percepts
    }

    fn remove_predictor(&mut self, predictor: &Conjunction) {
        self.predictors.retain(|p| p != predictor);
    }
}

/// mean + population standard deviation; 0 for an empty slice.
fn one_sigma_above(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    mean + variance.sqrt()
}
