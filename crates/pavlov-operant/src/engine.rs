//! OperantEngine: runs the per-step reinforcer/predictor cycle and picks actions.
//!
//! The caller ages working memory and folds in the sensed predicates first; one
//! `step` then performs, in order: secondary reinforcer acquisition, conjunction
//! generation, count update, predictor creation, predictor deletion and action
//! selection. Memory is only read.

use std::collections::BTreeMap;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pavlov_core::config::OperantConfig;
use pavlov_core::errors::{OperantError, PavlovResult};
use pavlov_core::models::{Event, EventKind, Predicate};
use pavlov_core::traits::IEventSink;

use crate::conjunction::Term;
use crate::reinforcer::{Reinforcer, EVALUATION_INSTANT};
use crate::temporal::TemporalTag;
use crate::working_memory::WorkingMemory;

/// Where the chosen action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Drawn from the action terms of matching predictors.
    Predictor,
    /// No predictor matched; a random legal action.
    Random,
    /// Nothing to choose from.
    Idle,
}

impl DecisionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Predictor => "predictor",
            Self::Random => "random",
            Self::Idle => "idle",
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub actions: Vec<Predicate>,
    pub source: DecisionSource,
    /// Highest merit among matching predictors proposing the chosen action.
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct OperantEngine {
    config: OperantConfig,
    reinforcers: Vec<Reinforcer>,
}

impl OperantEngine {
    pub fn new(config: OperantConfig) -> Self {
        Self {
            config,
            reinforcers: Vec::new(),
        }
    }

    /// An engine with `primaries` registered as primary reinforcers.
    pub fn with_primaries(config: OperantConfig, primaries: impl IntoIterator<Item = Predicate>) -> Self {
        let mut engine = Self::new(config);
        for predicate in primaries {
            engine.add_reinforcer(predicate, true);
        }
        engine
    }

    pub fn config(&self) -> &OperantConfig {
        &self.config
    }

    /// Register a reinforcer. Returns false if one already exists for `predicate`.
    pub fn add_reinforcer(&mut self, predicate: Predicate, primary: bool) -> bool {
        if self.is_reinforcer(&predicate) {
            return false;
        }
        self.reinforcers.push(Reinforcer::new(predicate, primary));
        true
    }

    pub fn is_reinforcer(&self, predicate: &Predicate) -> bool {
        self.reinforcers.iter().any(|r| r.predicate() == predicate)
    }

    pub fn reinforcer(&self, predicate: &Predicate) -> PavlovResult<&Reinforcer> {
        self.reinforcers
            .iter()
            .find(|r| r.predicate() == predicate)
            .ok_or_else(|| {
                OperantError::NoReinforcerFound {
                    predicate: predicate.to_string(),
                }
                .into()
            })
    }

    pub fn reinforcers(&self) -> &[Reinforcer] {
        &self.reinforcers
    }

    /// Run one cycle over `memory` and choose among `legal_actions`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        memory: &WorkingMemory,
        legal_actions: &[Predicate],
        time: u64,
        rng: &mut R,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<Decision> {
        self.acquire_reinforcers(time, sink);
        for index in 0..self.reinforcers.len() {
            self.learn(index, memory, time, sink)?;
        }
        Ok(self.select_action(memory, legal_actions, time, rng, sink))
    }

    /// Every sensory predicate named by a predictor becomes a secondary reinforcer.
    fn acquire_reinforcers(&mut self, time: u64, sink: &mut dyn IEventSink) {
        let percepts: Vec<(Predicate, Predicate)> = self
            .reinforcers
            .iter()
            .flat_map(|r| {
                r.predicted_percepts()
                    .into_iter()
                    .map(move |p| (p, r.predicate().clone()))
            })
            .collect();
        for (percept, source) in percepts {
            if self.add_reinforcer(percept.clone(), false) {
                info!(time, reinforcer = %percept, %source, "secondary reinforcer acquired");
                sink.log_event(
                    Event::new(time, EventKind::ReinforcerAcquired)
                        .with("reinforcer", &percept)
                        .with("source", &source),
                );
            }
        }
    }

    /// Generation, counting, creation and deletion for one reinforcer.
    fn learn(
        &mut self,
        index: usize,
        memory: &WorkingMemory,
        time: u64,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<()> {
        let candidates = self.candidate_terms(memory, self.reinforcers[index].predicate())?;
        let config = self.config.clone();
        let reinforcer = &mut self.reinforcers[index];

        let added = reinforcer.generate(memory, &candidates, &config);
        if !added.is_empty() {
            debug!(
                time,
                reinforcer = %reinforcer.predicate(),
                added = added.len(),
                tracked = reinforcer.conjunctions().len(),
                "conjunctions generated"
            );
        }

        let reinforced = reinforcer.update_counts(memory);
        let fired = reinforcer.fired_predictors(memory);

        let unexpected_reward = reinforced && fired.is_empty();
        let false_alarm = !reinforced && !fired.is_empty();
        if unexpected_reward || false_alarm {
            let reason = if unexpected_reward {
                "unexpected_reward"
            } else {
                "false_alarm"
            };
            for conjunction in reinforcer.predictor_candidates(memory, unexpected_reward) {
                let merit = reinforcer.merit_of(&conjunction);
                info!(
                    time,
                    reinforcer = %reinforcer.predicate(),
                    predictor = %conjunction,
                    merit,
                    reason,
                    "predictor created"
                );
                sink.log_event(
                    Event::new(time, EventKind::PredictorCreated)
                        .with("reinforcer", reinforcer.predicate())
                        .with("predictor", &conjunction)
                        .with("merit", merit)
                        .with("reason", reason),
                );
                reinforcer.add_predictor(conjunction);
            }
        }

        for (conjunction, rule) in reinforcer.prune_predictors(&fired, reinforced, &config) {
            let demerit = reinforcer.demerit_of(&conjunction);
            info!(
                time,
                reinforcer = %reinforcer.predicate(),
                predictor = %conjunction,
                rule = rule.as_str(),
                demerit,
                "predictor deleted"
            );
            sink.log_event(
                Event::new(time, EventKind::PredictorDeleted)
                    .with("reinforcer", reinforcer.predicate())
                    .with("predictor", &conjunction)
                    .with("rule", rule.as_str())
                    .with("demerit", demerit),
            );
        }
        Ok(())
    }

    /// Terms for extending conjunctions, tagged relative to the evaluation
    /// instant: age 1 is `Now`, age 2 is `Previous` and, when enabled, age 0
    /// sensory predicates other than the reward itself are `Future`.
    fn candidate_terms(&self, memory: &WorkingMemory, reward: &Predicate) -> PavlovResult<Vec<Term>> {
        let mut terms = Vec::new();
        for (age, tag) in [
            (EVALUATION_INSTANT, TemporalTag::Now),
            (EVALUATION_INSTANT + 1, TemporalTag::Previous),
        ] {
            let slot = memory.slot(age)?;
            terms.extend(slot.sensory.iter().map(|p| Term::sensory(p.clone(), tag)));
            terms.extend(slot.actions.iter().map(|p| Term::action(p.clone(), tag)));
        }
        if self.config.future_terms {
            let slot = memory.slot(EVALUATION_INSTANT - 1)?;
            terms.extend(
                slot.sensory
                    .iter()
                    .filter(|p| *p != reward)
                    .map(|p| Term::sensory(p.clone(), TemporalTag::Future)),
            );
        }
        Ok(terms)
    }

    /// Pick uniformly among the `Now` action terms of predictors matching at age 0
    /// (those actions count as satisfiable); fall back to a random legal action.
    fn select_action<R: Rng + ?Sized>(
        &self,
        memory: &WorkingMemory,
        legal_actions: &[Predicate],
        time: u64,
        rng: &mut R,
        sink: &mut dyn IEventSink,
    ) -> Decision {
        // Distinct proposed actions with the highest merit backing each.
        let mut proposals: BTreeMap<&Predicate, f64> = BTreeMap::new();
        for reinforcer in &self.reinforcers {
            for predictor in reinforcer.predictors() {
                if !predictor.has_action() || !predictor.matches(memory, 0, true) {
                    continue;
                }
                let merit = reinforcer.merit_of(predictor);
                for action in predictor.actions_now().filter(|a| legal_actions.contains(a)) {
                    let best = proposals.entry(action).or_insert(merit);
                    *best = best.max(merit);
                }
            }
        }

        let actions: Vec<&Predicate> = proposals.keys().copied().collect();
        let decision = match actions.choose(rng) {
            Some(action) => Decision {
                actions: vec![(*action).clone()],
                source: DecisionSource::Predictor,
                probability: proposals.get(action).copied(),
            },
            None => match legal_actions.choose(rng) {
                Some(action) => Decision {
                    actions: vec![action.clone()],
                    source: DecisionSource::Random,
                    probability: None,
                },
                None => Decision {
                    actions: Vec::new(),
                    source: DecisionSource::Idle,
                    probability: None,
                },
            },
        };

        for action in &decision.actions {
            let mut event = Event::new(time, EventKind::ActionChosen)
                .with("action", action)
                .with("source", decision.source.as_str());
            if let Some(p) = decision.probability {
                event = event.with("probability", p);
            }
            debug!(time, %action, source = decision.source.as_str(), "action chosen");
            sink.log_event(event);
        }
        decision
    }
}
