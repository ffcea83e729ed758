//! The causal controller: explore, build a network, act toward an aim, verify.
//!
//! ```text
//! Explore ──(explore_steps entries)──▶ BuildNetwork ──▶ ActTowardAim ──▶ VerifyAim
//!    ▲                                     ▲                 │    ▲           │
//!    └──────(no usable cause)──────────────┼─────────────────┘    └───────────┘
//!                                          └──(rebuild_interval entries)
//! ```
//!
//! Verification only ever touches the single edge that was acted upon.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pavlov_core::config::CausalConfig;
use pavlov_core::errors::PavlovResult;
use pavlov_core::models::{Assignment, Event, EventKind, Predicate};
use pavlov_core::traits::IEventSink;

use crate::graph::would_create_cycle;
use crate::history::ObservationHistory;
use crate::lagged::{base_name, current, previous, tier_of};
use crate::pc::{PcLearner, PcOutcome};
use crate::probability::ProbabilityTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerPhase {
    Explore,
    BuildNetwork,
    ActTowardAim,
    VerifyAim,
}

/// The action taken because the network claimed it causes the aim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeUnderTest {
    pub action: Predicate,
    pub aim: Predicate,
    /// P(aim@t | action@t-1) estimated when the action was chosen.
    pub probability: f64,
}

impl EdgeUnderTest {
    pub fn cause(&self) -> String {
        previous(&self.action.name)
    }

    pub fn effect(&self) -> String {
        current(&self.aim.name)
    }
}

/// Drives actions toward a prioritised list of aims using a learned causal network.
#[derive(Debug, Clone)]
pub struct CausalController {
    config: CausalConfig,
    learner: PcLearner,
    aims: Vec<Predicate>,
    phase: ControllerPhase,
    /// History length when the current explore or act epoch began.
    epoch_start: usize,
    network: Option<PcOutcome>,
    table: Option<ProbabilityTable>,
    pending: Option<EdgeUnderTest>,
}

impl CausalController {
    pub fn new(config: CausalConfig, aims: Vec<Predicate>) -> Self {
        Self {
            learner: PcLearner::new(config.clone()),
            config,
            aims,
            phase: ControllerPhase::Explore,
            epoch_start: 0,
            network: None,
            table: None,
            pending: None,
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn aims(&self) -> &[Predicate] {
        &self.aims
    }

    /// The most recent network, including verification edits.
    pub fn network(&self) -> Option<&PcOutcome> {
        self.network.as_ref()
    }

    pub fn pending(&self) -> Option<&EdgeUnderTest> {
        self.pending.as_ref()
    }

    /// Choose this step's actions. `history` holds the committed entries plus the
    /// in-progress entry with this step's sensed values.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        history: &ObservationHistory,
        time: u64,
        rng: &mut R,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<Vec<Predicate>> {
        if self.phase == ControllerPhase::VerifyAim {
            if let Some(edge) = self.pending.take() {
                self.verify(&edge, history, time, sink)?;
            }
            self.phase = ControllerPhase::ActTowardAim;
        }

        let elapsed = history.len().saturating_sub(self.epoch_start);
        match self.phase {
            ControllerPhase::Explore if elapsed >= self.config.explore_steps => {
                self.phase = ControllerPhase::BuildNetwork;
            }
            ControllerPhase::Explore => {
                return Ok(self.random_action(history, time, rng, sink));
            }
            ControllerPhase::ActTowardAim if elapsed >= self.config.rebuild_interval => {
                self.phase = ControllerPhase::BuildNetwork;
            }
            _ => {}
        }

        if self.phase == ControllerPhase::BuildNetwork {
            self.build(history, time, sink)?;
            self.phase = ControllerPhase::ActTowardAim;
        }

        self.act_toward_aim(history, time, rng, sink)
    }

    /// Rebuild the network from the lagged table of `history`.
    pub fn build(
        &mut self,
        history: &ObservationHistory,
        time: u64,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<&PcOutcome> {
        let table = history.lagged_table(self.config.dense_tables)?;
        let outcome = self.learner.learn(&table)?;

        sink.log_event(
            Event::new(time, EventKind::GraphRebuilt)
                .with("entries", history.len())
                .with("nodes", outcome.graph.node_count())
                .with("edges", outcome.graph.edge_count())
                .with("oriented", outcome.graph.oriented_edges().len())
                .with("acyclic", outcome.acyclic),
        );
        if !outcome.acyclic {
            warn!(time, cycles = ?outcome.cycles, "causal network is cyclic");
            sink.log_event(
                Event::new(time, EventKind::CycleDetected)
                    .with("cycles", format!("{:?}", outcome.cycles)),
            );
        }

        self.epoch_start = history.len();
        self.table = Some(table);
        let network: &PcOutcome = self.network.insert(outcome);
        Ok(network)
    }

    /// First aim not satisfied by the in-progress entry.
    pub fn unsatisfied_aim(&self, history: &ObservationHistory) -> PavlovResult<Option<&Predicate>> {
        for aim in &self.aims {
            if history.current_value(&aim.name)? != aim.value {
                return Ok(Some(aim));
            }
        }
        Ok(None)
    }

    /// The (action, P(aim | action)) pair maximising the probability among action
    /// variables with an oriented edge into the aim. Ties keep the first found.
    pub fn maximizing_action(
        &self,
        history: &ObservationHistory,
        aim: &Predicate,
    ) -> PavlovResult<Option<(Predicate, f64)>> {
        let (Some(network), Some(table)) = (self.network.as_ref(), self.table.as_ref()) else {
            return Ok(None);
        };
        let effect = current(&aim.name);
        if !network.graph.contains_node(&effect) {
            return Ok(None);
        }

        let event: Assignment = [(effect.clone(), aim.value.clone())].into();
        let mut best: Option<(Predicate, f64)> = None;
        for parent in network.graph.parents(&effect)? {
            if tier_of(&parent) != Some(0) {
                continue;
            }
            let variable = history.schema().get(base_name(&parent))?;
            if !variable.is_action() {
                continue;
            }
            for value in variable.domain.iter().filter(|v| **v != variable.default) {
                let given: Assignment = [(parent.clone(), value.clone())].into();
                let p = table.conditional_prob(&event, &given)?;
                debug!(action = %variable.name, %value, p, "candidate cause");
                if best.as_ref().map_or(true, |(_, b)| p > *b) {
                    best = Some((Predicate::new(variable.name.clone(), value.clone()), p));
                }
            }
        }
        Ok(best)
    }

    fn act_toward_aim<R: Rng + ?Sized>(
        &mut self,
        history: &ObservationHistory,
        time: u64,
        rng: &mut R,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<Vec<Predicate>> {
        let Some(aim) = self.unsatisfied_aim(history)?.cloned() else {
            return Ok(Vec::new());
        };
        match self.maximizing_action(history, &aim)? {
            Some((action, p)) if p > 0.0 => {
                sink.log_event(
                    Event::new(time, EventKind::ActionChosen)
                        .with("action", &action)
                        .with("aim", &aim)
                        .with("probability", p)
                        .with("source", "network"),
                );
                info!(time, %action, %aim, p, "acting toward aim");
                self.pending = Some(EdgeUnderTest {
                    action: action.clone(),
                    aim,
                    probability: p,
                });
                self.phase = ControllerPhase::VerifyAim;
                Ok(vec![action])
            }
            _ => {
                debug!(time, %aim, "no usable cause, exploring");
                self.phase = ControllerPhase::Explore;
                self.epoch_start = history.len();
                Ok(self.random_action(history, time, rng, sink))
            }
        }
    }

    /// Confirm or refute the single edge under test.
    fn verify(
        &mut self,
        edge: &EdgeUnderTest,
        history: &ObservationHistory,
        time: u64,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<()> {
        let Some(network) = self.network.as_mut() else {
            return Ok(());
        };
        let achieved = history.current_value(&edge.aim.name)? == edge.aim.value;
        let (cause, effect) = (edge.cause(), edge.effect());
        let graph = &mut network.graph;

        let outcome = if achieved {
            graph.add_edge(&cause, &effect)?;
            if would_create_cycle(graph, &cause, &effect)? {
                warn!(time, %cause, %effect, "confirmed edge would close a cycle, left as is");
                "confirmed_cyclic"
            } else {
                graph.orient(&cause, &effect)?;
                "confirmed"
            }
        } else {
            graph.delete_edge(&cause, &effect)?;
            "refuted"
        };
        debug!(time, %cause, %effect, outcome, "edge verified");

        sink.log_event(
            Event::new(time, EventKind::EdgeVerified)
                .with("from", &cause)
                .with("to", &effect)
                .with("achieved", achieved)
                .with("outcome", outcome),
        );
        Ok(())
    }

    fn random_action<R: Rng + ?Sized>(
        &self,
        history: &ObservationHistory,
        time: u64,
        rng: &mut R,
        sink: &mut dyn IEventSink,
    ) -> Vec<Predicate> {
        let legal = history.schema().legal_actions();
        let Some(action) = legal.choose(rng).cloned() else {
            return Vec::new();
        };
        sink.log_event(
            Event::new(time, EventKind::ActionChosen)
                .with("action", &action)
                .with("source", "random"),
        );
        vec![action]
    }
}
