//! The learner seam: one trait, one implementation per learning algorithm.

use rand::RngCore;

use pavlov_causal::{CausalController, ObservationHistory};
use pavlov_core::config::{LearnerKind, PavlovConfig};
use pavlov_core::errors::PavlovResult;
use pavlov_core::models::Predicate;
use pavlov_core::traits::IEventSink;
use pavlov_operant::{Decision, OperantEngine, WorkingMemory};

/// Read-only state a learner sees when choosing this step's actions.
///
/// `memory` has been aged and holds this step's sensed predicates at age 0;
/// `history` holds the committed entries plus the in-progress one.
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a> {
    pub time: u64,
    pub memory: &'a WorkingMemory,
    pub history: &'a ObservationHistory,
}

/// A learning algorithm that turns the agent's state into actions.
pub trait ILearner {
    fn kind(&self) -> LearnerKind;

    /// Learn from `view` and return the actions to apply this step.
    fn decide(
        &mut self,
        view: StepView<'_>,
        rng: &mut dyn RngCore,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<Vec<Predicate>>;

    fn as_operant(&self) -> Option<&OperantLearner> {
        None
    }

    fn as_causal(&self) -> Option<&CausalLearner> {
        None
    }
}

/// Build the learner named by `config.agent.learner`. Goals become primary
/// reinforcers (operant) or the prioritised aims (causal).
pub fn build_learner(config: &PavlovConfig, goals: Vec<Predicate>) -> Box<dyn ILearner> {
    match config.agent.learner {
        LearnerKind::Operant => Box::new(OperantLearner::new(OperantEngine::with_primaries(
            config.operant.clone(),
            goals,
        ))),
        LearnerKind::Causal => Box::new(CausalLearner::new(CausalController::new(
            config.causal.clone(),
            goals,
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct OperantLearner {
    engine: OperantEngine,
    last_decision: Option<Decision>,
}

impl OperantLearner {
    pub fn new(engine: OperantEngine) -> Self {
        Self {
            engine,
            last_decision: None,
        }
    }

    pub fn engine(&self) -> &OperantEngine {
        &self.engine
    }

    /// The most recent decision, with its source and estimated probability.
    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }
}

impl ILearner for OperantLearner {
    fn kind(&self) -> LearnerKind {
        LearnerKind::Operant
    }

    fn decide(
        &mut self,
        view: StepView<'_>,
        rng: &mut dyn RngCore,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<Vec<Predicate>> {
        let legal = view.history.schema().legal_actions();
        let decision = self.engine.step(view.memory, &legal, view.time, rng, sink)?;
        let actions = decision.actions.clone();
        self.last_decision = Some(decision);
        Ok(actions)
    }

    fn as_operant(&self) -> Option<&OperantLearner> {
        Some(self)
    }
}

#[derive(Debug, Clone)]
pub struct CausalLearner {
    controller: CausalController,
}

impl CausalLearner {
    pub fn new(controller: CausalController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &CausalController {
        &self.controller
    }
}

impl ILearner for CausalLearner {
    fn kind(&self) -> LearnerKind {
        LearnerKind::Causal
    }

    fn decide(
        &mut self,
        view: StepView<'_>,
        rng: &mut dyn RngCore,
        sink: &mut dyn IEventSink,
    ) -> PavlovResult<Vec<Predicate>> {
        self.controller.step(view.history, view.time, rng, sink)
    }

    fn as_causal(&self) -> Option<&CausalLearner> {
        Some(self)
    }
}
