//! The agent: the single owner of schema, history, working memory and RNG.
//!
//! A timestep is any number of [`Agent::sense`] calls followed by exactly one
//! [`Agent::act`]. Sensed values are buffered and folded in at the start of `act`,
//! so everything sensed after an `act` belongs to the next timestep.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use pavlov_causal::ObservationHistory;
use pavlov_core::config::PavlovConfig;
use pavlov_core::errors::{PavlovError, PavlovResult};
use pavlov_core::models::{Predicate, Schema, Variable, VariableKind};
use pavlov_core::traits::{IEventSink, NullSink};
use pavlov_observability::step_span;
use pavlov_operant::WorkingMemory;

use crate::learner::{build_learner, ILearner, StepView};

pub struct Agent<S: IEventSink = NullSink> {
    config: PavlovConfig,
    history: ObservationHistory,
    memory: WorkingMemory,
    learner: Box<dyn ILearner>,
    rng: StdRng,
    sink: S,
    goals: Vec<Predicate>,
    /// Values sensed since the last `act`. Later senses of a variable win.
    sensed: BTreeMap<String, String>,
    time: u64,
}

impl Agent<NullSink> {
    /// Set up an agent that discards its events.
    pub fn init(
        actions: Vec<Variable>,
        sensors: Vec<Variable>,
        goals: Vec<Predicate>,
        config: PavlovConfig,
    ) -> PavlovResult<Self> {
        Self::with_sink(actions, sensors, goals, config, NullSink)
    }
}

impl<S: IEventSink> Agent<S> {
    /// Set up an agent reporting to `sink`. Every goal must name a sensory
    /// variable and a value in its domain.
    pub fn with_sink(
        actions: Vec<Variable>,
        sensors: Vec<Variable>,
        goals: Vec<Predicate>,
        config: PavlovConfig,
        sink: S,
    ) -> PavlovResult<Self> {
        config.validate()?;
        let schema = Schema::new(actions, sensors)?;
        for goal in &goals {
            if schema.validate(&goal.name, &goal.value)?.is_action() {
                return Err(PavlovError::invalid_configuration(format!(
                    "goal {goal} names an action variable"
                )));
            }
        }

        let rng = match config.agent.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        debug!(
            learner = config.agent.learner.as_str(),
            variables = schema.len(),
            goals = goals.len(),
            seed = ?config.agent.seed,
            "agent initialised"
        );

        Ok(Self {
            learner: build_learner(&config, goals.clone()),
            memory: WorkingMemory::new(config.operant.memory_depth),
            history: ObservationHistory::new(schema),
            config,
            rng,
            sink,
            goals,
            sensed: BTreeMap::new(),
            time: 0,
        })
    }

    /// Buffer an observation for the current timestep.
    pub fn sense(&mut self, name: &str, value: &str) -> PavlovResult<()> {
        self.history.schema().validate(name, value)?;
        self.sensed.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Run one timestep and return the actions to apply.
    pub fn act(&mut self) -> PavlovResult<Vec<Predicate>> {
        let span = step_span!(self.time, self.learner.kind().as_str());
        let _guard = span.enter();

        self.memory.age();
        self.history.open_entry();
        for (name, value) in std::mem::take(&mut self.sensed) {
            let kind = self.history.schema().get(&name)?.kind;
            self.history.observe(&name, &value)?;
            let predicate = Predicate::new(name, value);
            match kind {
                VariableKind::Sensory => self.memory.add_sensory(predicate),
                VariableKind::Action => self.memory.add_action(predicate),
            }
        }

        let view = StepView {
            time: self.time,
            memory: &self.memory,
            history: &self.history,
        };
        let actions = self.learner.decide(view, &mut self.rng, &mut self.sink)?;

        for action in &actions {
            self.history.observe(&action.name, &action.value)?;
            self.memory.add_action(action.clone());
        }
        let committed = self.history.close_entry();
        debug!(time = self.time, entry = committed, actions = actions.len(), "step committed");
        self.time += 1;
        Ok(actions)
    }

    /// Timesteps completed so far.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn config(&self) -> &PavlovConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        self.history.schema()
    }

    pub fn goals(&self) -> &[Predicate] {
        &self.goals
    }

    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    pub fn memory(&self) -> &WorkingMemory {
        &self.memory
    }

    pub fn learner(&self) -> &dyn ILearner {
        self.learner.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Hand back the sink, dropping the agent.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
