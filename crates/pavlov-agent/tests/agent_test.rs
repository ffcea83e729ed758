//! Agent end to end: init, sense, act against small deterministic worlds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pavlov_agent::Agent;
use pavlov_core::config::{LearnerKind, PavlovConfig};
use pavlov_core::errors::PavlovError;
use pavlov_core::models::{EventKind, Predicate, Variable};
use pavlov_observability::EventLog;
use pavlov_operant::{Conjunction, DecisionSource, TemporalTag, Term};

fn config(learner: LearnerKind, seed: u64) -> PavlovConfig {
    let mut config = PavlovConfig::default();
    config.agent.learner = learner;
    config.agent.seed = Some(seed);
    config
}

fn open() -> Predicate {
    Predicate::new("Open", "door")
}

fn door_agent(seed: u64) -> Agent<EventLog> {
    Agent::with_sink(
        vec![
            Variable::action("Open", ["idle", "door"]),
            Variable::action("Close", ["idle", "door"]),
            Variable::action("Wave", ["idle", "hand"]),
        ],
        vec![Variable::sensory("Door", ["closed", "open"])],
        vec![Predicate::new("Door", "open")],
        config(LearnerKind::Operant, seed),
        EventLog::new(),
    )
    .unwrap()
}

#[test]
fn operant_agent_learns_to_open_the_door() {
    for seed in [1, 7, 42] {
        let mut agent = door_agent(seed);
        let mut chosen: Vec<Vec<Predicate>> = Vec::new();
        for _ in 0..500 {
            if chosen.last().is_some_and(|actions| actions.contains(&open())) {
                agent.sense("Door", "open").unwrap();
            }
            chosen.push(agent.act().unwrap());
        }

        let learner = agent.learner().as_operant().unwrap();
        let reinforcer = learner.engine().reinforcer(&Predicate::new("Door", "open")).unwrap();
        let single = Conjunction::from_terms([Term::action(open(), TemporalTag::Now)]);
        assert!(reinforcer.has_predictor(&single), "seed {seed}");

        let opened = chosen[400..].iter().filter(|a| a.contains(&open())).count();
        assert!(opened > 50, "seed {seed}: Open chosen {opened} of 100 times");
        assert_eq!(
            learner.last_decision().map(|d| d.source),
            Some(DecisionSource::Predictor)
        );

        let opened_in_history = agent.history().entries()[400..]
            .iter()
            .filter(|entry| entry["Open"] == "door")
            .count();
        assert_eq!(opened_in_history, opened);
        assert!(agent.sink().counts()[&EventKind::PredictorCreated] >= 1);
    }
}

#[test]
fn causal_agent_switches_the_light_on() {
    let mut world_rng = StdRng::seed_from_u64(17);
    let mut agent = Agent::with_sink(
        vec![
            Variable::action("Switch", ["idle", "up", "down"]),
            Variable::action("Wave", ["idle", "hand"]),
        ],
        vec![
            Variable::sensory("Light", ["off", "on"]),
            Variable::sensory("Wind", ["calm", "gust"]),
        ],
        vec![Predicate::new("Light", "on")],
        config(LearnerKind::Causal, 4),
        EventLog::new(),
    )
    .unwrap();

    let mut last: Vec<Predicate> = Vec::new();
    for _ in 0..100 {
        if last.contains(&Predicate::new("Switch", "up")) {
            agent.sense("Light", "on").unwrap();
        }
        let wind = if world_rng.random_bool(0.5) { "gust" } else { "calm" };
        agent.sense("Wind", wind).unwrap();
        last = agent.act().unwrap();
    }

    let controller = agent.learner().as_causal().unwrap().controller();
    let network = controller.network().unwrap();
    assert_eq!(
        network.graph.parents("Light@t").unwrap(),
        vec!["Switch@t-1".to_string()]
    );

    let log = agent.sink();
    assert_eq!(log.counts()[&EventKind::GraphRebuilt], 1);
    let verified: Vec<_> = log.of_kind(EventKind::EdgeVerified).collect();
    assert!(!verified.is_empty());
    assert!(verified
        .iter()
        .all(|e| e.field("outcome") == Some("confirmed")));

    let lit = agent.history().entries()[60..]
        .iter()
        .filter(|entry| entry["Light"] == "on")
        .count();
    assert!(lit >= 15, "light on {lit} of 40 steps");
}

#[test]
fn sense_rejects_undeclared_variables_and_values() {
    let mut agent = door_agent(0);
    assert!(matches!(
        agent.sense("Window", "open"),
        Err(PavlovError::UnknownVariable { .. })
    ));
    assert!(matches!(
        agent.sense("Door", "ajar"),
        Err(PavlovError::UnknownValue { .. })
    ));
    agent.act().unwrap();
    assert_eq!(agent.history().entries()[0]["Door"], "closed");
}

#[test]
fn same_seed_same_actions() {
    let run = |seed| {
        let mut agent = door_agent(seed);
        (0..50).map(|_| agent.act().unwrap()).collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn config_errors_surface_at_init() {
    let mut bad = config(LearnerKind::Operant, 0);
    bad.operant.max_conjunction_terms = 0;
    let result = Agent::init(
        vec![Variable::action("Open", ["idle", "door"])],
        vec![Variable::sensory("Door", ["closed", "open"])],
        Vec::new(),
        bad,
    );
    assert!(matches!(result, Err(PavlovError::InvalidConfiguration { .. })));
}
