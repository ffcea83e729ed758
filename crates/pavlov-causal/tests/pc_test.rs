//! PC learner against the Door/Window golden fixture and an exact collider joint.

use std::collections::BTreeSet;

use pavlov_causal::graph::EdgeMark;
use pavlov_causal::{PcLearner, ProbabilityTable};
use pavlov_core::config::CausalConfig;
use pavlov_core::models::{Assignment, Variable};
use test_fixtures::load_joint;

fn pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn fixture_table(name: &str, dense: bool) -> (ProbabilityTable, test_fixtures::JointFixture) {
    let fixture = load_joint(name);
    let variables: Vec<Variable> = fixture
        .variables
        .iter()
        .map(|v| Variable::sensory(v.name.clone(), v.domain.clone()))
        .collect();
    let mut table = ProbabilityTable::with_storage(&variables, dense).unwrap();
    for row in &fixture.rows {
        table.increment(row).unwrap();
    }
    table.normalize(fixture.rows.len() as f64);
    (table, fixture)
}

#[test]
fn door_window_skeleton_matches_golden() {
    for dense in [false, true] {
        let (table, fixture) = fixture_table("door_window", dense);
        let outcome = PcLearner::new(CausalConfig::default()).learn(&table).unwrap();

        let edges: BTreeSet<(String, String)> = outcome
            .graph
            .edges()
            .into_iter()
            .map(|e| pair(&e.from, &e.to))
            .collect();
        let expected: BTreeSet<(String, String)> = fixture
            .expected
            .edges
            .iter()
            .map(|[a, b]| pair(a, b))
            .collect();
        assert_eq!(edges, expected, "dense = {dense}");

        for [a, b] in &fixture.expected.removed_unconditioned {
            assert!(outcome.removed.contains(&pair(a, b)));
            // Removed before any conditioning: no separating set by default.
            assert!(outcome.separating_sets.get(a, b).is_none());
        }
        for sepset in &fixture.expected.separating_sets {
            let [a, b] = &sepset.pair;
            let recorded = outcome.separating_sets.get(a, b).unwrap();
            let expected: BTreeSet<String> = sepset.set.iter().cloned().collect();
            assert_eq!(recorded, &expected);
        }
        assert_eq!(fixture.expected.colliders, 0);
        assert!(outcome.graph.oriented_edges().is_empty());
        assert!(outcome.acyclic);
    }
}

#[test]
fn textbook_mode_records_empty_separating_sets() {
    let (table, fixture) = fixture_table("door_window", false);
    let config = CausalConfig {
        orient_unconditioned_pairs: true,
        ..CausalConfig::default()
    };
    let outcome = PcLearner::new(config).learn(&table).unwrap();
    for [a, b] in &fixture.expected.removed_unconditioned {
        assert_eq!(outcome.separating_sets.get(a, b).map(BTreeSet::len), Some(0));
    }
}

/// Z → A, Z → B, A → C ← B, C → D, with exact probabilities.
fn collider_joint() -> ProbabilityTable {
    let names = ["A", "B", "C", "D", "Z"];
    let variables: Vec<Variable> = names
        .iter()
        .map(|n| Variable::sensory(*n, ["0", "1"]))
        .collect();
    let mut table = ProbabilityTable::dense(&variables).unwrap();

    let bern = |p: f64, on: bool| if on { p } else { 1.0 - p };
    for bits in 0..32u32 {
        let on: Vec<bool> = (0..5).map(|i| bits & (1 << i) != 0).collect();
        let (a, b, c, d, z) = (on[0], on[1], on[2], on[3], on[4]);
        let p = 0.5
            * bern(if z { 0.8 } else { 0.3 }, a)
            * bern(if z { 0.7 } else { 0.2 }, b)
            * bern(if a || b { 0.9 } else { 0.1 }, c)
            * bern(if c { 0.85 } else { 0.25 }, d);
        let assignment: Assignment = names
            .iter()
            .zip(&on)
            .map(|(n, v)| (n.to_string(), if *v { "1" } else { "0" }.to_string()))
            .collect();
        table.set_prob(&assignment, p).unwrap();
    }
    table
}

#[test]
fn collider_and_propagation_are_oriented() {
    let table = collider_joint();
    assert!((table.total() - 1.0).abs() < 1e-9);

    let outcome = PcLearner::new(CausalConfig::default()).learn(&table).unwrap();
    let graph = &outcome.graph;

    let edges: BTreeSet<(String, String)> = graph
        .edges()
        .into_iter()
        .map(|e| pair(&e.from, &e.to))
        .collect();
    let expected: BTreeSet<(String, String)> =
        [("A", "C"), ("A", "Z"), ("B", "C"), ("B", "Z"), ("C", "D")]
            .iter()
            .map(|(a, b)| pair(a, b))
            .collect();
    assert_eq!(edges, expected);

    assert_eq!(
        outcome.separating_sets.get("A", "B").unwrap(),
        &BTreeSet::from(["Z".to_string()])
    );
    assert_eq!(graph.mark("A", "C").unwrap(), Some(EdgeMark::PartiallyOriented));
    assert_eq!(graph.mark("B", "C").unwrap(), Some(EdgeMark::PartiallyOriented));
    assert_eq!(graph.mark("C", "D").unwrap(), Some(EdgeMark::Directed));
    assert!(graph.is_undirected("A", "Z").unwrap());
    assert!(graph.is_undirected("B", "Z").unwrap());
    assert_eq!(graph.parents("C").unwrap(), vec!["A".to_string(), "B".to_string()]);
    assert_eq!(
        graph.ancestors("D").unwrap(),
        BTreeSet::from(["A".to_string(), "B".to_string(), "C".to_string()])
    );
    assert!(outcome.acyclic);
}

#[test]
fn conditioning_cap_stops_early() {
    let table = collider_joint();
    let config = CausalConfig {
        max_conditioning_size: Some(1),
        ..CausalConfig::default()
    };
    let outcome = PcLearner::new(config).learn(&table).unwrap();
    // Z–C needs {A, B} to separate them.
    assert!(outcome.graph.adjacent("C", "Z").unwrap());
    assert!(!outcome.graph.adjacent("A", "B").unwrap());
}

#[test]
fn empty_table_leaves_no_edges() {
    let variables = vec![
        Variable::sensory("A", ["0", "1"]),
        Variable::sensory("B", ["0", "1"]),
    ];
    let table = ProbabilityTable::sparse(&variables).unwrap();
    let outcome = PcLearner::default().learn(&table).unwrap();
    assert_eq!(outcome.graph.node_count(), 2);
    assert_eq!(outcome.graph.edge_count(), 0);
}
