//! Property tests for pavlov-causal: table round trips and graph invariants.

use proptest::prelude::*;

use pavlov_causal::graph::{dag_enforcement, DependencyGraph};
use pavlov_causal::ProbabilityTable;
use pavlov_core::models::{Assignment, Variable};

fn node(i: usize) -> String {
    format!("n{i}")
}

fn complete(n: usize) -> DependencyGraph {
    let names: Vec<String> = (0..n).map(node).collect();
    let mut graph = DependencyGraph::new();
    graph.make_complete(&names).unwrap();
    graph
}

proptest! {
    #[test]
    fn set_prob_then_prob_round_trips(
        cells in prop::collection::vec((0usize..3, 0usize..2, 0.0_f64..1.0), 1..20),
        dense in any::<bool>(),
    ) {
        let variables = vec![
            Variable::sensory("X", ["a", "b", "c"]),
            Variable::sensory("Y", ["u", "v"]),
        ];
        let mut table = ProbabilityTable::with_storage(&variables, dense).unwrap();
        let mut expected = std::collections::BTreeMap::new();
        for &(x, y, p) in &cells {
            let assignment: Assignment = [
                ("X".to_string(), variables[0].domain[x].clone()),
                ("Y".to_string(), variables[1].domain[y].clone()),
            ]
            .into();
            table.set_prob(&assignment, p).unwrap();
            expected.insert(assignment, p);
        }
        for (assignment, p) in &expected {
            prop_assert_eq!(table.prob(assignment).unwrap(), *p);
        }
        let total: f64 = expected.values().sum();
        prop_assert!((table.total() - total).abs() < 1e-9);
    }

    #[test]
    fn deleting_edges_keeps_adjacency_symmetric(
        deletions in prop::collection::vec((0usize..6, 0usize..6), 0..20),
    ) {
        let mut graph = complete(6);
        for &(a, b) in &deletions {
            if a != b {
                graph.delete_edge(&node(a), &node(b)).unwrap();
            }
        }
        for a in 0..6 {
            for b in 0..6 {
                prop_assert_eq!(
                    graph.adjacent(&node(a), &node(b)).unwrap(),
                    graph.adjacent(&node(b), &node(a)).unwrap()
                );
            }
        }
        for (t, v, r) in graph.triples() {
            prop_assert!(t < r);
            prop_assert!(graph.adjacent(&t, &v).unwrap());
            prop_assert!(graph.adjacent(&v, &r).unwrap());
            prop_assert!(!graph.adjacent(&t, &r).unwrap());
        }
    }

    #[test]
    fn forward_orientations_never_cycle(
        orientations in prop::collection::vec((0usize..8, 0usize..8), 0..30),
    ) {
        let mut graph = complete(8);
        for &(a, b) in &orientations {
            if a < b {
                graph.orient(&node(a), &node(b)).unwrap();
            }
        }
        prop_assert!(dag_enforcement::is_acyclic(&graph));
        for &(a, b) in &orientations {
            if a < b {
                prop_assert!(graph.ancestors(&node(b)).unwrap().contains(&node(a)));
            }
        }
    }

    #[test]
    fn orienting_preserves_adjacency(
        orientations in prop::collection::vec((0usize..5, 0usize..5), 0..15),
    ) {
        let mut graph = complete(5);
        let before = graph.edge_count();
        for &(a, b) in &orientations {
            if a != b {
                graph.orient_half(&node(a), &node(b)).unwrap();
            }
        }
        prop_assert_eq!(graph.edge_count(), before);
    }
}
