//! Cycle checks over the oriented part of a dependency graph.
//! Undirected edges carry no direction and never take part in a cycle.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use pavlov_core::errors::PavlovResult;

use super::dependency_graph::DependencyGraph;

/// Projection of the oriented edges onto a plain DiGraph.
fn oriented_projection(graph: &DependencyGraph) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
    let mut projected = DiGraph::new();
    let mut index = HashMap::new();
    for name in graph.node_index.keys() {
        index.insert(name.clone(), projected.add_node(name.clone()));
    }
    for (from, to) in graph.oriented_edges() {
        if let (Some(&a), Some(&b)) = (index.get(&from), index.get(&to)) {
            projected.add_edge(a, b, ());
        }
    }
    (projected, index)
}

/// Every strongly connected component of more than one node, as sorted name lists.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let (projected, _) = oriented_projection(graph);
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&projected)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut names: Vec<String> = scc.into_iter().map(|n| projected[n].clone()).collect();
            names.sort();
            names
        })
        .collect();
    cycles.sort();
    cycles
}

/// True when no directed cycle exists among oriented edges.
pub fn is_acyclic(graph: &DependencyGraph) -> bool {
    find_cycles(graph).is_empty()
}

/// Would orienting `source → target` close a directed cycle?
pub fn would_create_cycle(graph: &DependencyGraph, source: &str, target: &str) -> PavlovResult<bool> {
    graph.node(source)?;
    graph.node(target)?;
    if source == target {
        return Ok(true);
    }
    let (projected, index) = oriented_projection(graph);
    let (Some(&from), Some(&to)) = (index.get(target), index.get(source)) else {
        return Ok(false);
    };
    let mut dfs = Dfs::new(&projected, from);
    while let Some(node) = dfs.next(&projected) {
        if node == to {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.make_complete(&["A", "B", "C"]).unwrap();
        graph.orient("A", "B").unwrap();
        graph.orient("B", "C").unwrap();
        graph
    }

    #[test]
    fn chain_is_acyclic() {
        let graph = chain();
        assert!(is_acyclic(&graph));
        assert!(would_create_cycle(&graph, "C", "A").unwrap());
        assert!(!would_create_cycle(&graph, "A", "C").unwrap());
    }

    #[test]
    fn closing_the_loop_is_reported() {
        let mut graph = chain();
        graph.orient("C", "A").unwrap();
        assert!(!is_acyclic(&graph));
        assert_eq!(
            find_cycles(&graph),
            vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]]
        );
    }

    #[test]
    fn undirected_edges_never_form_cycles() {
        let mut graph = DependencyGraph::new();
        graph.make_complete(&["A", "B", "C"]).unwrap();
        assert!(is_acyclic(&graph));
        assert!(!would_create_cycle(&graph, "A", "B").unwrap());
    }

    #[test]
    fn self_loops_always_cycle() {
        let graph = chain();
        assert!(would_create_cycle(&graph, "A", "A").unwrap());
    }
}
