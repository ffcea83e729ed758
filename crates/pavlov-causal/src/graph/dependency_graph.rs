//! petgraph::StableGraph wrapper over variable names with endpoint marks.
//!
//! An undirected edge is stored as a symmetric pair `a → b`, `b → a`, both marked
//! [`EdgeMark::Undirected`]. Orienting `x → y` removes the `y → x` half, so an
//! oriented edge is stored exactly once, in its direction.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use pavlov_core::errors::{GraphError, PavlovResult};

/// What is known about an edge's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMark {
    /// Both endpoints unknown (`a o-o b`).
    Undirected,
    /// Arrowhead at the target, unknown tail (`a o-> b`).
    PartiallyOriented,
    /// Tail at the source, arrowhead at the target (`a --> b`).
    Directed,
}

impl EdgeMark {
    pub fn is_oriented(self) -> bool {
        !matches!(self, Self::Undirected)
    }
}

/// One logical edge. Undirected edges are reported once with `from < to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub mark: EdgeMark,
}

/// The underlying directed graph type.
pub type DependencyStableGraph = StableGraph<String, EdgeMark, Directed>;

/// Dependency graph over unique variable names.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The petgraph stable graph.
    pub graph: DependencyStableGraph,
    /// Name → NodeIndex, ordered so that every enumeration is deterministic.
    pub node_index: BTreeMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the complete undirected graph over `names` (no self-loops).
    pub fn make_complete<S: AsRef<str>>(&mut self, names: &[S]) -> PavlovResult<()> {
        self.graph.clear();
        self.node_index.clear();
        for name in names {
            self.add_node(name.as_ref())?;
        }
        let indices: Vec<NodeIndex> = self.node_index.values().copied().collect();
        for (i, &a) in indices.iter().enumerate() {
            for &b in &indices[i + 1..] {
                self.graph.add_edge(a, b, EdgeMark::Undirected);
                self.graph.add_edge(b, a, EdgeMark::Undirected);
            }
        }
        Ok(())
    }

    pub fn add_node(&mut self, name: &str) -> PavlovResult<NodeIndex> {
        if self.node_index.contains_key(name) {
            return Err(GraphError::DuplicateNode {
                name: name.to_string(),
            }
            .into());
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        Ok(idx)
    }

    pub fn node(&self, name: &str) -> PavlovResult<NodeIndex> {
        self.node_index.get(name).copied().ok_or_else(|| {
            GraphError::NoSuchNode {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn node_names(&self) -> Vec<String> {
        self.node_index.keys().cloned().collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of logical edges (a symmetric pair counts once).
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Add an undirected edge. Existing edges and self-loops are left as they are.
    pub fn add_edge(&mut self, a: &str, b: &str) -> PavlovResult<()> {
        let (ia, ib) = (self.node(a)?, self.node(b)?);
        if ia == ib || self.is_adjacent(ia, ib) {
            return Ok(());
        }
        self.graph.add_edge(ia, ib, EdgeMark::Undirected);
        self.graph.add_edge(ib, ia, EdgeMark::Undirected);
        Ok(())
    }

    /// Remove the edge between `a` and `b` in both directions. Idempotent.
    /// Returns whether anything was removed.
    pub fn delete_edge(&mut self, a: &str, b: &str) -> PavlovResult<bool> {
        let (ia, ib) = (self.node(a)?, self.node(b)?);
        let mut removed = false;
        while let Some(e) = self.graph.find_edge(ia, ib) {
            self.graph.remove_edge(e);
            removed = true;
        }
        while let Some(e) = self.graph.find_edge(ib, ia) {
            self.graph.remove_edge(e);
            removed = true;
        }
        Ok(removed)
    }

    pub fn adjacent(&self, a: &str, b: &str) -> PavlovResult<bool> {
        Ok(self.is_adjacent(self.node(a)?, self.node(b)?))
    }

    /// Mark stored on the `a → b` half, if that half exists.
    pub fn mark(&self, a: &str, b: &str) -> PavlovResult<Option<EdgeMark>> {
        let (ia, ib) = (self.node(a)?, self.node(b)?);
        Ok(self.graph.find_edge(ia, ib).map(|e| self.graph[e]))
    }

    /// Whether the edge is oriented `a → b` (partially or fully).
    pub fn points_into(&self, a: &str, b: &str) -> PavlovResult<bool> {
        Ok(self.mark(a, b)?.is_some_and(EdgeMark::is_oriented))
    }

    pub fn is_undirected(&self, a: &str, b: &str) -> PavlovResult<bool> {
        Ok(self.mark(a, b)? == Some(EdgeMark::Undirected))
    }

    /// Mark an arrowhead at `y` on the `x`–`y` edge (`x o-> y`) and drop the reverse
    /// half. A fully directed `x → y` stays fully directed.
    pub fn orient_half(&mut self, x: &str, y: &str) -> PavlovResult<()> {
        self.set_orientation(x, y, EdgeMark::PartiallyOriented)
    }

    /// Orient the `x`–`y` edge as the fully causal `x → y`.
    pub fn orient(&mut self, x: &str, y: &str) -> PavlovResult<()> {
        self.set_orientation(x, y, EdgeMark::Directed)
    }

    fn set_orientation(&mut self, x: &str, y: &str, mark: EdgeMark) -> PavlovResult<()> {
        let (ix, iy) = (self.node(x)?, self.node(y)?);
        if !self.is_adjacent(ix, iy) {
            return Err(GraphError::NoSuchEdge {
                from: x.to_string(),
                to: y.to_string(),
            }
            .into());
        }
        if let Some(reverse) = self.graph.find_edge(iy, ix) {
            self.graph.remove_edge(reverse);
        }
        match self.graph.find_edge(ix, iy) {
            Some(e) => {
                let current = self.graph[e];
                if current != EdgeMark::Directed {
                    self.graph[e] = mark;
                }
            }
            None => {
                self.graph.add_edge(ix, iy, mark);
            }
        }
        Ok(())
    }

    /// Every node adjacent to `v`, whatever the edge marks.
    pub fn neighbors(&self, v: &str) -> PavlovResult<Vec<String>> {
        let idx = self.node(v)?;
        let names: BTreeSet<&String> = self
            .graph
            .neighbors_undirected(idx)
            .map(|n| &self.graph[n])
            .collect();
        Ok(names.into_iter().cloned().collect())
    }

    /// Nodes joined to `v` by an undirected edge.
    pub fn undirected_neighbors(&self, v: &str) -> PavlovResult<Vec<String>> {
        let idx = self.node(v)?;
        Ok(self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| *e.weight() == EdgeMark::Undirected)
            .map(|e| self.graph[e.target()].clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }

    /// Nodes with an oriented edge into `v`.
    pub fn parents(&self, v: &str) -> PavlovResult<Vec<String>> {
        let idx = self.node(v)?;
        Ok(self
            .oriented_sources(idx)
            .map(|n| self.graph[n].clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }

    /// All nodes with a directed path (through oriented edges) into `v`.
    pub fn ancestors(&self, v: &str) -> PavlovResult<BTreeSet<String>> {
        let start = self.node(v)?;
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for source in self.oriented_sources(current) {
                if source != start && seen.insert(source) {
                    queue.push_back(source);
                }
            }
        }
        Ok(seen.into_iter().map(|n| self.graph[n].clone()).collect())
    }

    /// Unshielded triples `(t, v, r)`: `t`–`v` and `v`–`r` are edges, `t` and `r` are
    /// not adjacent. Each triple is listed once, with `t < r`.
    pub fn triples(&self) -> Vec<(String, String, String)> {
        let mut out = Vec::new();
        for (v_name, &v) in &self.node_index {
            let neighbors: BTreeSet<NodeIndex> = self.graph.neighbors_undirected(v).collect();
            let ordered: Vec<NodeIndex> = {
                let mut n: Vec<NodeIndex> = neighbors.into_iter().collect();
                n.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
                n
            };
            for (i, &t) in ordered.iter().enumerate() {
                for &r in &ordered[i + 1..] {
                    if !self.is_adjacent(t, r) {
                        out.push((self.graph[t].clone(), v_name.clone(), self.graph[r].clone()));
                    }
                }
            }
        }
        out
    }

    /// Snapshot of every logical edge.
    pub fn edges(&self) -> Vec<GraphEdge> {
        let mut out = Vec::new();
        for e in self.graph.edge_references() {
            let (from, to) = (&self.graph[e.source()], &self.graph[e.target()]);
            let mark = *e.weight();
            if mark == EdgeMark::Undirected && from > to {
                continue;
            }
            out.push(GraphEdge {
                from: from.clone(),
                to: to.clone(),
                mark,
            });
        }
        out.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        out
    }

    /// Oriented edges as `(from, to)` pairs.
    pub fn oriented_edges(&self) -> Vec<(String, String)> {
        self.edges()
            .into_iter()
            .filter(|e| e.mark.is_oriented())
            .map(|e| (e.from, e.to))
            .collect()
    }

    fn is_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some() || self.graph.find_edge(b, a).is_some()
    }

    fn oriented_sources(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|e| e.weight().is_oriented())
            .map(|e| e.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pavlov_core::errors::PavlovError;

    fn complete(names: &[&str]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.make_complete(names).unwrap();
        graph
    }

    #[test]
    fn make_complete_connects_every_pair() {
        let graph = complete(&["A", "B", "C", "D"]);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.adjacent("A", "D").unwrap());
        assert!(graph.is_undirected("D", "A").unwrap());
    }

    #[test]
    fn make_complete_rejects_duplicates() {
        let mut graph = DependencyGraph::new();
        let err = graph.make_complete(&["A", "A"]).unwrap_err();
        assert!(matches!(
            err,
            PavlovError::Graph(GraphError::DuplicateNode { .. })
        ));
    }

    #[test]
    fn delete_edge_is_idempotent() {
        let mut graph = complete(&["A", "B"]);
        assert!(graph.delete_edge("B", "A").unwrap());
        assert!(!graph.delete_edge("A", "B").unwrap());
        assert!(!graph.adjacent("A", "B").unwrap());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn orient_half_requires_an_edge() {
        let mut graph = complete(&["A", "B", "C"]);
        graph.delete_edge("A", "C").unwrap();
        let err = graph.orient_half("A", "C").unwrap_err();
        assert!(matches!(err, PavlovError::Graph(GraphError::NoSuchEdge { .. })));
    }

    #[test]
    fn orient_half_drops_the_reverse_half() {
        let mut graph = complete(&["A", "B"]);
        graph.orient_half("A", "B").unwrap();
        assert_eq!(graph.mark("A", "B").unwrap(), Some(EdgeMark::PartiallyOriented));
        assert_eq!(graph.mark("B", "A").unwrap(), None);
        assert!(graph.adjacent("B", "A").unwrap());
        assert_eq!(graph.parents("B").unwrap(), vec!["A".to_string()]);
    }

    #[test]
    fn orient_half_keeps_full_direction() {
        let mut graph = complete(&["A", "B"]);
        graph.orient("A", "B").unwrap();
        graph.orient_half("A", "B").unwrap();
        assert_eq!(graph.mark("A", "B").unwrap(), Some(EdgeMark::Directed));
    }

    #[test]
    fn ancestors_follow_oriented_edges_only() {
        let mut graph = complete(&["A", "B", "C", "D"]);
        graph.delete_edge("A", "C").unwrap();
        graph.delete_edge("A", "D").unwrap();
        graph.delete_edge("B", "D").unwrap();
        graph.orient("A", "B").unwrap();
        graph.orient("B", "C").unwrap();
        // C–D stays undirected.
        let ancestors = graph.ancestors("C").unwrap();
        assert_eq!(
            ancestors.into_iter().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(graph.ancestors("D").unwrap().is_empty());
    }

    #[test]
    fn triples_are_unshielded_and_listed_once() {
        let mut graph = complete(&["T", "V", "R"]);
        assert!(graph.triples().is_empty());
        graph.delete_edge("T", "R").unwrap();
        assert_eq!(
            graph.triples(),
            vec![("R".to_string(), "V".to_string(), "T".to_string())]
        );
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let graph = complete(&["A"]);
        assert!(matches!(
            graph.neighbors("Z"),
            Err(PavlovError::Graph(GraphError::NoSuchNode { .. }))
        ));
    }
}
