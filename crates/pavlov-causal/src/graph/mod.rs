pub mod dag_enforcement;
pub mod dependency_graph;

pub use dag_enforcement::{find_cycles, is_acyclic, would_create_cycle};
pub use dependency_graph::{DependencyGraph, DependencyStableGraph, EdgeMark, GraphEdge};
