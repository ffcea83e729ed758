//! PC-algorithm variant: skeleton search followed by edge orientation.

pub mod orientation;
pub mod separating_sets;
pub mod skeleton;

use tracing::{info, warn};

use pavlov_core::config::CausalConfig;
use pavlov_core::errors::PavlovResult;
use pavlov_observability::pc_span;

use crate::graph::{find_cycles, DependencyGraph};
use crate::probability::ProbabilityTable;

pub use separating_sets::SeparatingSets;

/// Result of one PC run.
#[derive(Debug, Clone)]
pub struct PcOutcome {
    pub graph: DependencyGraph,
    pub separating_sets: SeparatingSets,
    /// Pairs whose edge was removed, in removal order.
    pub removed: Vec<(String, String)>,
    /// Strongly connected components among oriented edges. Reported, never repaired.
    pub cycles: Vec<Vec<String>>,
    pub acyclic: bool,
}

/// Learns a partially oriented causal graph from a joint table.
#[derive(Debug, Clone, Default)]
pub struct PcLearner {
    config: CausalConfig,
}

impl PcLearner {
    pub fn new(config: CausalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CausalConfig {
        &self.config
    }

    /// Run every phase over the variables of `table`.
    pub fn learn(&self, table: &ProbabilityTable) -> PavlovResult<PcOutcome> {
        let span = pc_span!(table.variables().len());
        let _guard = span.enter();

        let mut graph = DependencyGraph::new();
        graph.make_complete(&table.names())?;
        let mut separating_sets = SeparatingSets::new();

        let mut removed = skeleton::remove_marginal_independencies(
            &mut graph,
            table,
            self.config.independence_tolerance,
            &mut separating_sets,
            self.config.orient_unconditioned_pairs,
        )?;
        removed.extend(skeleton::remove_conditional_independencies(
            &mut graph,
            table,
            &self.config,
            &mut separating_sets,
        )?);

        if self.config.temporal_tiers {
            orientation::orient_temporal_tiers(&mut graph)?;
        }
        let colliders = orientation::orient_colliders(&mut graph, &separating_sets)?;
        let propagated = orientation::propagate_orientations(&mut graph)?;

        let cycles = find_cycles(&graph);
        let acyclic = cycles.is_empty();
        if !acyclic {
            warn!(cycles = ?cycles, "pc: learned graph contains directed cycles");
        }
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            removed = removed.len(),
            colliders,
            propagated,
            acyclic,
            "pc: network built"
        );

        Ok(PcOutcome {
            graph,
            separating_sets,
            removed,
            cycles,
            acyclic,
        })
    }
}
