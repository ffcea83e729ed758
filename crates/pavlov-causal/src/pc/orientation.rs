//! Orientation phases run over the finished skeleton.

use tracing::debug;

use pavlov_core::errors::PavlovResult;

use super::separating_sets::SeparatingSets;
use crate::graph::DependencyGraph;
use crate::lagged::tier_of;

/// Orient every edge joining a `@t-1` node to a `@t` node forward in time.
/// Returns the number of edges oriented.
pub fn orient_temporal_tiers(graph: &mut DependencyGraph) -> PavlovResult<usize> {
    let mut oriented = 0;
    for edge in graph.edges() {
        let (Some(from_tier), Some(to_tier)) = (tier_of(&edge.from), tier_of(&edge.to)) else {
            continue;
        };
        if from_tier < to_tier {
            graph.orient(&edge.from, &edge.to)?;
            oriented += 1;
        } else if to_tier < from_tier {
            graph.orient(&edge.to, &edge.from)?;
            oriented += 1;
        }
    }
    Ok(oriented)
}

/// Orient `T o-> V <-o R` for every unshielded triple whose separating set
/// exists and does not contain V. Pairs without a separating set are skipped.
/// A collider contradicting an existing arrowhead out of V is left alone.
pub fn orient_colliders(
    graph: &mut DependencyGraph,
    separating_sets: &SeparatingSets,
) -> PavlovResult<usize> {
    let mut colliders = 0;
    for (t, v, r) in graph.triples() {
        if separating_sets.separates(&t, &r, &v) != Some(false) {
            continue;
        }
        if graph.points_into(&v, &t)? || graph.points_into(&v, &r)? {
            debug!(%t, %v, %r, "pc: conflicting collider left undirected");
            continue;
        }
        graph.orient_half(&t, &v)?;
        graph.orient_half(&r, &v)?;
        debug!(%t, %v, %r, "pc: collider");
        colliders += 1;
    }
    Ok(colliders)
}

/// For every `T → V – R` with T and R non-adjacent, orient `V → R`.
/// Repeats until nothing changes.
pub fn propagate_orientations(graph: &mut DependencyGraph) -> PavlovResult<usize> {
    let mut oriented = 0;
    loop {
        let mut changed = false;
        for (t, v, r) in graph.triples() {
            for (tail, head) in [(&t, &r), (&r, &t)] {
                if graph.points_into(tail, &v)? && graph.is_undirected(&v, head)? {
                    graph.orient(&v, head)?;
                    debug!(from = %v, to = %head, "pc: propagated");
                    oriented += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return Ok(oriented);
        }
    }
}
