//! Edge removal: the unconditioned pass, then conditioning sets of growing size.

use tracing::debug;

use pavlov_core::config::CausalConfig;
use pavlov_core::errors::PavlovResult;

use super::separating_sets::SeparatingSets;
use crate::graph::DependencyGraph;
use crate::probability::{are_conditionally_independent, are_independent, ProbabilityTable};

/// Delete every edge whose endpoints are marginally independent.
/// With `record_empty` the pair is given an empty separating set.
pub fn remove_marginal_independencies(
    graph: &mut DependencyGraph,
    table: &ProbabilityTable,
    tolerance: f64,
    separating_sets: &mut SeparatingSets,
    record_empty: bool,
) -> PavlovResult<Vec<(String, String)>> {
    let mut removed = Vec::new();
    for edge in graph.edges() {
        if are_independent(table, &edge.from, &edge.to, tolerance)? {
            graph.delete_edge(&edge.from, &edge.to)?;
            if record_empty {
                separating_sets.insert(&edge.from, &edge.to, Vec::<String>::new());
            }
            debug!(from = %edge.from, to = %edge.to, "pc: marginally independent");
            removed.push((edge.from, edge.to));
        }
    }
    Ok(removed)
}

/// Conditioning sets of size 1, 2, ... drawn from either endpoint's other
/// neighbours. Stops once no endpoint has enough neighbours left.
pub fn remove_conditional_independencies(
    graph: &mut DependencyGraph,
    table: &ProbabilityTable,
    config: &CausalConfig,
    separating_sets: &mut SeparatingSets,
) -> PavlovResult<Vec<(String, String)>> {
    let mut removed = Vec::new();
    let mut size = 1;
    loop {
        if config.max_conditioning_size.is_some_and(|cap| size > cap) {
            break;
        }
        let mut eligible = false;
        for edge in graph.edges() {
            // Earlier removals in this pass can only shrink the neighbourhoods.
            if !graph.adjacent(&edge.from, &edge.to)? {
                continue;
            }
            let mut separated = None;
            for (u, v) in [(&edge.from, &edge.to), (&edge.to, &edge.from)] {
                let others: Vec<String> = graph
                    .neighbors(u)?
                    .into_iter()
                    .filter(|n| n != v)
                    .collect();
                if others.len() < size {
                    continue;
                }
                eligible = true;
                for subset in combinations(&others, size) {
                    if are_conditionally_independent(
                        table,
                        u,
                        v,
                        &subset,
                        config.independence_tolerance,
                    )? {
                        separated = Some(subset);
                        break;
                    }
                }
                if separated.is_some() {
                    break;
                }
            }
            if let Some(subset) = separated {
                graph.delete_edge(&edge.from, &edge.to)?;
                debug!(
                    from = %edge.from,
                    to = %edge.to,
                    given = ?subset,
                    "pc: conditionally independent"
                );
                separating_sets.insert(&edge.from, &edge.to, subset);
                removed.push((edge.from, edge.to));
            }
        }
        if !eligible {
            break;
        }
        size += 1;
    }
    Ok(removed)
}

/// All `k`-element subsets of `items`, in lexicographic index order.
pub fn combinations(items: &[String], k: usize) -> Vec<Vec<String>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        out.push(indices.iter().map(|&i| items[i].clone()).collect());
        let Some(pivot) = (0..k).rev().find(|&i| indices[i] != i + n - k) else {
            return out;
        };
        indices[pivot] += 1;
        for j in pivot + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn combinations_enumerate_every_subset() {
        let items = names(&["A", "B", "C", "D"]);
        assert_eq!(combinations(&items, 2).len(), 6);
        assert_eq!(combinations(&items, 4), vec![items.clone()]);
        assert_eq!(combinations(&items, 0), vec![Vec::<String>::new()]);
        assert!(combinations(&items, 5).is_empty());
        assert_eq!(combinations(&items, 1)[3], names(&["D"]));
    }
}
