//! Bellman-Ford potentials from a virtual super-source, and edge reweighting.
//!
//! The super-source has a zero-weight edge to every vertex, which is the same
//! as starting every working distance at 0. Relaxation runs over the reverse
//! adjacency so that each pass writes every distance cell from exactly one
//! task: for destination `v`, read the previous pass's distances of its
//! in-neighbours and write only `v`'s slot in the next buffer. The result is
//! therefore independent of worker count and scheduling.
//!
//! Every function here runs on the ambient rayon pool; [`Johnson`](crate::Johnson)
//! installs its own pool around them.

use rayon::prelude::*;

use crate::cancel::CancellationToken;
use crate::error::JohnsonError;
use crate::graph::{CsrGraph, ReverseCsr, Weight};

/// Output of a successful reweighting.
///
/// For every edge `e = (u -> v)`:
/// `new_weight[e] == weight[e] + potential[u] - potential[v]` and `new_weight[e] >= 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reweighting {
    potentials: Vec<Weight>,
    new_weight: Vec<Weight>,
    passes: usize,
}

impl Reweighting {
    /// Distance of every vertex from the virtual super-source.
    pub fn potentials(&self) -> &[Weight] {
        &self.potentials
    }

    /// Non-negative reweighted value of every edge, indexed by edge id.
    pub fn new_weight(&self) -> &[Weight] {
        &self.new_weight
    }

    /// Relaxation passes performed before the distances stopped changing.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

/// Computes potentials and reweighted edges for `graph`.
///
/// # Errors
/// - [`JohnsonError::NegativeCycle`] naming the lowest edge id left negative
/// - [`JohnsonError::Cancelled`] if `cancel` fires between passes
pub fn reweight(graph: &CsrGraph, cancel: &CancellationToken) -> Result<Reweighting, JohnsonError> {
    let _span = tracing::info_span!(
        "bellman_ford",
        nnode = graph.node_count(),
        nedge = graph.edge_count()
    )
    .entered();

    let reverse = ReverseCsr::from_graph(graph);
    let (potentials, passes) = potentials(graph, &reverse, cancel)?;
    tracing::debug!(passes, "potentials computed");

    let new_weight = reweighted_edges(graph, &potentials);
    if let Some(edge) = new_weight.par_iter().position_first(|&w| w < 0) {
        let source_vertex = graph.source_of(edge);
        let target = graph.targets()[edge];
        tracing::warn!(edge, source_vertex, target, "negative weight cycle detected");
        return Err(JohnsonError::NegativeCycle {
            edge,
            source_vertex,
            target,
        });
    }

    Ok(Reweighting {
        potentials,
        new_weight,
        passes,
    })
}

/// Runs up to `node_count()` relaxation passes from the virtual super-source.
///
/// Returns the distances and the number of passes performed. Stops early once
/// a pass changes nothing, since every later pass would be identical.
///
/// # Errors
/// Returns [`JohnsonError::Cancelled`] if `cancel` fires between passes.
pub fn potentials(
    graph: &CsrGraph,
    reverse: &ReverseCsr,
    cancel: &CancellationToken,
) -> Result<(Vec<Weight>, usize), JohnsonError> {
    let n = graph.node_count();
    let weights = graph.weights();

    let mut current: Vec<Weight> = vec![0; n];
    let mut next = vec![0; n];
    let mut passes = 0;

    for _ in 0..n {
        if cancel.is_cancelled() {
            return Err(JohnsonError::Cancelled);
        }

        let previous = &current;
        let changed = next
            .par_iter_mut()
            .enumerate()
            .map(|(v, slot)| {
                let best = reverse.in_edges(v).fold(previous[v], |best, (u, e)| {
                    best.min(previous[u] + weights[e])
                });
                *slot = best;
                best < previous[v]
            })
            // Not `any`: that would short-circuit and leave slots unwritten.
            .reduce(|| false, |a, b| a || b);

        std::mem::swap(&mut current, &mut next);
        passes += 1;
        if !changed {
            break;
        }
    }

    Ok((current, passes))
}

/// Computes `weight[e] + potential[u] - potential[v]` for every edge.
///
/// Each source vertex owns its contiguous edge range, so rows are filled in
/// parallel without sharing any output cell.
pub fn reweighted_edges(graph: &CsrGraph, potentials: &[Weight]) -> Vec<Weight> {
    let weights = graph.weights();
    let targets = graph.targets();
    let mut new_weight = vec![0; graph.edge_count()];

    let mut rows = Vec::with_capacity(graph.node_count());
    let mut rest = new_weight.as_mut_slice();
    for u in 0..graph.node_count() {
        let (row, tail) = std::mem::take(&mut rest).split_at_mut(graph.degree(u));
        rows.push((u, row));
        rest = tail;
    }

    rows.into_par_iter().for_each(|(u, row)| {
        for (slot, e) in row.iter_mut().zip(graph.edge_range(u)) {
            *slot = weights[e] + potentials[u] - potentials[targets[e]];
        }
    });

    new_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrGraph {
        CsrGraph::from_sorted_edges(4, [(0, 1, 1), (0, 2, 4), (1, 2, 2), (2, 3, 1), (3, 1, -3)])
            .unwrap()
    }

    #[test]
    fn potentials_of_zero_weight_cycle() {
        let graph = sample();
        let reverse = ReverseCsr::from_graph(&graph);
        let (h, passes) = potentials(&graph, &reverse, &CancellationToken::new()).unwrap();
        assert_eq!(h, vec![0, -3, -1, 0]);
        assert_eq!(passes, 3);
    }

    #[test]
    fn reweighted_edges_are_non_negative_and_consistent() {
        let graph = sample();
        let r = reweight(&graph, &CancellationToken::new()).unwrap();
        assert_eq!(r.new_weight(), &[4, 5, 0, 0, 0]);

        let h = r.potentials();
        for (e, (u, v, w)) in graph.edges().enumerate() {
            assert!(r.new_weight()[e] >= 0);
            assert_eq!(r.new_weight()[e], w + h[u] - h[v]);
        }
    }

    #[test]
    fn detects_two_cycle() {
        let graph = CsrGraph::from_sorted_edges(2, [(0, 1, -5), (1, 0, 2)]).unwrap();
        let err = reweight(&graph, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, JohnsonError::NegativeCycle { .. }));
    }

    #[test]
    fn detects_negative_self_loop() {
        let graph = CsrGraph::from_sorted_edges(3, [(0, 1, 2), (1, 1, -1)]).unwrap();
        let err = reweight(&graph, &CancellationToken::new()).unwrap_err();
        assert!(matches!(
            err,
            JohnsonError::NegativeCycle {
                edge: 1,
                source_vertex: 1,
                target: 1
            }
        ));
    }

    #[test]
    fn non_negative_graph_keeps_zero_potentials() {
        let graph = CsrGraph::from_sorted_edges(3, [(0, 1, 2), (1, 2, 3)]).unwrap();
        let r = reweight(&graph, &CancellationToken::new()).unwrap();
        assert_eq!(r.potentials(), &[0, 0, 0]);
        assert_eq!(r.new_weight(), graph.weights());
        assert_eq!(r.passes(), 1);
    }

    #[test]
    fn empty_graph() {
        let graph = CsrGraph::from_sorted_edges(0, []).unwrap();
        let r = reweight(&graph, &CancellationToken::new()).unwrap();
        assert!(r.potentials().is_empty());
        assert!(r.new_weight().is_empty());
        assert_eq!(r.passes(), 0);
    }

    #[test]
    fn cancelled_before_first_pass() {
        let graph = sample();
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(matches!(reweight(&graph, &cancel), Err(JohnsonError::Cancelled)));
    }
}
