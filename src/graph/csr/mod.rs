//! A compact CSR (compressed sparse row) graph with integer edge weights.
//!
//! CSR stores edges in row-major order, which gives contiguous access to the
//! outgoing edges of a vertex and lets the whole edge set be shared read-only
//! across worker threads.
//!
//! Memory layout:
//! - `offsets`: `Vec<usize>` of length `n + 1` (row offsets, `offsets[n] == m`)
//! - `targets`: `Vec<usize>` of length `m` (destination of each edge)
//! - `weights`: `Vec<Weight>` of length `m` (original, possibly negative, weight)

use crate::error::LoadError;
use crate::graph::{Weight, MAX_EDGE_WEIGHT, MIN_EDGE_WEIGHT};

/// An immutable weighted CSR graph.
///
/// Vertices are the dense range `[0, node_count())`. The outgoing edges of `u`
/// are the edge ids `offsets[u]..offsets[u + 1]`.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_sorted_edges` | \(O(n + m)\) | Builds CSR from a source-grouped edge list |
/// | `out_edges` | \(O(1)\) | Returns iterator over `(edge_id, target, weight)` |
/// | `degree` | \(O(1)\) | Returns out-degree |
/// | `source_of` | \(O(\log n)\) | Binary search over offsets |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    weights: Vec<Weight>,
}

impl CsrGraph {
    /// Builds a CSR graph directly from CSR parts.
    ///
    /// # Errors
    /// Returns [`LoadError::InvalidCsr`] if
    /// - `offsets` is empty or does not start at 0,
    /// - offsets are not monotone,
    /// - `offsets.last()`, `targets.len()` and `weights.len()` disagree,
    ///
    /// [`LoadError::VertexOutOfRange`] if a target is not a vertex, and
    /// [`LoadError::WeightOutOfRange`] for a weight outside
    /// [`MIN_EDGE_WEIGHT`]`..=`[`MAX_EDGE_WEIGHT`].
    pub fn from_csr_parts(
        offsets: Vec<usize>,
        targets: Vec<usize>,
        weights: Vec<Weight>,
    ) -> Result<Self, LoadError> {
        let Some(&m) = offsets.last() else {
            return Err(LoadError::InvalidCsr("offsets must have length n+1".into()));
        };
        if offsets[0] != 0 {
            return Err(LoadError::InvalidCsr("offsets must start at 0".into()));
        }
        if offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(LoadError::InvalidCsr("offsets must be monotone".into()));
        }
        if m != targets.len() || m != weights.len() {
            return Err(LoadError::InvalidCsr(format!(
                "offsets end at {m} but there are {} targets and {} weights",
                targets.len(),
                weights.len()
            )));
        }
        let n = offsets.len() - 1;
        if let Some(edge) = targets.iter().position(|&v| v >= n) {
            return Err(LoadError::VertexOutOfRange {
                edge,
                vertex: i64::try_from(targets[edge]).unwrap_or(i64::MAX),
                nnode: n,
            });
        }
        if let Some(edge) = weights.iter().position(|&w| !edge_weight_in_range(w)) {
            return Err(weight_out_of_range(edge, weights[edge]));
        }

        Ok(Self {
            offsets,
            targets,
            weights,
        })
    }

    /// Builds a CSR graph from `(source, target, weight)` triples grouped by
    /// ascending source.
    ///
    /// Vertices that never appear as a source, including every vertex after the
    /// last observed source, get the empty range at the position where they
    /// would have started.
    ///
    /// # Errors
    /// - [`LoadError::VertexOutOfRange`] if an endpoint is `>= nnode`
    /// - [`LoadError::UnsortedEdges`] if a source is smaller than its predecessor's
    /// - [`LoadError::WeightOutOfRange`] for a weight outside
    ///   [`MIN_EDGE_WEIGHT`]`..=`[`MAX_EDGE_WEIGHT`]
    pub fn from_sorted_edges<I>(nnode: usize, edges: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (usize, usize, Weight)>,
    {
        let edges = edges.into_iter();
        let (lower, _) = edges.size_hint();

        let mut offsets = Vec::with_capacity(nnode + 1);
        let mut targets = Vec::with_capacity(lower);
        let mut weights = Vec::with_capacity(lower);
        offsets.push(0);

        let mut previous = 0usize;
        for (edge, (u, v, w)) in edges.enumerate() {
            for vertex in [u, v] {
                if vertex >= nnode {
                    return Err(LoadError::VertexOutOfRange {
                        edge,
                        vertex: i64::try_from(vertex).unwrap_or(i64::MAX),
                        nnode,
                    });
                }
            }
            if !edge_weight_in_range(w) {
                return Err(weight_out_of_range(edge, w));
            }
            if u < previous {
                return Err(LoadError::UnsortedEdges {
                    edge,
                    source_vertex: u,
                    previous,
                });
            }
            // Close every row up to and including `u - 1`.
            while offsets.len() <= u {
                offsets.push(edge);
            }
            previous = u;
            targets.push(v);
            weights.push(w);
        }

        // Pad the remaining rows (and the sentinel) with the edge count.
        let m = targets.len();
        offsets.resize(nnode + 1, m);

        Ok(Self {
            offsets,
            targets,
            weights,
        })
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len() - 1
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Row offsets, length `node_count() + 1`.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Destination vertex of every edge.
    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Original weight of every edge.
    #[inline]
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// Edge-id range of the outgoing edges of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn edge_range(&self, node: usize) -> core::ops::Range<usize> {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.offsets[node]..self.offsets[node + 1]
    }

    /// Returns the outgoing edges of `node` as `(edge_id, target, weight)`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    pub fn out_edges(&self, node: usize) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        self.edge_range(node)
            .map(move |e| (e, self.targets[e], self.weights[e]))
    }

    /// Returns the out-degree of a node.
    pub fn degree(&self, node: usize) -> usize {
        self.edge_range(node).len()
    }

    /// Returns the source vertex of edge `edge`.
    ///
    /// # Panics
    /// Panics if `edge >= edge_count()`.
    pub fn source_of(&self, edge: usize) -> usize {
        assert!(edge < self.edge_count(), "edge {edge} out of bounds");
        // The owning row is the last one whose start is <= edge.
        self.offsets.partition_point(|&start| start <= edge) - 1
    }

    /// Iterates over every edge as `(source, target, weight)` in edge-id order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        (0..self.node_count()).flat_map(move |u| self.out_edges(u).map(move |(_, v, w)| (u, v, w)))
    }
}

fn edge_weight_in_range(weight: Weight) -> bool {
    (MIN_EDGE_WEIGHT..=MAX_EDGE_WEIGHT).contains(&weight)
}

fn weight_out_of_range(edge: usize, weight: Weight) -> LoadError {
    LoadError::WeightOutOfRange {
        edge,
        weight,
        min: MIN_EDGE_WEIGHT,
        max: MAX_EDGE_WEIGHT,
    }
}

#[cfg(test)]
mod tests;
