//! Seeded random graphs for experiments and benchmarks.
//!
//! Edges join distinct unordered vertex pairs, so a generated graph has no
//! self-loops, no parallel edges and no 2-cycles. Weights are positive.

use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::error::GenerateError;
use crate::graph::{CsrGraph, Weight};

/// Smallest generated weight.
pub const MIN_WEIGHT: Weight = 1;
/// Largest generated weight.
pub const MAX_WEIGHT: Weight = 10;

/// Samples `nedge` edges over `nnode` vertices, sorted by `(src, dst)`.
///
/// Each edge joins a distinct pair `{i, j}`, gets a weight in
/// `MIN_WEIGHT..=MAX_WEIGHT`, and points `i -> j` or `j -> i` with equal
/// probability. The same arguments always produce the same edges.
///
/// # Errors
/// [`GenerateError::TooManyEdges`] if `nedge` exceeds `nnode * (nnode - 1) / 2`.
pub fn generate_edges(
    nnode: usize,
    nedge: usize,
    seed: u64,
) -> Result<Vec<(usize, usize, Weight)>, GenerateError> {
    let max = pair_count(nnode);
    if nedge > max {
        return Err(GenerateError::TooManyEdges { nnode, nedge, max });
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut picks = index::sample(&mut rng, max, nedge).into_vec();
    picks.sort_unstable();

    // Walk pair indices in row order: row `i` holds pairs (i, i+1..nnode).
    let mut edges = Vec::with_capacity(nedge);
    let mut row = 0;
    let mut row_start = 0;
    for pick in picks {
        while pick >= row_start + (nnode - 1 - row) {
            row_start += nnode - 1 - row;
            row += 1;
        }
        let (i, j) = (row, row + 1 + (pick - row_start));
        let weight = rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT);
        if rng.gen_bool(0.5) {
            edges.push((j, i, weight));
        } else {
            edges.push((i, j, weight));
        }
    }

    edges.sort_unstable();
    Ok(edges)
}

/// Builds a [`CsrGraph`] from [`generate_edges`].
///
/// # Errors
/// As [`generate_edges`].
pub fn generate_graph(nnode: usize, nedge: usize, seed: u64) -> Result<CsrGraph, GenerateError> {
    let edges = generate_edges(nnode, nedge, seed)?;
    tracing::debug!(nnode, nedge, seed, "random graph generated");
    Ok(CsrGraph::from_sorted_edges(nnode, edges)?)
}

/// Conventional file name for a generated graph.
pub fn graph_file_name(nnode: usize, nedge: usize, seed: u64) -> String {
    format!("n{nnode}-e{nedge}-s{seed}.txt")
}

fn pair_count(nnode: usize) -> usize {
    if nnode < 2 {
        return 0;
    }
    let (even, odd) = if nnode % 2 == 0 {
        (nnode / 2, nnode - 1)
    } else {
        (nnode, (nnode - 1) / 2)
    };
    even.saturating_mul(odd)
}
