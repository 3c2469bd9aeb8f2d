//! # `johnson` - Parallel All-Pairs Shortest Paths
//!
//! Johnson's algorithm over a compressed sparse row graph with signed integer
//! weights: Bellman-Ford potentials from a virtual super-source make every
//! edge non-negative, then one Dijkstra run per vertex fills a dense
//! distance/predecessor matrix.
//!
//! ## Guarantees
//!
//! ### Determinism
//! - **Worker-count independence**: potentials, reweighted edges, distances
//!   and predecessors are identical for every `threads >= 1`.
//! - **Stable tie-breaking**: vertices with equal tentative distance are settled
//!   lowest id first under both [`Selection`] strategies.
//!
//! ### Concurrency
//! - **Disjoint writes**: Bellman-Ford passes run over the reverse adjacency so
//!   each task writes a single distance cell; the all-pairs sweep hands every
//!   worker its own matrix rows.
//! - **Read-only sharing**: the graph and reweighted edges are shared by
//!   reference and never mutated after construction.
//!
//! ### Failure
//! - **Negative cycles** are a typed [`JohnsonError::NegativeCycle`]; no
//!   partial matrix is produced.
//! - **Malformed input** is rejected by the loader and CSR constructors with
//!   a [`LoadError`].
//!
//! ## Architecture
//!
//! 1. **Graph store** ([`CsrGraph`]): offsets, targets and weights, edges
//!    grouped by source, every vertex with a (possibly empty) row.
//! 2. **Reverse adjacency** ([`ReverseCsr`]): incoming edges per vertex, built
//!    by a stable counting sort.
//! 3. **Reweighter** ([`apsp::bellman_ford`]): potentials and
//!    `new_weight[e] = weight[e] + h[u] - h[v]`.
//! 4. **All-pairs runner** ([`apsp::dijkstra`]): per-source Dijkstra over
//!    `new_weight`, tracking original-weight distances directly.
//!
//! ## Example
//!
//! ```rust
//! use johnson::{CsrGraph, Johnson, JohnsonConfig};
//!
//! let graph = CsrGraph::from_sorted_edges(
//!     4,
//!     [(0, 1, 1), (0, 2, 4), (1, 2, 2), (2, 3, 1), (3, 1, -3)],
//! )
//! .unwrap();
//!
//! let solution = Johnson::new(&graph, JohnsonConfig::default().with_threads(2))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(solution.paths().distance_row(0), &[0, 1, 3, 4]);
//! assert_eq!(solution.paths().path(0, 3), Some(vec![0, 1, 2, 3]));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod apsp;
pub mod cancel;
pub mod config;
pub mod error;
pub mod graph;
pub mod instrument;
pub mod io;

pub use apsp::{all_pairs_shortest_paths, Johnson, JohnsonStats, Reweighting, Solution};
pub use cancel::CancellationToken;
pub use config::{JohnsonConfig, Selection};
pub use error::{GenerateError, JohnsonError, LoadError};
pub use graph::{
    CsrGraph, PathMatrix, ReverseCsr, Weight, INFINITY, MAX_EDGE_WEIGHT, MIN_EDGE_WEIGHT,
    NO_PREDECESSOR,
};
pub use instrument::{Activity, TimingReport, Timings};
