//! Per-source Dijkstra over reweighted edges, and the all-pairs sweep.
//!
//! Each run settles vertices by reweighted (non-negative) tentative distance
//! and carries the original-weight distance along: when `v` improves through
//! edge `e = (u -> v)`, its true distance becomes `true[u] + weight[e]`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ops::{Add, AddAssign};

use rayon::prelude::*;
use serde::Serialize;

use crate::cancel::CancellationToken;
use crate::config::{JohnsonConfig, Selection};
use crate::error::JohnsonError;
use crate::graph::{CsrGraph, PathMatrix, Weight, INFINITY, NO_PREDECESSOR};

/// Work counters for one or more Dijkstra runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DijkstraStats {
    /// Vertices settled.
    pub settled: u64,
    /// Strictly improving relaxations.
    pub relaxations: u64,
}

impl Add for DijkstraStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            settled: self.settled + rhs.settled,
            relaxations: self.relaxations + rhs.relaxations,
        }
    }
}

impl AddAssign for DijkstraStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Per-worker buffers reused across the sources a worker processes.
#[derive(Debug)]
pub struct Scratch {
    tentative: Vec<Weight>,
    settled: Vec<bool>,
    heap: BinaryHeap<Reverse<(Weight, usize)>>,
}

impl Scratch {
    /// Allocates buffers for graphs with `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            tentative: vec![INFINITY; n],
            settled: vec![false; n],
            heap: BinaryHeap::new(),
        }
    }

    fn reset(&mut self) {
        self.tentative.fill(INFINITY);
        self.settled.fill(false);
        self.heap.clear();
    }
}

/// Single-source Dijkstra from `src` over `new_weight`.
///
/// Fills `dist_row` with original-weight distances ([`INFINITY`] when
/// unreachable) and `pred_row` with predecessors ([`NO_PREDECESSOR`] when
/// unreachable, `src` for `src` itself). Vertices with equal tentative
/// distance are settled lowest id first under either [`Selection`].
///
/// # Panics
/// Panics if `src` is out of bounds or a row or scratch buffer is not
/// `node_count()` long.
pub fn dijkstra(
    graph: &CsrGraph,
    new_weight: &[Weight],
    src: usize,
    selection: Selection,
    scratch: &mut Scratch,
    dist_row: &mut [Weight],
    pred_row: &mut [usize],
) -> DijkstraStats {
    let n = graph.node_count();
    assert!(src < n, "source {src} out of bounds");
    assert_eq!(dist_row.len(), n, "distance row must have node_count entries");
    assert_eq!(pred_row.len(), n, "predecessor row must have node_count entries");
    assert_eq!(scratch.tentative.len(), n, "scratch sized for a different graph");

    scratch.reset();
    dist_row.fill(INFINITY);
    pred_row.fill(NO_PREDECESSOR);
    scratch.tentative[src] = 0;
    dist_row[src] = 0;
    pred_row[src] = src;

    let mut run = Run {
        graph,
        selection,
        new_weight,
        scratch,
        dist_row,
        pred_row,
        stats: DijkstraStats::default(),
    };
    match selection {
        Selection::Scan => run.by_scan(),
        Selection::Heap => run.by_heap(src),
    }
    run.stats
}

struct Run<'a> {
    graph: &'a CsrGraph,
    selection: Selection,
    new_weight: &'a [Weight],
    scratch: &'a mut Scratch,
    dist_row: &'a mut [Weight],
    pred_row: &'a mut [usize],
    stats: DijkstraStats,
}

impl Run<'_> {
    fn by_scan(&mut self) {
        for _ in 0..self.graph.node_count() {
            let Some(u) = self.min_unsettled() else {
                break;
            };
            self.settle(u);
        }
    }

    fn by_heap(&mut self, src: usize) {
        self.scratch.heap.push(Reverse((0, src)));
        while let Some(Reverse((d, u))) = self.scratch.heap.pop() {
            if self.scratch.settled[u] || d > self.scratch.tentative[u] {
                continue;
            }
            self.settle(u);
        }
    }

    /// Lowest-id unsettled vertex with the smallest finite tentative distance.
    fn min_unsettled(&self) -> Option<usize> {
        let mut best = None;
        let mut best_distance = INFINITY;
        for (v, (&d, &done)) in self
            .scratch
            .tentative
            .iter()
            .zip(&self.scratch.settled)
            .enumerate()
        {
            if !done && d < best_distance {
                best = Some(v);
                best_distance = d;
            }
        }
        best
    }

    fn settle(&mut self, u: usize) {
        self.scratch.settled[u] = true;
        self.stats.settled += 1;

        let base = self.scratch.tentative[u];
        for (e, v, w) in self.graph.out_edges(u) {
            let candidate = base + self.new_weight[e];
            if candidate < self.scratch.tentative[v] {
                self.scratch.tentative[v] = candidate;
                self.dist_row[v] = self.dist_row[u] + w;
                self.pred_row[v] = u;
                self.stats.relaxations += 1;
                if self.selection == Selection::Heap {
                    self.scratch.heap.push(Reverse((candidate, v)));
                }
            }
        }
    }
}

/// Runs Dijkstra from every vertex and collects the rows into a [`PathMatrix`].
///
/// Rows are distributed over the ambient rayon pool with work stealing; each
/// worker takes at least `config.chunk_size` sources at a time.
///
/// # Errors
/// Returns [`JohnsonError::Cancelled`] if `cancel` fires; it is checked before
/// every per-source run.
pub fn all_pairs(
    graph: &CsrGraph,
    new_weight: &[Weight],
    config: &JohnsonConfig,
    cancel: &CancellationToken,
) -> Result<(PathMatrix, DijkstraStats), JohnsonError> {
    let n = graph.node_count();
    let _span = tracing::info_span!("all_pairs_dijkstra", nnode = n, threads = config.threads).entered();

    let mut matrix = PathMatrix::new(n);
    if n == 0 {
        return Ok((matrix, DijkstraStats::default()));
    }

    let selection = config.selection;
    let verbose = config.verbose;
    let (dist, pred) = matrix.rows_mut();
    let stats = dist
        .par_chunks_mut(n)
        .zip(pred.par_chunks_mut(n))
        .enumerate()
        .with_min_len(config.chunk_size)
        .map_init(
            || Scratch::new(n),
            |scratch, (src, (dist_row, pred_row))| {
                if cancel.is_cancelled() {
                    return Err(JohnsonError::Cancelled);
                }
                if verbose {
                    tracing::info!(source = src, "dijkstra started");
                } else {
                    tracing::trace!(source = src, "dijkstra started");
                }
                Ok(dijkstra(graph, new_weight, src, selection, scratch, dist_row, pred_row))
            },
        )
        .try_reduce(DijkstraStats::default, |a, b| Ok(a + b))?;

    tracing::debug!(settled = stats.settled, relaxations = stats.relaxations, "all-pairs sweep finished");
    Ok((matrix, stats))
}
