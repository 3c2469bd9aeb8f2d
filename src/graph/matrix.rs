//! Dense all-pairs distance and predecessor tables.
//!
//! Both tables are single contiguous `n × n` buffers in row-major order, so
//! row `s` (every result for source `s`) is one slice. Rows can be split into
//! disjoint mutable slices and handed to different workers without locking.

use crate::graph::{Weight, INFINITY, NO_PREDECESSOR};

/// All-pairs shortest-path results.
///
/// `distance(s, d)` is the shortest path length from `s` to `d` in original
/// weights and `predecessor(s, d)` is the vertex preceding `d` on that path.
/// Unreachable pairs hold [`INFINITY`] / [`NO_PREDECESSOR`] in the raw rows and
/// read back as `None` through the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatrix {
    distance: Vec<Weight>,
    predecessor: Vec<usize>,
    n: usize,
}

impl PathMatrix {
    /// Creates an `n × n` matrix with every pair unreachable.
    pub fn new(n: usize) -> Self {
        Self {
            distance: vec![INFINITY; n * n],
            predecessor: vec![NO_PREDECESSOR; n * n],
            n,
        }
    }

    /// Number of vertices (rows and columns).
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Shortest distance from `src` to `dst`, or `None` if unreachable.
    ///
    /// # Panics
    /// Panics if either vertex is out of bounds.
    #[inline]
    pub fn distance(&self, src: usize, dst: usize) -> Option<Weight> {
        let d = self.distance_row(src)[dst];
        (d != INFINITY).then_some(d)
    }

    /// Predecessor of `dst` on a shortest path from `src`, or `None` if there is no path.
    ///
    /// # Panics
    /// Panics if either vertex is out of bounds.
    #[inline]
    pub fn predecessor(&self, src: usize, dst: usize) -> Option<usize> {
        let p = self.predecessor_row(src)[dst];
        (p != NO_PREDECESSOR).then_some(p)
    }

    /// Raw distance row of `src` (unreachable entries are [`INFINITY`]).
    #[inline]
    pub fn distance_row(&self, src: usize) -> &[Weight] {
        assert!(src < self.n, "source {src} out of bounds");
        &self.distance[src * self.n..(src + 1) * self.n]
    }

    /// Raw predecessor row of `src` (missing entries are [`NO_PREDECESSOR`]).
    #[inline]
    pub fn predecessor_row(&self, src: usize) -> &[usize] {
        assert!(src < self.n, "source {src} out of bounds");
        &self.predecessor[src * self.n..(src + 1) * self.n]
    }

    /// Iterates over the distance rows in source order.
    pub fn distance_rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        // `max(1)` keeps `chunks` valid for the empty matrix.
        self.distance.chunks(self.n.max(1))
    }

    /// Splits both tables into per-source mutable row pairs.
    ///
    /// Each pair is owned exclusively by whoever holds it, which is what lets
    /// the rows be filled concurrently.
    pub(crate) fn rows_mut(&mut self) -> (&mut [Weight], &mut [usize]) {
        (&mut self.distance, &mut self.predecessor)
    }

    /// Reconstructs the vertex sequence of a shortest `src -> dst` path.
    ///
    /// Walks the predecessor chain iteratively from `dst`; the walk is bounded
    /// by `node_count()` steps. Returns `None` if `dst` is unreachable.
    pub fn path(&self, src: usize, dst: usize) -> Option<Vec<usize>> {
        let preds = self.predecessor_row(src);
        let mut path = vec![dst];
        let mut at = dst;
        while at != src {
            let prev = preds[at];
            if prev == NO_PREDECESSOR || path.len() > self.n {
                return None;
            }
            path.push(prev);
            at = prev;
        }
        path.reverse();
        Some(path)
    }
}
