//! Johnson's algorithm: Bellman-Ford reweighting, then one Dijkstra per vertex.
//!
//! [`Johnson`] owns the configuration and builds a dedicated rayon pool for
//! each computation. Worker count only changes how fast the answer arrives:
//! potentials, reweighted edges and distances are identical for every
//! `threads >= 1`.

pub mod bellman_ford;
pub mod dijkstra;

use serde::Serialize;

use crate::cancel::CancellationToken;
use crate::config::JohnsonConfig;
use crate::error::JohnsonError;
use crate::graph::{CsrGraph, PathMatrix, Weight};
use crate::instrument::{Activity, Timings};

pub use bellman_ford::Reweighting;
pub use dijkstra::DijkstraStats;

/// Work counters for a full computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JohnsonStats {
    /// Bellman-Ford relaxation passes.
    pub bellman_ford_passes: usize,
    /// Dijkstra counters summed over every source.
    pub dijkstra: DijkstraStats,
}

/// A successful all-pairs computation.
#[derive(Debug, Clone)]
pub struct Solution {
    reweighting: Reweighting,
    paths: PathMatrix,
    stats: JohnsonStats,
}

impl Solution {
    /// Potentials and reweighted edges.
    pub fn reweighting(&self) -> &Reweighting {
        &self.reweighting
    }

    /// Distance and predecessor tables.
    pub fn paths(&self) -> &PathMatrix {
        &self.paths
    }

    /// Work counters.
    pub fn stats(&self) -> JohnsonStats {
        self.stats
    }

    /// Shortest distance from `src` to `dst` in original weights.
    pub fn distance(&self, src: usize, dst: usize) -> Option<Weight> {
        self.paths.distance(src, dst)
    }
}

/// All-pairs shortest paths over one immutable graph.
///
/// ```
/// use johnson::{CsrGraph, Johnson, JohnsonConfig};
///
/// let graph = CsrGraph::from_sorted_edges(3, [(0, 1, 4), (1, 2, -2)]).unwrap();
/// let solution = Johnson::new(&graph, JohnsonConfig::sequential()).run().unwrap();
/// assert_eq!(solution.distance(0, 2), Some(2));
/// assert_eq!(solution.distance(2, 0), None);
/// ```
#[derive(Debug, Clone)]
pub struct Johnson<'g> {
    graph: &'g CsrGraph,
    config: JohnsonConfig,
    cancel: CancellationToken,
}

impl<'g> Johnson<'g> {
    /// Prepares a computation over `graph`.
    pub fn new(graph: &'g CsrGraph, config: JohnsonConfig) -> Self {
        Self {
            graph,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `token` to stop the computation early.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &JohnsonConfig {
        &self.config
    }

    /// Runs only the reweighting phase.
    ///
    /// # Errors
    /// See [`run_with_timings`](Self::run_with_timings).
    pub fn reweight(&self) -> Result<Reweighting, JohnsonError> {
        let pool = self.build_pool()?;
        pool.install(|| bellman_ford::reweight(self.graph, &self.cancel))
    }

    /// Runs the full computation.
    ///
    /// # Errors
    /// See [`run_with_timings`](Self::run_with_timings).
    pub fn run(&self) -> Result<Solution, JohnsonError> {
        self.run_with_timings(&Timings::disabled())
    }

    /// Runs the full computation, reporting phase times into `timings`.
    ///
    /// # Errors
    /// - [`JohnsonError::InvalidConfig`] for zero threads or chunk size
    /// - [`JohnsonError::ThreadPool`] if the worker pool cannot be built
    /// - [`JohnsonError::NegativeCycle`] if the graph has a negative-weight cycle;
    ///   no distances are produced in that case
    /// - [`JohnsonError::Cancelled`] if the cancellation token fires
    pub fn run_with_timings(&self, timings: &Timings) -> Result<Solution, JohnsonError> {
        let _total = timings.track(Activity::Johnson);
        let _span = tracing::info_span!(
            "johnson",
            nnode = self.graph.node_count(),
            nedge = self.graph.edge_count(),
            threads = self.config.threads
        )
        .entered();

        let pool = {
            let _t = timings.track(Activity::Overhead);
            self.build_pool()?
        };

        let reweighting = {
            let _t = timings.track(Activity::BellmanFord);
            pool.install(|| bellman_ford::reweight(self.graph, &self.cancel))?
        };

        let (paths, dijkstra) = {
            let _t = timings.track(Activity::Dijkstra);
            pool.install(|| {
                dijkstra::all_pairs(self.graph, reweighting.new_weight(), &self.config, &self.cancel)
            })?
        };

        let stats = JohnsonStats {
            bellman_ford_passes: reweighting.passes(),
            dijkstra,
        };
        tracing::info!(
            passes = stats.bellman_ford_passes,
            settled = stats.dijkstra.settled,
            "all-pairs shortest paths computed"
        );

        Ok(Solution {
            reweighting,
            paths,
            stats,
        })
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool, JohnsonError> {
        self.config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("johnson-worker-{i}"))
            .build()?;
        Ok(pool)
    }
}

/// Runs Johnson's algorithm on `graph` with `config`.
///
/// ```
/// use johnson::{all_pairs_shortest_paths, CsrGraph, JohnsonConfig};
///
/// let graph = CsrGraph::from_sorted_edges(2, [(0, 1, -3)]).unwrap();
/// let solution = all_pairs_shortest_paths(&graph, JohnsonConfig::sequential()).unwrap();
/// assert_eq!(solution.distance(0, 1), Some(-3));
/// ```
///
/// # Errors
/// See [`Johnson::run_with_timings`].
pub fn all_pairs_shortest_paths(graph: &CsrGraph, config: JohnsonConfig) -> Result<Solution, JohnsonError> {
    Johnson::new(graph, config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_records_phase_timings() {
        let graph = CsrGraph::from_sorted_edges(3, [(0, 1, 1), (1, 2, -1)]).unwrap();
        let timings = Timings::new(true);
        let solution = Johnson::new(&graph, JohnsonConfig::sequential())
            .run_with_timings(&timings)
            .unwrap();
        assert_eq!(solution.distance(0, 2), Some(0));

        let recorded: Vec<_> = timings
            .report()
            .activities
            .iter()
            .map(|a| a.activity)
            .collect();
        assert!(recorded.contains(&Activity::BellmanFord));
        assert!(recorded.contains(&Activity::Dijkstra));
    }

    #[test]
    fn engine_keeps_its_config() {
        let graph = CsrGraph::from_sorted_edges(2, [(0, 1, 3)]).unwrap();
        let config = JohnsonConfig::sequential().with_chunk_size(5);
        let engine = Johnson::new(&graph, config.clone());
        assert_eq!(engine.config(), &config);
        assert!(engine.run().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let graph = CsrGraph::from_sorted_edges(1, []).unwrap();
        let err = all_pairs_shortest_paths(&graph, JohnsonConfig::default().with_threads(0)).unwrap_err();
        assert!(matches!(err, JohnsonError::InvalidConfig(_)));
    }

    #[test]
    fn stats_cover_both_phases() {
        let graph = CsrGraph::from_sorted_edges(2, [(0, 1, -1)]).unwrap();
        let solution = all_pairs_shortest_paths(&graph, JohnsonConfig::sequential()).unwrap();
        let stats = solution.stats();
        assert_eq!(stats.bellman_ford_passes, 2);
        assert_eq!(stats.dijkstra.settled, 3);
    }
}
