//! Explicit configuration for a Johnson computation.

use serde::{Deserialize, Serialize};

use crate::error::JohnsonError;

/// How Dijkstra picks the next vertex to settle.
///
/// Both strategies settle vertices in `(tentative distance, vertex id)` order,
/// so they report identical distances and predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Linear scan over unsettled vertices, \(O(n^2)\) per source.
    Scan,
    /// Binary heap with lazy deletion, \(O((n + m) \log n)\) per source.
    #[default]
    Heap,
}

/// Settings for [`Johnson`](crate::Johnson).
///
/// `threads == 1` runs every phase on a single worker and produces exactly the
/// same results as any other worker count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JohnsonConfig {
    /// Worker threads in the pool.
    pub threads: usize,
    /// Minimum number of sources a worker takes at once during the Dijkstra sweep.
    pub chunk_size: usize,
    /// Minimum-selection strategy for Dijkstra.
    pub selection: Selection,
    /// Log per-source progress at `info` instead of `trace`.
    pub verbose: bool,
}

impl Default for JohnsonConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, usize::from),
            chunk_size: 32,
            selection: Selection::default(),
            verbose: false,
        }
    }
}

impl JohnsonConfig {
    /// A single-threaded configuration.
    pub fn sequential() -> Self {
        Self::default().with_threads(1)
    }

    /// Sets the worker count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the Dijkstra scheduling chunk.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the minimum-selection strategy.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Enables or disables verbose progress logging.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks that the configuration can run.
    ///
    /// # Errors
    /// Returns [`JohnsonError::InvalidConfig`] for zero threads or a zero chunk size.
    pub fn validate(&self) -> Result<(), JohnsonError> {
        if self.threads == 0 {
            return Err(JohnsonError::InvalidConfig("threads must be > 0".into()));
        }
        if self.chunk_size == 0 {
            return Err(JohnsonError::InvalidConfig("chunk_size must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = JohnsonConfig::default();
        assert!(config.threads >= 1);
        assert_eq!(config.chunk_size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_threads_and_chunk() {
        assert!(matches!(
            JohnsonConfig::default().with_threads(0).validate(),
            Err(JohnsonError::InvalidConfig(_))
        ));
        assert!(matches!(
            JohnsonConfig::default().with_chunk_size(0).validate(),
            Err(JohnsonError::InvalidConfig(_))
        ));
    }

    #[test]
    fn serializes_selection_lowercase() {
        let config = JohnsonConfig::sequential().with_selection(Selection::Scan);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"selection\":\"scan\""));
        let back: JohnsonConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
