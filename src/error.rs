//! Error types for graph loading, generation, and the shortest-path engine.
//!
//! Every failure is recoverable by the caller: a negative-weight cycle is an
//! ordinary `Err` value, never a process exit.

use std::path::PathBuf;

/// Failures raised while reading or constructing a graph.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A header line (vertex or edge count) is absent.
    #[error("missing graph header (line {line})")]
    MissingHeader {
        /// 1-based line number of the missing header.
        line: usize,
    },

    /// A header line does not start with a non-negative integer.
    #[error("malformed graph header (line {line}): {text:?}")]
    MalformedHeader {
        /// 1-based line number.
        line: usize,
        /// Offending line.
        text: String,
    },

    /// An edge line carries fewer than three integers.
    #[error("malformed edge (line {line}): {text:?}")]
    MalformedEdge {
        /// 1-based line number.
        line: usize,
        /// Offending line.
        text: String,
    },

    /// The body does not contain the number of edges the header declares.
    #[error("header declares {declared} edges but {found} were found")]
    EdgeCountMismatch {
        /// Count from line 2.
        declared: usize,
        /// Count actually read.
        found: usize,
    },

    /// An edge endpoint is outside `[0, nnode)`.
    #[error("edge {edge} references vertex {vertex}, but the graph has {nnode} vertices")]
    VertexOutOfRange {
        /// Edge index in input order.
        edge: usize,
        /// Offending endpoint.
        vertex: i64,
        /// Vertex count.
        nnode: usize,
    },

    /// An edge weight lies outside `MIN_EDGE_WEIGHT..=MAX_EDGE_WEIGHT`.
    #[error("edge {edge} has weight {weight}, outside the supported range {min}..={max}")]
    WeightOutOfRange {
        /// Edge index in input order.
        edge: usize,
        /// Offending weight.
        weight: i64,
        /// Smallest accepted weight.
        min: i64,
        /// Largest accepted weight.
        max: i64,
    },

    /// Edges are not grouped by ascending source vertex.
    #[error("edge {edge} has source {source_vertex} after source {previous}; edges must be grouped by ascending source")]
    UnsortedEdges {
        /// Edge index in input order.
        edge: usize,
        /// Source of the offending edge.
        source_vertex: usize,
        /// Source of the preceding edge.
        previous: usize,
    },

    /// CSR parts are inconsistent with each other.
    #[error("invalid CSR layout: {0}")]
    InvalidCsr(String),

    /// The graph file could not be opened.
    #[error("couldn't open graph file {}", path.display())]
    Open {
        /// Requested path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading from the underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures raised by the Johnson engine.
#[derive(Debug, thiserror::Error)]
pub enum JohnsonError {
    /// Reweighting left a negative edge, so the graph has a negative-weight cycle.
    #[error("graph contains a negative weight cycle (edge {edge}: {source_vertex} -> {target})")]
    NegativeCycle {
        /// Lowest edge id whose reweighted value is negative.
        edge: usize,
        /// Source vertex of that edge.
        source_vertex: usize,
        /// Destination vertex of that edge.
        target: usize,
    },

    /// The computation was cancelled through its [`CancellationToken`](crate::CancellationToken).
    #[error("computation cancelled")]
    Cancelled,

    /// The configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be created.
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failures raised by the random graph generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// More edges were requested than distinct vertex pairs exist.
    #[error("cannot place {nedge} edges on {nnode} vertices (at most {max} distinct pairs)")]
    TooManyEdges {
        /// Requested vertex count.
        nnode: usize,
        /// Requested edge count.
        nedge: usize,
        /// Number of distinct unordered pairs.
        max: usize,
    },

    /// The sampled edges did not form a valid graph.
    #[error(transparent)]
    Load(#[from] LoadError),
}
