//! Graph storage for the shortest-path engine.
//!
//! - `csr`: the immutable forward graph (`node/edge/weight`)
//! - `reverse`: the incoming-edge index derived from it
//! - `matrix`: the dense distance/predecessor result tables

pub mod csr;
pub mod matrix;
pub mod reverse;

pub use csr::CsrGraph;
pub use matrix::PathMatrix;
pub use reverse::ReverseCsr;

/// Edge weight and path length type.
pub type Weight = i64;

/// Smallest accepted edge weight.
///
/// Weights are limited to the 32-bit range so that path lengths, potentials
/// and reweighted distances stay well inside `Weight` and below [`INFINITY`].
#[allow(clippy::cast_lossless)]
pub const MIN_EDGE_WEIGHT: Weight = i32::MIN as Weight;

/// Largest accepted edge weight. See [`MIN_EDGE_WEIGHT`].
#[allow(clippy::cast_lossless)]
pub const MAX_EDGE_WEIGHT: Weight = i32::MAX as Weight;

/// Distance sentinel for unreachable pairs.
pub const INFINITY: Weight = Weight::MAX;

/// Predecessor sentinel for pairs with no path.
pub const NO_PREDECESSOR: usize = usize::MAX;
