//! Text output for distance matrices and graphs.

use std::io::{self, Write};

use crate::graph::{CsrGraph, PathMatrix, INFINITY};

const CELL_WIDTH: usize = 5;

/// Writes one line per source, each distance right-aligned to five columns.
/// Unreachable pairs print as `inf`.
///
/// # Errors
/// Propagates write failures.
pub fn write_distance_matrix<W: Write>(mut out: W, matrix: &PathMatrix) -> io::Result<()> {
    for row in matrix.distance_rows() {
        for &d in row {
            if d == INFINITY {
                write!(out, "{:>CELL_WIDTH$}", "inf")?;
            } else {
                write!(out, "{d:>CELL_WIDTH$}")?;
            }
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Writes `graph` in the edge-list format read by
/// [`parse_graph`](crate::io::parse_graph).
///
/// # Errors
/// Propagates write failures.
pub fn write_graph<W: Write>(mut out: W, graph: &CsrGraph) -> io::Result<()> {
    writeln!(out, "{}", graph.node_count())?;
    writeln!(out, "{}", graph.edge_count())?;
    for (u, v, w) in graph.edges() {
        writeln!(out, "{u} {v} {w}")?;
    }
    out.flush()
}
