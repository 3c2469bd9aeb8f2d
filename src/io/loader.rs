//! Edge-list loader.
//!
//! ```text
//! 4          <- vertex count
//! 5          <- edge count
//! 0 1 1      <- src dst weight, grouped by ascending src
//! 0 2 4
//! ...
//! ```
//!
//! Only the first token of each header line is read. Blank lines in the body
//! are skipped and tokens after the third on an edge line are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;
use crate::graph::{CsrGraph, Weight};

const PREALLOCATE_EDGES: usize = 1 << 16;

/// Opens and parses the graph file at `path`.
///
/// # Errors
/// [`LoadError::Open`] if the file cannot be opened, otherwise as [`parse_graph`].
pub fn load_graph(path: impl AsRef<Path>) -> Result<CsrGraph, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_graph(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        nnode = graph.node_count(),
        nedge = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parses an edge-list graph from `reader`.
///
/// # Errors
/// Every [`LoadError`] variant except `Open`; see the variant docs.
pub fn parse_graph<R: BufRead>(reader: R) -> Result<CsrGraph, LoadError> {
    let mut lines = reader.lines();

    let nnode = header(lines.next().transpose()?, 1)?;
    let nedge = header(lines.next().transpose()?, 2)?;

    // The declared count is untrusted; it only sizes the first allocation.
    let mut edges: Vec<(usize, usize, Weight)> = Vec::with_capacity(nedge.min(PREALLOCATE_EDGES));
    for (index, line) in lines.enumerate() {
        let line = line?;
        let lineno = index + 3;
        if line.trim().is_empty() {
            continue;
        }

        let (u, v, w) = edge_line(&line).ok_or_else(|| LoadError::MalformedEdge {
            line: lineno,
            text: line.clone(),
        })?;
        let edge = edges.len();
        let u = vertex(u, edge, nnode)?;
        let v = vertex(v, edge, nnode)?;
        edges.push((u, v, Weight::from(w)));
    }

    if edges.len() != nedge {
        return Err(LoadError::EdgeCountMismatch {
            declared: nedge,
            found: edges.len(),
        });
    }

    CsrGraph::from_sorted_edges(nnode, edges)
}

fn header(line: Option<String>, lineno: usize) -> Result<usize, LoadError> {
    let line = line.ok_or(LoadError::MissingHeader { line: lineno })?;
    let Some(token) = line.split_whitespace().next() else {
        return Err(LoadError::MissingHeader { line: lineno });
    };
    token.parse().map_err(|_| LoadError::MalformedHeader {
        line: lineno,
        text: line.clone(),
    })
}

fn edge_line(line: &str) -> Option<(i64, i64, i32)> {
    let mut tokens = line.split_whitespace();
    let u = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    let w = tokens.next()?.parse().ok()?;
    Some((u, v, w))
}

fn vertex(raw: i64, edge: usize, nnode: usize) -> Result<usize, LoadError> {
    usize::try_from(raw)
        .ok()
        .filter(|&v| v < nnode)
        .ok_or(LoadError::VertexOutOfRange {
            edge,
            vertex: raw,
            nnode,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<CsrGraph, LoadError> {
        parse_graph(text.as_bytes())
    }

    #[test]
    fn parses_sample() {
        let graph = parse("4\n5\n0 1 1\n0 2 4\n1 2 2\n2 3 1\n3 1 -3\n").unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.offsets(), &[0, 2, 3, 4, 5]);
        assert_eq!(graph.targets(), &[1, 2, 2, 3, 1]);
        assert_eq!(graph.weights(), &[1, 4, 2, 1, -3]);
    }

    #[test]
    fn pads_trailing_vertices() {
        let graph = parse("5\n1\n1 0 7\n").unwrap();
        assert_eq!(graph.offsets(), &[0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn header_trailing_tokens_and_blank_lines_are_ignored() {
        let graph = parse("3 vertices\n2 edges\n\n0 1 5\n\n1 2 6 extra\n").unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weights(), &[5, 6]);
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(parse(""), Err(LoadError::MissingHeader { line: 1 })));
        assert!(matches!(parse("3\n"), Err(LoadError::MissingHeader { line: 2 })));
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(matches!(
            parse("three\n0\n"),
            Err(LoadError::MalformedHeader { line: 1, .. })
        ));
        assert!(matches!(
            parse("3\n-1\n"),
            Err(LoadError::MalformedHeader { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_short_edge_line() {
        let err = parse("3\n2\n0 1 5\n1 2\n").unwrap_err();
        match err {
            LoadError::MalformedEdge { line, text } => {
                assert_eq!(line, 4);
                assert_eq!(text, "1 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_count_mismatch() {
        assert!(matches!(
            parse("3\n3\n0 1 5\n1 2 6\n"),
            Err(LoadError::EdgeCountMismatch {
                declared: 3,
                found: 2
            })
        ));
        assert!(matches!(
            parse("3\n1\n0 1 5\n1 2 6\n"),
            Err(LoadError::EdgeCountMismatch {
                declared: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_out_of_range_and_negative_vertices() {
        assert!(matches!(
            parse("2\n1\n0 2 1\n"),
            Err(LoadError::VertexOutOfRange { edge: 0, vertex: 2, nnode: 2 })
        ));
        assert!(matches!(
            parse("2\n1\n-1 0 1\n"),
            Err(LoadError::VertexOutOfRange { vertex: -1, .. })
        ));
    }

    #[test]
    fn huge_declared_count_is_a_mismatch() {
        assert!(matches!(
            parse(&format!("2\n{}\n", usize::MAX)),
            Err(LoadError::EdgeCountMismatch {
                declared: usize::MAX,
                found: 0
            })
        ));
        assert!(matches!(
            parse(&format!("2\n{}\n0 1 1\n", usize::MAX / 2)),
            Err(LoadError::EdgeCountMismatch { found: 1, .. })
        ));
    }

    #[test]
    fn rejects_unsorted_sources() {
        assert!(matches!(
            parse("3\n2\n1 2 1\n0 1 1\n"),
            Err(LoadError::UnsortedEdges { edge: 1, .. })
        ));
    }

    #[test]
    fn weights_beyond_i32_are_malformed() {
        assert!(matches!(
            parse("2\n1\n0 1 3000000000\n"),
            Err(LoadError::MalformedEdge { line: 3, .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_graph("/nonexistent/graph.txt").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/graph.txt"));
    }
}
