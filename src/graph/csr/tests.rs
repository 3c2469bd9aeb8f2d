//! Tests for CSR graph implementation.

use super::*;

fn sample() -> CsrGraph {
    // 0 -> 1 (1), 2 (4)
    // 1 -> 2 (2)
    // 2 -> 3 (1)
    // 3 -> 1 (-3)
    CsrGraph::from_sorted_edges(4, [(0, 1, 1), (0, 2, 4), (1, 2, 2), (2, 3, 1), (3, 1, -3)])
        .unwrap()
}

#[test]
fn test_from_sorted_edges_layout() {
    let graph = sample();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.offsets(), &[0, 2, 3, 4, 5]);
    assert_eq!(graph.targets(), &[1, 2, 2, 3, 1]);
    assert_eq!(graph.weights(), &[1, 4, 2, 1, -3]);
}

#[test]
fn test_out_edges_and_degree() {
    let graph = sample();
    let out: Vec<_> = graph.out_edges(0).collect();
    assert_eq!(out, vec![(0, 1, 1), (1, 2, 4)]);
    assert_eq!(graph.degree(0), 2);
    assert_eq!(graph.degree(3), 1);
}

#[test]
fn test_trailing_vertices_are_padded_not_aliased() {
    // Vertices 2..5 have no outgoing edges; they must not alias vertex 0's range.
    let graph = CsrGraph::from_sorted_edges(5, [(0, 1, 7), (1, 4, 2)]).unwrap();
    assert_eq!(graph.offsets(), &[0, 1, 2, 2, 2, 2]);
    for u in 2..5 {
        assert_eq!(graph.degree(u), 0);
        assert_eq!(graph.out_edges(u).count(), 0);
    }
}

#[test]
fn test_leading_and_interior_gaps() {
    // 0 and 2 have no outgoing edges.
    let graph = CsrGraph::from_sorted_edges(4, [(1, 0, 1), (3, 2, 1), (3, 0, 5)]).unwrap();
    assert_eq!(graph.offsets(), &[0, 0, 1, 1, 3]);
    assert_eq!(graph.degree(0), 0);
    assert_eq!(graph.degree(2), 0);
    assert_eq!(graph.degree(3), 2);
}

#[test]
fn test_source_of_skips_empty_rows() {
    let graph = CsrGraph::from_sorted_edges(4, [(1, 0, 1), (3, 2, 1), (3, 0, 5)]).unwrap();
    assert_eq!(graph.source_of(0), 1);
    assert_eq!(graph.source_of(1), 3);
    assert_eq!(graph.source_of(2), 3);
}

#[test]
fn test_edges_round_trip() {
    let input = vec![(0, 1, 1), (0, 2, 4), (1, 2, 2), (2, 3, 1), (3, 1, -3)];
    let graph = CsrGraph::from_sorted_edges(4, input.clone()).unwrap();
    assert_eq!(graph.edges().collect::<Vec<_>>(), input);
}

#[test]
fn test_rejects_unsorted_sources() {
    let err = CsrGraph::from_sorted_edges(3, [(1, 0, 1), (0, 2, 1)]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnsortedEdges {
            edge: 1,
            source_vertex: 0,
            previous: 1
        }
    ));
}

#[test]
fn test_rejects_out_of_range_endpoint() {
    let err = CsrGraph::from_sorted_edges(2, [(0, 2, 1)]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::VertexOutOfRange {
            edge: 0,
            vertex: 2,
            nnode: 2
        }
    ));
}

#[test]
fn test_from_csr_parts_reconstruction() {
    let graph = CsrGraph::from_csr_parts(vec![0, 2, 3, 3], vec![1, 2, 2], vec![5, -1, 0]).unwrap();
    assert_eq!(graph, CsrGraph::from_sorted_edges(3, [(0, 1, 5), (0, 2, -1), (1, 2, 0)]).unwrap());
}

#[test]
fn test_from_csr_parts_validation() {
    assert!(CsrGraph::from_csr_parts(vec![], vec![], vec![]).is_err());
    assert!(CsrGraph::from_csr_parts(vec![1, 1], vec![0], vec![0]).is_err());
    assert!(CsrGraph::from_csr_parts(vec![0, 2, 1], vec![0, 1], vec![0, 0]).is_err());
    assert!(CsrGraph::from_csr_parts(vec![0, 1], vec![0], vec![]).is_err());
    assert!(matches!(
        CsrGraph::from_csr_parts(vec![0, 1], vec![3], vec![0]),
        Err(LoadError::VertexOutOfRange { vertex: 3, .. })
    ));
}

#[test]
fn test_empty_graph() {
    let graph = CsrGraph::from_sorted_edges(0, []).unwrap();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);

    let isolated = CsrGraph::from_sorted_edges(3, []).unwrap();
    assert_eq!(isolated.offsets(), &[0, 0, 0, 0]);
}

#[test]
fn test_weight_range_boundaries() {
    let graph =
        CsrGraph::from_sorted_edges(2, [(0, 1, MAX_EDGE_WEIGHT), (1, 0, MIN_EDGE_WEIGHT)]).unwrap();
    assert_eq!(graph.weights(), &[MAX_EDGE_WEIGHT, MIN_EDGE_WEIGHT]);

    assert!(matches!(
        CsrGraph::from_sorted_edges(2, [(0, 1, 1), (1, 0, MAX_EDGE_WEIGHT + 1)]),
        Err(LoadError::WeightOutOfRange { edge: 1, .. })
    ));
    assert!(matches!(
        CsrGraph::from_sorted_edges(2, [(0, 1, MIN_EDGE_WEIGHT - 1)]),
        Err(LoadError::WeightOutOfRange { edge: 0, .. })
    ));
    assert!(matches!(
        CsrGraph::from_sorted_edges(2, [(0, 1, i64::MAX)]),
        Err(LoadError::WeightOutOfRange { weight: i64::MAX, .. })
    ));
}

#[test]
fn test_from_csr_parts_weight_range() {
    assert!(CsrGraph::from_csr_parts(vec![0, 1, 1], vec![1], vec![MIN_EDGE_WEIGHT]).is_ok());
    assert!(matches!(
        CsrGraph::from_csr_parts(vec![0, 1, 1], vec![1], vec![i64::MIN]),
        Err(LoadError::WeightOutOfRange { edge: 0, weight: i64::MIN, .. })
    ));
    assert!(matches!(
        CsrGraph::from_csr_parts(vec![0, 1, 1], vec![1], vec![MAX_EDGE_WEIGHT + 1]),
        Err(LoadError::WeightOutOfRange { .. })
    ));
}
