//! Property-based tests for graph invariants.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::{Edge, Graph, Point};

/// Strategy for generating a node count and a list of candidate edges.
///
/// Pairs may repeat, appear reversed, or be self-loops; the test filters
/// self-loops before calling `add_edge`.
fn arb_graph_input() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..24).prop_flat_map(|n| {
        let pairs = prop::collection::vec((0..n, 0..n), 0..80);
        (Just(n), pairs)
    })
}

fn build(n: usize, pairs: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_node(Point::new(i as f64, 0.0, 0.0));
    }
    for &(u, v) in pairs {
        if u != v {
            let (a, b) = (graph.node(u), graph.node(v));
            graph.add_edge(a, b);
        }
    }
    graph
}

proptest! {
    #[test]
    fn edge_count_matches_distinct_pairs((n, pairs) in arb_graph_input()) {
        let graph = build(n, &pairs);

        let distinct: BTreeSet<(usize, usize)> = pairs
            .iter()
            .filter(|(u, v)| u != v)
            .map(|&(u, v)| (u.min(v), u.max(v)))
            .collect();
        prop_assert_eq!(graph.num_edges(), distinct.len());

        let stored: BTreeSet<Edge> = graph.edges().collect();
        prop_assert_eq!(stored.len(), graph.num_edges());
    }

    #[test]
    fn has_edge_is_symmetric((n, pairs) in arb_graph_input()) {
        let graph = build(n, &pairs);

        for a in graph.nodes() {
            for b in graph.nodes() {
                prop_assert_eq!(graph.has_edge(a, b), graph.has_edge(b, a));
            }
            prop_assert!(!graph.has_edge(a, a));
        }
    }

    #[test]
    fn add_edge_is_idempotent((n, pairs) in arb_graph_input()) {
        let mut graph = build(n, &pairs);
        let before = graph.num_edges();

        for i in 0..before {
            let edge = graph.edge(i);
            let again = graph.add_edge(edge.node2(), edge.node1());
            prop_assert_eq!(again, edge);
            prop_assert_eq!(again.node1(), edge.node2());
        }
        prop_assert_eq!(graph.num_edges(), before);
    }

    #[test]
    fn handle_order_is_trichotomous((n, pairs) in arb_graph_input()) {
        let graph = build(n, &pairs);
        let edges: Vec<Edge> = graph.edges().collect();

        for e1 in &edges {
            for e2 in &edges {
                let outcomes = [e1 == e2, e1 < e2, e2 < e1];
                prop_assert_eq!(outcomes.iter().filter(|&&x| x).count(), 1);
            }
        }

        for a in graph.nodes() {
            for b in graph.nodes() {
                let outcomes = [a == b, a < b, b < a];
                prop_assert_eq!(outcomes.iter().filter(|&&x| x).count(), 1);
            }
        }
    }

    #[test]
    fn node_indices_are_dense(n in 0usize..64) {
        let mut graph = Graph::new();
        for i in 0..n {
            let before = graph.num_nodes();
            let p = Point::new(i as f64, -(i as f64), 1.0);
            let node = graph.add_node(p);

            prop_assert_eq!(node.index(), before);
            prop_assert_eq!(graph.num_nodes(), before + 1);
            prop_assert_eq!(*node.position(&graph), p);
            prop_assert!(graph.has_node(node));
        }
        for i in 0..n {
            prop_assert_eq!(graph.node(i).index(), i);
        }
    }
}
