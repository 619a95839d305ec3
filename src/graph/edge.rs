//! Edge handle.
//!
//! An [`Edge`] is an unordered pair of distinct nodes. The handle stores the
//! two endpoint identities in the order the caller passed them to
//! `add_edge`, but equality, hashing and ordering ignore that order.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::engine::Graph;
use super::node::{GraphId, Node};

/// Handle to an undirected edge of a [`Graph`].
///
/// The handle keeps endpoint identities rather than an enumeration slot, so
/// it keeps resolving to the same endpoints however many edges are added
/// afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edge {
    graph: GraphId,
    n1: u32,
    n2: u32,
}

impl Edge {
    #[inline]
    pub(crate) fn new(graph: GraphId, n1: u32, n2: u32) -> Self {
        Self { graph, n1, n2 }
    }

    /// One endpoint of this edge.
    #[inline]
    pub fn node1(self) -> Node {
        Node::new(self.graph, self.n1)
    }

    /// The other endpoint of this edge.
    #[inline]
    pub fn node2(self) -> Node {
        Node::new(self.graph, self.n2)
    }

    /// Both endpoints, as `(node1, node2)`.
    #[inline]
    pub fn nodes(self) -> (Node, Node) {
        (self.node1(), self.node2())
    }

    /// The endpoint opposite `node`, or `None` if `node` is not on this edge.
    pub fn other(self, node: Node) -> Option<Node> {
        if node == self.node1() {
            Some(self.node2())
        } else if node == self.node2() {
            Some(self.node1())
        } else {
            None
        }
    }

    /// Tag of the graph that issued this handle.
    #[inline]
    pub fn graph_id(self) -> GraphId {
        self.graph
    }

    /// Whether this handle was issued by some graph.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.graph != GraphId::INVALID
    }

    /// Euclidean distance between the two endpoints.
    pub fn length(self, graph: &Graph) -> f64 {
        graph
            .position(self.node1())
            .distance(*graph.position(self.node2()))
    }

    /// Order-insensitive identity of this edge.
    #[inline]
    fn key(self) -> (GraphId, u32, u32) {
        (self.graph, self.n1.min(self.n2), self.n1.max(self.n2))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}-{})", self.n1, self.n2)
    }
}
