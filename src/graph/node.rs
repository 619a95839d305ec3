//! Node handle and graph tag.
//!
//! A [`Node`] is a lightweight view of one vertex:
//! - The tag of the graph that issued it
//! - The node's identity (its insertion rank, starting at 0)
//!
//! Handles own no graph data. Positions are read back through the graph.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::engine::Graph;
use crate::point::Point;

/// Source of process-unique graph tags. Tag 0 is reserved for invalid handles.
static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one graph instance, between two `clear()` calls.
///
/// Handles carry this tag instead of a pointer back to their graph. It is a
/// relation only: holding a tag never keeps a graph alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    /// Tag carried by default-constructed handles.
    pub const INVALID: GraphId = GraphId(0);

    /// Draw a fresh tag.
    pub(crate) fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph({})", self.0)
    }
}

/// Handle to a node of a [`Graph`].
///
/// Valid handles come only from the graph (`add_node`, `node`, `nodes`,
/// `Edge::node1`, ...). `Node::default()` is an invalid handle that no graph
/// recognises.
///
/// Two handles are equal when they name the same identity in the same graph.
/// The ordering sorts by graph tag, then by identity; it has no geometric
/// meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    graph: GraphId,
    index: u32,
}

impl Node {
    #[inline]
    pub(crate) fn new(graph: GraphId, index: u32) -> Self {
        Self { graph, index }
    }

    /// This node's identity, in the range `[0, graph.num_nodes())`.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) fn raw(self) -> u32 {
        self.index
    }

    /// Tag of the graph that issued this handle.
    #[inline]
    pub fn graph_id(self) -> GraphId {
        self.graph
    }

    /// Whether this handle was issued by some graph.
    ///
    /// This does not tell whether that graph still holds the node; use
    /// [`Graph::has_node`] for that.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.graph != GraphId::INVALID
    }

    /// This node's position.
    ///
    /// `graph` must be the graph that issued the handle.
    #[inline]
    pub fn position(self, graph: &Graph) -> &Point {
        graph.position(self)
    }

    /// Number of edges incident to this node.
    #[inline]
    pub fn degree(self, graph: &Graph) -> usize {
        graph.degree(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.index)
    }
}
