//! Graph - the 3-D undirected graph container.
//!
//! The Graph owns a node store (positions in insertion order) and an edge
//! index (unique unordered pairs with per-node hash adjacency). It is the
//! only place where [`Node`] and [`Edge`] handles are minted.

use tracing::{debug, trace};

use super::edge::Edge;
use super::edge_index::EdgeIndex;
use super::node::{GraphId, Node};
use super::store::{MAX_NODES, NodeStore};
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::point::{Bounds, Point};

/// A 3-D undirected graph with positioned nodes and unique edges.
///
/// Nodes and edges are append-only; `clear()` is the only removal. Node
/// identities are dense, start at 0, and equal insertion order. Edge
/// enumeration is append-only as well, so `edge(i)` never changes meaning
/// until the next `clear()`.
///
/// Node identities are `u32`, so a graph holds at most `u32::MAX` nodes.
/// `add_node` panics past that limit; `add_nodes_from_positions` returns
/// [`GraphError::TooManyNodes`] instead.
///
/// # Example
///
/// ```
/// use spatial_graph::{Graph, Point};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Point::new(0.0, 0.0, 0.0));
/// let b = graph.add_node(Point::new(1.0, 0.0, 0.0));
/// let e = graph.add_edge(a, b);
///
/// assert!(graph.has_edge(b, a));
/// assert_eq!(e.length(&graph), 1.0);
/// ```
#[derive(Debug)]
pub struct Graph {
    /// Tag stamped on every handle this graph issues.
    id: GraphId,

    /// Node positions.
    nodes: NodeStore,

    /// Edge list and adjacency.
    edges: EdgeIndex,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            id: GraphId::next(),
            nodes: NodeStore::default(),
            edges: EdgeIndex::default(),
        }
    }

    /// Create a graph with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            id: GraphId::next(),
            nodes: NodeStore::with_capacity(node_capacity),
            edges: EdgeIndex::with_capacity(node_capacity, edge_capacity),
        }
    }

    /// Create a graph sized by `config`.
    pub fn with_config(config: &GraphConfig) -> Self {
        Self::with_capacity(config.node_capacity, config.edge_capacity)
    }

    /// Tag of this graph instance. Changes on every `clear()`.
    #[inline]
    pub fn id(&self) -> GraphId {
        self.id
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Number of nodes. O(1).
    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Synonym for [`size`](Graph::size).
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.size()
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Add a node at `position` and return its handle.
    ///
    /// The new node's index equals the node count before the call. Panics if
    /// the graph already holds `u32::MAX` nodes.
    pub fn add_node(&mut self, position: impl Into<Point>) -> Node {
        let index = self.nodes.push(position.into());
        self.edges.grow_to(self.nodes.len());
        Node::new(self.id, index)
    }

    /// Add nodes from a flat `[x0, y0, z0, x1, y1, z1, ...]` buffer.
    ///
    /// Returns the number of nodes added. Nothing is added when the buffer
    /// length is not a multiple of 3 or the nodes would not fit.
    pub fn add_nodes_from_positions(&mut self, positions: &[f64]) -> Result<usize> {
        if positions.len() % 3 != 0 {
            return Err(GraphError::RaggedPositions(positions.len()));
        }

        let count = positions.len() / 3;
        if !self.nodes.has_room(count) {
            return Err(GraphError::TooManyNodes {
                requested: count,
                len: self.nodes.len(),
                limit: MAX_NODES,
            });
        }
        self.nodes.reserve(count);
        for xyz in positions.chunks_exact(3) {
            self.nodes.push(Point::new(xyz[0], xyz[1], xyz[2]));
        }
        self.edges.grow_to(self.nodes.len());

        debug!(added = count, total = self.nodes.len(), "bulk-loaded nodes");
        Ok(count)
    }

    /// Whether `node` is a current node of this graph.
    ///
    /// Handles from another graph, from before a `clear()`, or
    /// default-constructed handles are all rejected.
    #[inline]
    pub fn has_node(&self, node: Node) -> bool {
        node.graph_id() == self.id && node.index() < self.nodes.len()
    }

    /// The node with index `i`.
    ///
    /// `i` must be less than `num_nodes()`; this is checked only in debug
    /// builds. See [`try_node`](Graph::try_node) for a checked lookup.
    #[inline]
    pub fn node(&self, i: usize) -> Node {
        debug_assert!(i < self.nodes.len(), "node index {i} out of range");
        Node::new(self.id, i as u32)
    }

    /// The node with index `i`, or an error if it does not exist.
    pub fn try_node(&self, i: usize) -> Result<Node> {
        if i < self.nodes.len() {
            Ok(Node::new(self.id, i as u32))
        } else {
            Err(GraphError::NodeOutOfRange {
                index: i,
                len: self.nodes.len(),
            })
        }
    }

    /// Position of `node`. Panics if `node` is out of range.
    #[inline]
    pub fn position(&self, node: Node) -> &Point {
        debug_assert_eq!(node.graph_id(), self.id, "{node} belongs to another graph");
        self.nodes.position_of(node.raw())
    }

    /// All nodes, in index order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = Node> + '_ {
        (0..self.nodes.len() as u32).map(|i| Node::new(self.id, i))
    }

    /// All positions, in index order.
    pub fn positions(&self) -> &[Point] {
        self.nodes.as_slice()
    }

    /// Nodes sharing an edge with `node`, in no particular order.
    pub fn neighbors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.has_node(node)
            .then_some(node.raw())
            .into_iter()
            .flat_map(|u| self.edges.neighbors(u))
            .map(|v| Node::new(self.id, v))
    }

    /// Number of edges incident to `node` (0 for foreign handles).
    pub fn degree(&self, node: Node) -> usize {
        if self.has_node(node) {
            self.edges.degree(node.raw())
        } else {
            0
        }
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Number of edges. O(1).
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The edge with index `i`.
    ///
    /// `i` must be less than `num_edges()`. Endpoints come back in the order
    /// they were first passed to `add_edge`.
    #[inline]
    pub fn edge(&self, i: usize) -> Edge {
        let (u, v) = self.edges.pair(i);
        Edge::new(self.id, u, v)
    }

    /// The edge with index `i`, or an error if it does not exist.
    pub fn try_edge(&self, i: usize) -> Result<Edge> {
        if i < self.edges.len() {
            Ok(self.edge(i))
        } else {
            Err(GraphError::EdgeOutOfRange {
                index: i,
                len: self.edges.len(),
            })
        }
    }

    /// All edges, in index order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> + '_ {
        self.edges
            .pairs()
            .iter()
            .map(|&(u, v)| Edge::new(self.id, u, v))
    }

    /// Whether an edge joins `a` and `b`, in either order.
    ///
    /// Returns `false` when either handle is not a node of this graph.
    /// Expected O(1): one hash probe on the lower-degree endpoint.
    pub fn has_edge(&self, a: Node, b: Node) -> bool {
        self.has_node(a) && self.has_node(b) && self.edges.contains(a.raw(), b.raw())
    }

    /// The stored edge joining `a` and `b`, if any.
    pub fn find_edge(&self, a: Node, b: Node) -> Option<Edge> {
        if !self.has_node(a) || !self.has_node(b) {
            return None;
        }
        self.edges
            .find(a.raw(), b.raw())
            .map(|i| self.edge(i as usize))
    }

    /// Enumeration index of `edge`, if it is an edge of this graph.
    pub fn edge_index(&self, edge: Edge) -> Option<usize> {
        let (a, b) = edge.nodes();
        if !self.has_node(a) || !self.has_node(b) {
            return None;
        }
        self.edges.find(a.raw(), b.raw()).map(|i| i as usize)
    }

    /// Add an edge between `a` and `b`, or return the existing one.
    ///
    /// The returned edge has `node1() == a` and `node2() == b`. If the pair
    /// is already connected, nothing changes and the result compares equal
    /// to the stored edge.
    ///
    /// `a` and `b` must be distinct nodes of this graph; this is checked only
    /// in debug builds. See [`try_add_edge`](Graph::try_add_edge).
    pub fn add_edge(&mut self, a: Node, b: Node) -> Edge {
        debug_assert!(self.has_node(a), "{a} is not a node of this graph");
        debug_assert!(self.has_node(b), "{b} is not a node of this graph");
        debug_assert_ne!(a, b, "self-loop on {a}");

        let (index, added) = self.edges.insert(a.raw(), b.raw());
        if !added {
            trace!(edge = index, "{a}-{b} already connected");
        }
        Edge::new(self.id, a.raw(), b.raw())
    }

    /// Checked [`add_edge`](Graph::add_edge).
    pub fn try_add_edge(&mut self, a: Node, b: Node) -> Result<Edge> {
        for node in [a, b] {
            if !self.has_node(node) {
                return Err(GraphError::ForeignNode(node.index()));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(a.index()));
        }
        Ok(self.add_edge(a, b))
    }

    /// Add edges from a flat `[a0, b0, a1, b1, ...]` buffer of node indices.
    ///
    /// Pairs naming a missing node or a self-loop are skipped. Returns the
    /// number of edges that were newly added.
    pub fn add_edges_from_pairs(&mut self, pairs: &[u32]) -> usize {
        let node_count = self.nodes.len();
        let mut added = 0;
        let mut skipped = 0;

        for pair in pairs.chunks_exact(2) {
            let (u, v) = (pair[0], pair[1]);
            if u == v || u as usize >= node_count || v as usize >= node_count {
                skipped += 1;
                continue;
            }
            if self.edges.insert(u, v).1 {
                added += 1;
            }
        }

        debug!(added, skipped, total = self.edges.len(), "bulk-loaded edges");
        added
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions_flat(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.nodes.len() * 3);
        for p in self.nodes.iter() {
            flat.extend_from_slice(&p.to_array());
        }
        flat
    }

    /// Edge endpoints as `[a0, b0, a1, b1, ...]`, in edge index order.
    pub fn edge_pairs_flat(&self) -> Vec<u32> {
        let mut flat = Vec::with_capacity(self.edges.len() * 2);
        for &(u, v) in self.edges.pairs() {
            flat.push(u);
            flat.push(v);
        }
        flat
    }

    /// Adjacency in CSR format.
    ///
    /// Returns `[offsets..., targets...]` where `offsets` has
    /// `num_nodes() + 1` elements. Every edge appears in both endpoints'
    /// rows, so there are `2 * num_edges()` targets. Within a row,
    /// neighbors follow edge index order.
    pub fn edges_csr(&self) -> Vec<u32> {
        let node_count = self.nodes.len();
        let pairs = self.edges.pairs();

        let mut offsets = vec![0u32; node_count + 1];
        for &(u, v) in pairs {
            offsets[u as usize + 1] += 1;
            offsets[v as usize + 1] += 1;
        }

        // Prefix sum
        for i in 1..=node_count {
            offsets[i] += offsets[i - 1];
        }

        let mut targets = vec![0u32; pairs.len() * 2];
        let mut cursor = offsets[..node_count].to_vec();
        for &(u, v) in pairs {
            targets[cursor[u as usize] as usize] = v;
            cursor[u as usize] += 1;
            targets[cursor[v as usize] as usize] = u;
            cursor[v as usize] += 1;
        }

        let mut result = Vec::with_capacity(offsets.len() + targets.len());
        result.extend(offsets);
        result.extend(targets);
        result
    }

    /// Degree of every node, in index order.
    pub fn degrees(&self) -> Vec<u32> {
        (0..self.nodes.len() as u32)
            .map(|i| self.edges.degree(i) as u32)
            .collect()
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Bounding box of all node positions, or `None` for an empty graph.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes.bounds()
    }

    /// Remove all nodes and edges.
    ///
    /// The graph takes a fresh tag, so every handle issued before the call
    /// is rejected by `has_node`, `has_edge` and the `try_*` methods.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "clearing graph"
        );
        self.nodes.clear();
        self.edges.clear();
        self.id = GraphId::next();
    }
}

// A clone is a distinct instance: it takes its own tag, so handles issued by
// one copy are not accepted by the other.
impl Clone for Graph {
    fn clone(&self) -> Self {
        Self {
            id: GraphId::next(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
