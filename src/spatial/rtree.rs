//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Nearest neighbor
//! - Point-in-radius
//! - Box containment

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use tracing::debug;

use crate::graph::{Graph, GraphId, Node};
use crate::point::Point;

/// A node position stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NodePoint {
    index: u32,
    position: [f64; 3],
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }

    fn contains_point(&self, point: &[f64; 3]) -> bool {
        self.position == *point
    }
}

/// Snapshot spatial index over the nodes of one graph.
///
/// Built in one pass with R*-tree bulk loading. Nodes added to the graph
/// afterwards are not indexed; build a new snapshot to pick them up.
/// Results are handles of the graph the snapshot was built from.
pub struct SpatialIndex {
    graph: GraphId,
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Create an empty index, bound to no graph.
    pub fn new() -> Self {
        Self {
            graph: GraphId::INVALID,
            tree: RTree::new(),
        }
    }

    /// Index every node of `graph`.
    ///
    /// Nodes with a non-finite coordinate are left out of the tree and never
    /// match a query.
    pub fn build(graph: &Graph) -> Self {
        let points: Vec<_> = graph
            .positions()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(i, p)| NodePoint {
                index: i as u32,
                position: p.to_array(),
            })
            .collect();

        let skipped = graph.size() - points.len();
        if skipped > 0 {
            debug!(skipped, "left non-finite positions out of spatial index");
        }
        debug!(nodes = points.len(), "building spatial index");
        Self {
            graph: graph.id(),
            tree: RTree::bulk_load(points),
        }
    }

    /// Tag of the graph this index was built from.
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    /// Find the nearest node to a point.
    ///
    /// Returns `None` for a query point with a non-finite coordinate.
    pub fn nearest(&self, p: Point) -> Option<Node> {
        if !p.is_finite() {
            return None;
        }
        self.tree
            .nearest_neighbor(&p.to_array())
            .map(|np| self.handle(np))
    }

    /// Find the nearest node within a maximum distance.
    ///
    /// A negative or NaN `max_distance` matches nothing.
    pub fn nearest_within(&self, p: Point, max_distance: f64) -> Option<Node> {
        if max_distance.is_nan() || max_distance < 0.0 || !p.is_finite() {
            return None;
        }
        let query = p.to_array();
        self.tree
            .nearest_neighbor(&query)
            .filter(|np| np.distance_2(&query) <= max_distance * max_distance)
            .map(|np| self.handle(np))
    }

    /// Find all nodes within `radius` of a point, in index order.
    ///
    /// A negative or NaN `radius` matches nothing.
    pub fn within_radius(&self, p: Point, radius: f64) -> Vec<Node> {
        if radius.is_nan() || radius < 0.0 || !p.is_finite() {
            return Vec::new();
        }
        let mut found: Vec<_> = self
            .tree
            .locate_within_distance(p.to_array(), radius * radius)
            .map(|np| self.handle(np))
            .collect();
        found.sort_unstable();
        found
    }

    /// Find all nodes inside the box spanned by `min` and `max`, in index order.
    ///
    /// Corners may be infinite. A NaN coordinate matches nothing.
    pub fn in_box(&self, min: Point, max: Point) -> Vec<Node> {
        let (min, max) = (min.to_array(), max.to_array());
        if min.iter().chain(&max).any(|c| c.is_nan()) {
            return Vec::new();
        }
        let envelope = AABB::from_corners(min, max);
        let mut found: Vec<_> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|np| self.handle(np))
            .collect();
        found.sort_unstable();
        found
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    fn handle(&self, np: &NodePoint) -> Node {
        Node::new(self.graph, np.index)
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Build a [`SpatialIndex`] over the current nodes.
    pub fn spatial_index(&self) -> SpatialIndex {
        SpatialIndex::build(self)
    }
}
