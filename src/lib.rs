//! Spatial Graph
//!
//! A 3-D undirected graph container for mesh-processing and simulation code:
//! positioned nodes, unique unordered edges, and lightweight `Node` / `Edge`
//! handles. The crate also compiles to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen for browser viewers.
//!
//! # Architecture
//!
//! - `point`: 3-D point primitive and bounding boxes
//! - `graph`: the graph container, its handles, and petgraph export
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `config` / `error`: construction settings and checked-API errors

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod graph;
pub mod point;
pub mod spatial;

#[cfg(test)]
mod proptest_tests;

pub use config::GraphConfig;
pub use error::GraphError;
pub use graph::{Edge, Graph, GraphId, Node};
pub use point::{Bounds, Point};
pub use spatial::SpatialIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::debug_1(&JsValue::from_str("spatial-graph: module initialized"));
}

/// Main entry point for JavaScript callers.
///
/// This struct wraps a [`Graph`] and exposes it with plain integer node and
/// edge ids. It caches a spatial index for hit testing and drops it whenever
/// nodes are added.
#[wasm_bindgen]
pub struct SpatialGraphWasm {
    graph: Graph,
    spatial: Option<SpatialIndex>,
}

#[wasm_bindgen]
impl SpatialGraphWasm {
    /// Create a new empty graph.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            spatial: None,
        }
    }

    /// Create a graph with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `node_capacity` - Expected number of nodes
    /// * `edge_capacity` - Expected number of edges
    #[wasm_bindgen(js_name = withCapacity)]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: Graph::with_capacity(node_capacity, edge_capacity),
            spatial: None,
        }
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node at the specified position.
    ///
    /// Returns the node id, equal to the node count before the call.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> u32 {
        self.spatial = None;
        self.graph.add_node(Point::new(x, y, z)).index() as u32
    }

    /// Add multiple nodes from a Float64Array of positions.
    ///
    /// The positions array should be [x0, y0, z0, x1, y1, z1, ...].
    /// Returns the number of nodes added.
    #[wasm_bindgen(js_name = addNodesFromPositions)]
    pub fn add_nodes_from_positions(&mut self, positions: &[f64]) -> Result<u32, JsError> {
        let count = self.graph.add_nodes_from_positions(positions)?;
        self.spatial = None;
        Ok(count as u32)
    }

    /// Get the number of nodes in the graph.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.graph.num_nodes() as u32
    }

    /// Get a node's position as [x, y, z].
    #[wasm_bindgen(js_name = getNodePosition)]
    pub fn get_node_position(&self, node_id: u32) -> Option<Vec<f64>> {
        self.graph
            .try_node(node_id as usize)
            .ok()
            .map(|node| self.graph.position(node).to_array().to_vec())
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge between two nodes.
    ///
    /// Returns the edge id. Adding an existing pair returns the id of the
    /// stored edge. Fails for unknown nodes and self-loops.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, a: u32, b: u32) -> Result<u32, JsError> {
        let a = self.graph.try_node(a as usize)?;
        let b = self.graph.try_node(b as usize)?;
        let edge = self.graph.try_add_edge(a, b)?;
        self.graph
            .edge_index(edge)
            .map(|i| i as u32)
            .ok_or_else(|| JsError::new("edge was not stored"))
    }

    /// Add edges from a Uint32Array of pairs.
    ///
    /// The edges array should be [a0, b0, a1, b1, ...]. Invalid pairs and
    /// pairs already connected are skipped.
    /// Returns the number of edges added.
    #[wasm_bindgen(js_name = addEdgesFromPairs)]
    pub fn add_edges_from_pairs(&mut self, edges: &[u32]) -> u32 {
        self.graph.add_edges_from_pairs(edges) as u32
    }

    /// Check whether two nodes are connected, in either order.
    #[wasm_bindgen(js_name = hasEdge)]
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        match (
            self.graph.try_node(a as usize),
            self.graph.try_node(b as usize),
        ) {
            (Ok(a), Ok(b)) => self.graph.has_edge(a, b),
            _ => false,
        }
    }

    /// Get the number of edges in the graph.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph.num_edges() as u32
    }

    /// Get the endpoints of an edge as [a, b].
    #[wasm_bindgen(js_name = getEdge)]
    pub fn get_edge(&self, edge_id: u32) -> Option<Vec<u32>> {
        self.graph.try_edge(edge_id as usize).ok().map(|edge| {
            vec![edge.node1().index() as u32, edge.node2().index() as u32]
        })
    }

    /// Get neighbors of a node.
    ///
    /// Returns a Uint32Array of neighbor node ids, sorted ascending.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        let Ok(node) = self.graph.try_node(node_id as usize) else {
            return Vec::new();
        };
        let mut neighbors: Vec<u32> = self
            .graph
            .neighbors(node)
            .map(|n| n.index() as u32)
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Get a copy of all positions as [x0, y0, z0, x1, y1, z1, ...].
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float64Array {
        Float64Array::from(&self.graph.positions_flat()[..])
    }

    /// Get all edges as [a0, b0, a1, b1, ...] in edge id order.
    #[wasm_bindgen(js_name = getEdgePairs)]
    pub fn get_edge_pairs(&self) -> Vec<u32> {
        self.graph.edge_pairs_flat()
    }

    /// Get the adjacency in CSR format for GPU upload.
    ///
    /// Returns [offsets..., targets...] where offsets has node_count + 1
    /// elements. Every edge is listed under both endpoints.
    #[wasm_bindgen(js_name = getEdgesCsr)]
    pub fn get_edges_csr(&self) -> Vec<u32> {
        self.graph.edges_csr()
    }

    /// Get node degrees as a flat array with node_count elements.
    #[wasm_bindgen(js_name = getNodeDegrees)]
    pub fn get_node_degrees(&self) -> Vec<u32> {
        self.graph.degrees()
    }

    /// Get the bounding box of all nodes.
    ///
    /// Returns `{ min: {x, y, z}, max: {x, y, z} }`, or undefined if the graph is
    /// empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.graph.bounds())?)
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the nearest node to a point.
    ///
    /// Returns the node id, or None if the graph is empty.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&mut self, x: f64, y: f64, z: f64) -> Option<u32> {
        self.spatial_index()
            .nearest(Point::new(x, y, z))
            .map(|n| n.index() as u32)
    }

    /// Find the nearest node within a maximum distance.
    ///
    /// Returns the node id, or None if no node is within the distance.
    #[wasm_bindgen(js_name = findNearestNodeWithin)]
    pub fn find_nearest_node_within(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        max_distance: f64,
    ) -> Option<u32> {
        self.spatial_index()
            .nearest_within(Point::new(x, y, z), max_distance)
            .map(|n| n.index() as u32)
    }

    /// Find all nodes within a radius of a point.
    #[wasm_bindgen(js_name = findNodesInRadius)]
    pub fn find_nodes_in_radius(&mut self, x: f64, y: f64, z: f64, radius: f64) -> Vec<u32> {
        self.spatial_index()
            .within_radius(Point::new(x, y, z), radius)
            .into_iter()
            .map(|n| n.index() as u32)
            .collect()
    }

    /// Find all nodes inside an axis-aligned box.
    #[wasm_bindgen(js_name = findNodesInBox)]
    pub fn find_nodes_in_box(
        &mut self,
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> Vec<u32> {
        self.spatial_index()
            .in_box(
                Point::new(min_x, min_y, min_z),
                Point::new(max_x, max_y, max_z),
            )
            .into_iter()
            .map(|n| n.index() as u32)
            .collect()
    }

    /// Rebuild the spatial index now instead of on the next query.
    #[wasm_bindgen(js_name = rebuildSpatialIndex)]
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial = Some(self.graph.spatial_index());
    }

    /// Clear all nodes and edges.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.spatial = None;
    }
}

impl SpatialGraphWasm {
    /// The wrapped graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn spatial_index(&mut self) -> &SpatialIndex {
        let graph = &self.graph;
        self.spatial.get_or_insert_with(|| graph.spatial_index())
    }
}

impl Default for SpatialGraphWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Build a small tetrahedral mesh the way a mesh loader would: bulk
    /// positions, then one `add_edge` per tetrahedron side, with every
    /// shared side added twice.
    fn two_tetrahedra() -> Graph {
        let mut graph = Graph::new();
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, //
            1.0, 1.0, 1.0,
        ];
        graph.add_nodes_from_positions(&positions).unwrap();

        for tet in [[0, 1, 2, 3], [1, 2, 3, 4]] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    let a = graph.node(tet[i]);
                    let b = graph.node(tet[j]);
                    graph.add_edge(a, b);
                }
            }
        }
        graph
    }

    #[test]
    fn test_mesh_loading_dedups_shared_sides() {
        let graph = two_tetrahedra();

        // 6 + 6 sides, 3 of them shared (1-2, 1-3, 2-3).
        assert_eq!(graph.num_nodes(), 5);
        assert_eq!(graph.num_edges(), 9);
        assert!(!graph.has_edge(graph.node(0), graph.node(4)));
        assert!(graph.has_edge(graph.node(3), graph.node(2)));
    }

    #[test]
    fn test_edge_enumeration_matches_membership() {
        let graph = two_tetrahedra();

        for (i, edge) in graph.edges().enumerate() {
            assert_eq!(graph.edge(i), edge);
            assert!(graph.has_edge(edge.node1(), edge.node2()));
            assert!(graph.has_edge(edge.node2(), edge.node1()));
            assert_eq!(graph.edge_index(edge), Some(i));
        }

        let degree_sum: usize = graph.nodes().map(|n| graph.degree(n)).sum();
        assert_eq!(degree_sum, 2 * graph.num_edges());
    }

    #[test]
    fn test_csr_matches_neighbors() {
        let graph = two_tetrahedra();
        let n = graph.num_nodes();
        let csr = graph.edges_csr();
        let (offsets, targets) = csr.split_at(n + 1);

        assert_eq!(offsets[n] as usize, 2 * graph.num_edges());
        for node in graph.nodes() {
            let i = node.index();
            let mut row = targets[offsets[i] as usize..offsets[i + 1] as usize].to_vec();
            row.sort_unstable();
            let mut expected: Vec<u32> =
                graph.neighbors(node).map(|m| m.index() as u32).collect();
            expected.sort_unstable();
            assert_eq!(row, expected);
        }
    }

    #[test]
    fn test_edge_lengths() {
        let graph = two_tetrahedra();
        let longest = graph
            .edges()
            .map(|e| e.length(&graph))
            .fold(0.0, f64::max);
        assert_eq!(longest, 2f64.sqrt());
    }

    #[test]
    fn test_petgraph_export_matches() {
        let graph = two_tetrahedra();
        let pg = graph.to_petgraph();

        assert_eq!(pg.node_count(), graph.num_nodes());
        assert_eq!(pg.edge_count(), graph.num_edges());
        for node in graph.nodes() {
            let index = petgraph::stable_graph::NodeIndex::new(node.index());
            assert_eq!(pg.neighbors(index).count(), graph.degree(node));
            assert_eq!(pg[index], *graph.position(node));
        }
    }

    #[test]
    fn test_spatial_pick_then_connect() {
        let mut graph = two_tetrahedra();
        let picked = graph
            .spatial_index()
            .nearest(Point::new(0.9, 0.9, 0.8))
            .unwrap();
        assert_eq!(picked.index(), 4);

        let origin = graph.node(0);
        graph.add_edge(origin, picked);
        assert!(graph.has_edge(picked, origin));
        assert_eq!(graph.num_edges(), 10);
    }

    /// The facade paths that never build a JS error value run natively.
    #[test]
    fn test_wasm_facade_native_paths() {
        let mut facade = SpatialGraphWasm::new();
        let a = facade.add_node(0.0, 0.0, 0.0);
        let b = facade.add_node(3.0, 0.0, 0.0);
        let c = facade.add_node(0.0, 4.0, 0.0);

        assert_eq!(facade.add_edges_from_pairs(&[a, b, b, c, b, a]), 2);
        assert!(facade.has_edge(b, a));
        assert!(!facade.has_edge(a, c));
        assert!(!facade.has_edge(a, 99));
        assert_eq!(facade.get_edge(1), Some(vec![b, c]));
        assert_eq!(facade.get_edge(2), None);
        assert_eq!(facade.get_neighbors(b), vec![a, c]);
        assert_eq!(facade.get_node_position(c), Some(vec![0.0, 4.0, 0.0]));

        assert_eq!(facade.find_nearest_node(2.9, 0.1, 0.0), Some(b));
        let d = facade.add_node(2.9, 0.1, 0.0);
        assert_eq!(facade.find_nearest_node(2.9, 0.1, 0.0), Some(d));

        facade.clear();
        assert_eq!(facade.node_count(), 0);
        assert_eq!(facade.edge_count(), 0);
        assert!(facade.graph().is_empty());
    }

    #[test]
    fn test_wasm_facade_hit_testing_skips_nan_nodes() {
        let mut facade = SpatialGraphWasm::new();
        let a = facade.add_node(1.0, 0.0, 0.0);
        facade.add_node(f64::NAN, 0.0, 0.0);

        assert_eq!(facade.find_nearest_node(0.0, 0.0, 0.0), Some(a));
        assert_eq!(facade.find_nodes_in_radius(0.0, 0.0, 0.0, 2.0), vec![a]);
        assert_eq!(facade.find_nearest_node_within(0.0, 0.0, 0.0, -2.0), None);
        assert!(facade.find_nodes_in_radius(0.0, 0.0, 0.0, -2.0).is_empty());
    }
}
