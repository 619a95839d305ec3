//! Conversion into petgraph, for running its algorithms on a snapshot.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

use super::engine::Graph;
use crate::point::Point;

impl Graph {
    /// Copy this graph into a petgraph `StableUnGraph`.
    ///
    /// Node weights are positions and `NodeIndex::new(i)` is node `i`. Edges
    /// are added in edge index order, so petgraph edge index `i` is
    /// `edge(i)`.
    pub fn to_petgraph(&self) -> StableUnGraph<Point, ()> {
        let mut graph = StableUnGraph::with_capacity(self.num_nodes(), self.num_edges());
        for &position in self.positions() {
            graph.add_node(position);
        }
        for edge in self.edges() {
            graph.add_edge(
                NodeIndex::new(edge.node1().index()),
                NodeIndex::new(edge.node2().index()),
                (),
            );
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_petgraph_preserves_structure() {
        let mut graph = Graph::new();
        let a = graph.add_node([0.0, 0.0, 0.0]);
        let b = graph.add_node([1.0, 0.0, 0.0]);
        let c = graph.add_node([0.0, 1.0, 0.0]);
        graph.add_edge(a, b);
        graph.add_edge(c, b);

        let pg = graph.to_petgraph();
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 2);
        assert_eq!(pg[NodeIndex::new(1)], Point::new(1.0, 0.0, 0.0));

        assert!(pg.find_edge(NodeIndex::new(1), NodeIndex::new(0)).is_some());
        assert!(pg.find_edge(NodeIndex::new(1), NodeIndex::new(2)).is_some());
        assert!(pg.find_edge(NodeIndex::new(0), NodeIndex::new(2)).is_none());
        assert_eq!(pg.neighbors(NodeIndex::new(1)).count(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let pg = Graph::new().to_petgraph();
        assert_eq!(pg.node_count(), 0);
        assert_eq!(pg.edge_count(), 0);
    }
}
