//! Graph construction settings.

/// Capacity hints used when creating a [`Graph`](crate::Graph).
///
/// Neither value is a limit; both only pre-size the node store and the
/// edge enumeration list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Expected number of nodes (default: 0).
    pub node_capacity: usize,
    /// Expected number of edges (default: 0).
    pub edge_capacity: usize,
}

impl GraphConfig {
    /// Settings sized for a mesh with roughly `nodes` vertices.
    ///
    /// Surface meshes carry about three edges per vertex, which is the
    /// edge hint used here.
    pub fn for_mesh(nodes: usize) -> Self {
        Self {
            node_capacity: nodes,
            edge_capacity: nodes.saturating_mul(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let config = GraphConfig::default();
        assert_eq!(config.node_capacity, 0);
        assert_eq!(config.edge_capacity, 0);
    }

    #[test]
    fn test_for_mesh() {
        let config = GraphConfig::for_mesh(100);
        assert_eq!(config.node_capacity, 100);
        assert_eq!(config.edge_capacity, 300);
    }
}
