//! Error types for checked graph operations.
//!
//! The unchecked API treats bad indices and self-loops as precondition
//! violations. The `try_*` family reports them through [`GraphError`].

/// Result alias for checked graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors reported by the checked graph API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node index {index} out of range (graph has {len} nodes)")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("edge index {index} out of range (graph has {len} edges)")]
    EdgeOutOfRange { index: usize, len: usize },

    #[error("self-loop on node {0} is not supported")]
    SelfLoop(usize),

    #[error("node {0} does not belong to this graph")]
    ForeignNode(usize),

    #[error("position buffer length {0} is not a multiple of 3")]
    RaggedPositions(usize),

    #[error("cannot add {requested} nodes to a graph holding {len} (limit {limit})")]
    TooManyNodes {
        requested: usize,
        len: usize,
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::NodeOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "node index 7 out of range (graph has 3 nodes)");
        assert_eq!(
            GraphError::SelfLoop(2).to_string(),
            "self-loop on node 2 is not supported"
        );
        let err = GraphError::TooManyNodes {
            requested: 5,
            len: 9,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "cannot add 5 nodes to a graph holding 9 (limit 10)"
        );
    }
}
