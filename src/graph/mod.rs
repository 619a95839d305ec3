//! Graph data structures and operations.
//!
//! This module provides the 3-D undirected graph container. Positions live
//! in a contiguous node store; edges live in an append-only list backed by
//! per-node hash adjacency for O(1) expected membership checks.

mod convert;
mod edge;
mod edge_index;
mod engine;
mod node;
mod store;

pub use edge::Edge;
pub use engine::Graph;
pub use node::{GraphId, Node};
