//! Edge index: unique unordered pairs plus per-node adjacency.
//!
//! Pairs are kept in an append-only list that defines the `edge(i)`
//! enumeration. Each node also owns a hash map from neighbor identity to the
//! index of the connecting edge, so membership tests and dedup on insert cost
//! one hash probe on the endpoint with the smaller degree.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeIndex {
    /// Endpoints of each edge, in insertion order and in the order given.
    pairs: Vec<(u32, u32)>,

    /// neighbor -> edge index, one map per node
    adjacency: Vec<HashMap<u32, u32>>,
}

impl EdgeIndex {
    pub(crate) fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(edge_capacity),
            adjacency: Vec::with_capacity(node_capacity),
        }
    }

    /// Make room in the adjacency table for nodes `[0, node_count)`.
    pub(crate) fn grow_to(&mut self, node_count: usize) {
        if self.adjacency.len() < node_count {
            self.adjacency.resize_with(node_count, HashMap::new);
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Index of the edge joining `u` and `v`, in either order.
    pub(crate) fn find(&self, u: u32, v: u32) -> Option<u32> {
        let (probe, target) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.adjacency
            .get(probe as usize)
            .and_then(|neighbors| neighbors.get(&target))
            .copied()
    }

    #[inline]
    pub(crate) fn contains(&self, u: u32, v: u32) -> bool {
        self.find(u, v).is_some()
    }

    /// Insert `{u, v}` unless already present.
    ///
    /// Returns the edge's index and whether it was newly added. Both
    /// endpoints must already have adjacency slots (see [`grow_to`]).
    ///
    /// [`grow_to`]: EdgeIndex::grow_to
    pub(crate) fn insert(&mut self, u: u32, v: u32) -> (u32, bool) {
        debug_assert_ne!(u, v, "self-loops are not supported");
        if let Some(existing) = self.find(u, v) {
            return (existing, false);
        }

        let index = self.pairs.len() as u32;
        self.pairs.push((u, v));
        self.adjacency[u as usize].insert(v, index);
        self.adjacency[v as usize].insert(u, index);
        (index, true)
    }

    /// Endpoints of edge `i`. Panics if `i` is out of range.
    #[inline]
    pub(crate) fn pair(&self, i: usize) -> (u32, u32) {
        debug_assert!(i < self.pairs.len());
        self.pairs[i]
    }

    pub(crate) fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    #[inline]
    pub(crate) fn degree(&self, u: u32) -> usize {
        self.adjacency.get(u as usize).map_or(0, HashMap::len)
    }

    /// Neighbors of `u`, in no particular order.
    pub(crate) fn neighbors(&self, u: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(u as usize)
            .into_iter()
            .flat_map(|neighbors| neighbors.keys().copied())
    }

    pub(crate) fn clear(&mut self) {
        self.pairs.clear();
        self.adjacency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with_nodes(n: usize) -> EdgeIndex {
        let mut index = EdgeIndex::default();
        index.grow_to(n);
        index
    }

    #[test]
    fn test_insert_and_find() {
        let mut index = index_with_nodes(3);

        assert_eq!(index.insert(0, 1), (0, true));
        assert_eq!(index.insert(1, 2), (1, true));

        assert_eq!(index.find(1, 0), Some(0));
        assert_eq!(index.find(2, 1), Some(1));
        assert_eq!(index.find(0, 2), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut index = index_with_nodes(2);

        assert_eq!(index.insert(0, 1), (0, true));
        assert_eq!(index.insert(1, 0), (0, false));
        assert_eq!(index.insert(0, 1), (0, false));
        assert_eq!(index.len(), 1);
        assert_eq!(index.pair(0), (0, 1));
    }

    #[test]
    fn test_degree_and_neighbors() {
        let mut index = index_with_nodes(4);
        index.insert(0, 1);
        index.insert(0, 2);
        index.insert(3, 0);

        assert_eq!(index.degree(0), 3);
        assert_eq!(index.degree(1), 1);

        let mut neighbors: Vec<_> = index.neighbors(0).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_node_has_no_edges() {
        let index = index_with_nodes(2);
        assert_eq!(index.degree(7), 0);
        assert!(!index.contains(7, 0));
        assert_eq!(index.neighbors(7).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut index = index_with_nodes(2);
        index.insert(0, 1);
        index.clear();
        assert_eq!(index.len(), 0);
        assert_eq!(index.degree(0), 0);
    }
}
