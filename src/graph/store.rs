//! Node store: positions in insertion order.

use crate::point::{Bounds, Point};

/// Most nodes a graph can hold. Identities are `u32` and `u32::MAX` is
/// never issued.
pub(crate) const MAX_NODES: usize = u32::MAX as usize;

/// Whether `additional` more nodes fit on top of `len`.
#[inline]
pub(crate) fn has_room(len: usize, additional: usize) -> bool {
    additional <= MAX_NODES.saturating_sub(len)
}

/// Contiguous position storage. A node's identity is its slot in `positions`.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeStore {
    positions: Vec<Point>,
}

impl NodeStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
        }
    }

    /// Append a position and return its identity (the pre-call size).
    ///
    /// Panics once the store holds [`MAX_NODES`] positions.
    pub(crate) fn push(&mut self, position: Point) -> u32 {
        assert!(
            has_room(self.positions.len(), 1),
            "node store is full ({MAX_NODES} nodes)"
        );
        let id = self.positions.len() as u32;
        self.positions.push(position);
        id
    }

    /// Whether `additional` more positions fit.
    #[inline]
    pub(crate) fn has_room(&self, additional: usize) -> bool {
        has_room(self.positions.len(), additional)
    }

    /// Stored position of `id`. Panics if `id` is out of range.
    #[inline]
    pub(crate) fn position_of(&self, id: u32) -> &Point {
        debug_assert!((id as usize) < self.positions.len());
        &self.positions[id as usize]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
    }

    pub(crate) fn as_slice(&self) -> &[Point] {
        &self.positions
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.positions.iter()
    }

    /// Bounding box of all stored positions, or `None` when empty.
    pub(crate) fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.positions.split_first()?;
        let mut bounds = Bounds::from_point(*first);
        for &p in rest {
            bounds.include(p);
        }
        Some(bounds)
    }

    pub(crate) fn clear(&mut self) {
        self.positions.clear();
    }
}
