//! Search nodes and the per-search node arena
//!
//! Parent links are arena indices rather than references, so a chain can be
//! walked while the arena keeps growing, and the whole search is dropped in one
//! `reset()`.

use crate::board::Hex;

// ============================================================================
// TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One entry of an A* search
#[derive(Clone, Copy, Debug)]
pub struct SearchNode {
    pub hex: Hex,
    /// Steps from the start
    pub g: u32,
    /// Estimated steps to the goal
    pub h: u32,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    /// Frontier key
    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Nodes are the same search entry when they sit on the same tile; cost and
/// parent are ignored.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}

impl Eq for SearchNode {}

// ============================================================================
// ARENA
// ============================================================================

/// Flat node storage reused across searches
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Hand out a fresh node; every field is written, nothing carries over
    pub fn alloc(&mut self, hex: Hex, g: u32, h: u32, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode { hex, g, h, parent });
        id
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Retained storage, kept across resets
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drop all nodes of the finished search
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Walk the parent chain from `id` and return the tiles from the first step
    /// after the chain's root up to and including `id`'s tile.
    pub fn path_to(&self, id: NodeId) -> Vec<Hex> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            path.push(node.hex);
            current = node.parent;
        }
        // The root is the start tile, which a path never includes
        path.pop();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_cost() {
        let a = SearchNode { hex: Hex::new(1, 2), g: 3, h: 4, parent: None };
        let b = SearchNode { hex: Hex::new(1, 2), g: 9, h: 0, parent: Some(NodeId(0)) };
        let c = SearchNode { hex: Hex::new(2, 1), g: 3, h: 4, parent: None };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.f(), 7);
    }

    #[test]
    fn test_path_to_drops_root() {
        let mut arena = NodeArena::default();
        let root = arena.alloc(Hex::new(0, 0), 0, 2, None);
        let mid = arena.alloc(Hex::new(1, 0), 1, 1, Some(root));
        let end = arena.alloc(Hex::new(2, 0), 2, 0, Some(mid));
        assert_eq!(arena.path_to(end), vec![Hex::new(1, 0), Hex::new(2, 0)]);
        assert!(arena.path_to(root).is_empty());
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut arena = NodeArena::with_capacity(16);
        for i in 0..10 {
            arena.alloc(Hex::new(i, 0), i as u32, 0, None);
        }
        let capacity = arena.capacity();
        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), capacity);

        let id = arena.alloc(Hex::new(5, 5), 0, 0, None);
        assert_eq!(id, NodeId(0));
        assert_eq!(arena.get(id).parent, None);
        assert_eq!(arena.get(id).g, 0);
    }
}
