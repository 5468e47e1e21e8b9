//! Open list for A*: node ids kept sorted by ascending f = g + h

use crate::board::Hex;
use crate::node::{NodeArena, NodeId};
use std::collections::VecDeque;

/// Sorted frontier of discovered, not yet expanded nodes.
///
/// Ordering among entries with equal f is unspecified: an insert lands at
/// whatever position the binary search settles on.
#[derive(Debug, Default)]
pub struct Frontier {
    entries: VecDeque<NodeId>,
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Binary-search the slot for the node's f and insert it there
    pub fn insert(&mut self, id: NodeId, arena: &NodeArena) {
        let key = arena.get(id).f();
        let pos = match self
            .entries
            .binary_search_by(|probe| arena.get(*probe).f().cmp(&key))
        {
            Ok(pos) | Err(pos) => pos,
        };
        self.entries.insert(pos, id);
    }

    /// Remove and return the lowest-f entry
    pub fn pop_min(&mut self) -> Option<NodeId> {
        self.entries.pop_front()
    }

    pub fn peek_min(&self) -> Option<NodeId> {
        self.entries.front().copied()
    }

    /// Linear scan for the entry on `hex`
    pub fn find(&self, hex: Hex, arena: &NodeArena) -> Option<NodeId> {
        self.entries
            .iter()
            .copied()
            .find(|&id| arena.get(id).hex == hex)
    }

    pub fn contains(&self, hex: Hex, arena: &NodeArena) -> bool {
        self.find(hex, arena).is_some()
    }

    /// Lower an entry's cost and re-parent it if `g` is strictly cheaper.
    ///
    /// The entry is taken out and re-inserted so the frontier stays sorted.
    /// Returns whether the entry changed.
    pub fn relax(&mut self, id: NodeId, g: u32, parent: Option<NodeId>, arena: &mut NodeArena) -> bool {
        if g >= arena.get(id).g {
            return false;
        }
        if let Some(pos) = self.entries.iter().position(|&e| e == id) {
            self.entries.remove(pos);
        }
        let node = arena.get_mut(id);
        node.g = g;
        node.parent = parent;
        self.insert(id, arena);
        true
    }
}
