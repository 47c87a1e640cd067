//! Vec-backed node arena with freelist slot reuse.
//!
//! All nodes of a fake tree live in one arena and refer to each other by
//! `NodeId`. Removing a node frees its slot onto a freelist so later
//! insertions reuse it; ids are only valid while their slot is occupied.

use std::ops::{Index, IndexMut};

use super::id::NodeId;
use super::node::FakeNode;

/// Internal slot representation.
enum Slot {
    /// Slot is free; stores the index of the next free slot in the freelist.
    Vacant(usize),
    /// Slot is occupied by a node.
    Occupied(FakeNode),
}

/// Arena of fake filesystem nodes.
pub struct NodeArena {
    slots: Vec<Slot>,
    /// Logical node count (occupied slots only).
    len: usize,
    /// Head of the freelist (index of the next available slot).
    next: usize,
}

impl NodeArena {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            next: 0,
        }
    }

    /// Inserts a node, returning its stable id.
    pub fn insert(&mut self, node: FakeNode) -> NodeId {
        let key = self.next;
        if key == self.slots.len() {
            self.slots.push(Slot::Occupied(node));
            self.next = self.slots.len();
        } else {
            // Reusing a vacant slot from the freelist.
            let slot = &mut self.slots[key];
            let next_free = match slot {
                Slot::Vacant(next) => *next,
                Slot::Occupied(_) => unreachable!("freelist head unexpectedly occupied"),
            };
            *slot = Slot::Occupied(node);
            self.next = next_free;
        }
        self.len += 1;
        NodeId::new(key)
    }

    /// Removes the node at `id`, returning it if the slot was occupied.
    pub fn remove(&mut self, id: NodeId) -> Option<FakeNode> {
        let key = id.get();
        let slot = self.slots.get_mut(key)?;
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }
        let removed = std::mem::replace(slot, Slot::Vacant(self.next));
        self.next = key;
        self.len -= 1;
        match removed {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => unreachable!("vacancy checked above"),
        }
    }

    /// Gets a reference to the node at `id`.
    pub fn get(&self, id: NodeId) -> Option<&FakeNode> {
        match self.slots.get(id.get()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Gets a mutable reference to the node at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut FakeNode> {
        match self.slots.get_mut(id.get()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = FakeNode;

    fn index(&self, id: NodeId) -> &FakeNode {
        self.get(id).expect("invalid node id")
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut FakeNode {
        self.get_mut(id).expect("invalid node id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{FsContext, NodeMetadata};

    fn dir_node(name: &str) -> FakeNode {
        let context = FsContext::default();
        FakeNode::directory(name, NodeMetadata::directory(&context))
    }

    #[test]
    fn insert_and_get() {
        let mut arena = NodeArena::new();
        let id = arena.insert(dir_node("a"));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena[id].name(), "a");
        assert_eq!(arena.get(id).map(FakeNode::name), Some("a"));
    }

    #[test]
    fn remove_frees_slot() {
        let mut arena = NodeArena::new();
        let id = arena.insert(dir_node("a"));
        let removed = arena.remove(id);
        assert_eq!(removed.map(|n| n.name().to_string()), Some("a".to_string()));
        assert!(arena.get(id).is_none());
        assert!(arena.is_empty());

        // Double remove is a no-op.
        assert!(arena.remove(id).is_none());
    }

    #[test]
    fn freelist_reuses_slots() {
        let mut arena = NodeArena::new();
        let a = arena.insert(dir_node("a"));
        let _b = arena.insert(dir_node("b"));
        arena.remove(a);

        let c = arena.insert(dir_node("c"));
        assert_eq!(c.get(), a.get());
        assert_eq!(arena.len(), 2);
    }
}
