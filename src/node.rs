//! Tree vertices and the slot arena that owns them.
//!
//! Nodes never hold references to each other. Every link is a `NodeId`
//! into the `Arena`, so a node's parent pointer is a plain index and can
//! never keep anything alive.

use crate::{Key, Sum};
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Index of a node slot inside an `Arena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A tree vertex, augmented with the sum of all keys in its subtree.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) sum: Sum,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl Node {
    #[inline]
    fn new(key: Key) -> Node {
        Node {
            key,
            sum: Sum::from(key),
            parent: None,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug)]
enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<NodeId> },
}

/// Node storage. Released slots are chained into a free list and reused by
/// later allocations.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free: Option<NodeId>,
    len: usize,
}

impl Arena {
    #[inline]
    pub(crate) const fn new() -> Arena {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Arena {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: None,
            len: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Create a detached node holding `key`.
    pub(crate) fn alloc(&mut self, key: Key) -> NodeId {
        self.len += 1;
        match self.free {
            Some(id) => {
                self.free = match self.slots[id.0] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                self.slots[id.0] = Slot::Occupied(Node::new(key));
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Slot::Occupied(Node::new(key)));
                id
            }
        }
    }

    /// Return the slot to the free list. The caller must already have
    /// unlinked the node from its tree.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(matches!(self.slots[id.0], Slot::Occupied(_)));
        self.slots[id.0] = Slot::Vacant {
            next_free: self.free,
        };
        self.free = Some(id);
        self.len -= 1;
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("use of released node {:?}", id),
        }
    }
}

impl IndexMut<NodeId> for Arena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("use of released node {:?}", id),
        }
    }
}
