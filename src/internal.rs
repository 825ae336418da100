//! The actual splay tree implementation.
//!
//! Everything here works on bare roots (`Option<NodeId>`) inside one shared
//! `Forest`. The public `SplayForest`/`Tree` API in the crate root wraps
//! these roots in move-only handles, so that a root consumed by `split` or
//! `join` can't be touched again.
//!
//! Splaying is bottom-up: we descend to a node first, then rotate it to the
//! top using its parent links. Every rotation recomputes the subtree sums
//! of the nodes it moves, grandparent first, then parent, then the node
//! itself.

use crate::node::{Arena, Node, NodeId};
use crate::{Bias, Key, Sum, KEY_SENTINEL};
use alloc::vec::Vec;
use core::cmp;

#[derive(Debug, Default)]
pub(crate) struct Forest {
    pub(crate) arena: Arena,
    rotations: u64,
}

impl Forest {
    #[inline]
    pub(crate) const fn new() -> Self {
        Forest {
            arena: Arena::new(),
            rotations: 0,
        }
    }

    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Forest {
            arena: Arena::with_capacity(capacity),
            rotations: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub(crate) fn rotations(&self) -> u64 {
        self.rotations
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.arena.clear();
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    #[inline]
    pub(crate) fn sum(&self, root: Option<NodeId>) -> Sum {
        root.map_or(0, |id| self.arena[id].sum)
    }

    #[inline]
    fn update(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let sum = Sum::from(node.key) + self.sum(node.left) + self.sum(node.right);
        self.arena[id].sum = sum;
    }

    #[inline]
    fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.arena[parent].left = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
    }

    #[inline]
    fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.arena[parent].right = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
    }

    #[inline]
    fn is_left_child(&self, id: NodeId, parent: NodeId) -> bool {
        self.arena[parent].left == Some(id)
    }

    // Rotation engine. `node` always ends up on top and inherits the parent
    // link of whichever node used to be on top. Nothing above that is
    // touched; `splay` patches the ancestor's child slot.

    /// `node` is the right child of `parent`.
    fn rotate_left(&mut self, node: NodeId, parent: NodeId) {
        debug_assert_eq!(self.arena[parent].right, Some(node));
        let above = self.arena[parent].parent;
        let inner = self.arena[node].left;

        self.set_right(parent, inner);
        self.set_left(node, Some(parent));
        self.arena[node].parent = above;

        self.update(parent);
        self.update(node);
        self.rotations += 1;
    }

    /// `node` is the left child of `parent`.
    fn rotate_right(&mut self, node: NodeId, parent: NodeId) {
        debug_assert_eq!(self.arena[parent].left, Some(node));
        let above = self.arena[parent].parent;
        let inner = self.arena[node].right;

        self.set_left(parent, inner);
        self.set_right(node, Some(parent));
        self.arena[node].parent = above;

        self.update(parent);
        self.update(node);
        self.rotations += 1;
    }

    /// `node` is a right child and `parent` is a right child: two left
    /// rotations, the upper one first.
    fn zig_zig_left_left(&mut self, node: NodeId, parent: NodeId, grand: NodeId) {
        let above = self.arena[grand].parent;
        let node_left = self.arena[node].left;
        let parent_left = self.arena[parent].left;

        self.set_right(grand, parent_left);
        self.set_left(parent, Some(grand));
        self.set_right(parent, node_left);
        self.set_left(node, Some(parent));
        self.arena[node].parent = above;

        self.update(grand);
        self.update(parent);
        self.update(node);
        self.rotations += 2;
    }

    /// `node` is a left child and `parent` is a left child.
    fn zig_zig_right_right(&mut self, node: NodeId, parent: NodeId, grand: NodeId) {
        let above = self.arena[grand].parent;
        let node_right = self.arena[node].right;
        let parent_right = self.arena[parent].right;

        self.set_left(grand, parent_right);
        self.set_right(parent, Some(grand));
        self.set_left(parent, node_right);
        self.set_right(node, Some(parent));
        self.arena[node].parent = above;

        self.update(grand);
        self.update(parent);
        self.update(node);
        self.rotations += 2;
    }

    /// `node` is a right child of `parent`, which is a left child.
    fn zig_zag_left_right(&mut self, node: NodeId, parent: NodeId, grand: NodeId) {
        let above = self.arena[grand].parent;
        let node_left = self.arena[node].left;
        let node_right = self.arena[node].right;

        self.set_right(parent, node_left);
        self.set_left(grand, node_right);
        self.set_left(node, Some(parent));
        self.set_right(node, Some(grand));
        self.arena[node].parent = above;

        self.update(grand);
        self.update(parent);
        self.update(node);
        self.rotations += 2;
    }

    /// `node` is a left child of `parent`, which is a right child.
    fn zig_zag_right_left(&mut self, node: NodeId, parent: NodeId, grand: NodeId) {
        let above = self.arena[grand].parent;
        let node_left = self.arena[node].left;
        let node_right = self.arena[node].right;

        self.set_right(grand, node_left);
        self.set_left(parent, node_right);
        self.set_left(node, Some(grand));
        self.set_right(node, Some(parent));
        self.arena[node].parent = above;

        self.update(grand);
        self.update(parent);
        self.update(node);
        self.rotations += 2;
    }

    /// Rotate `node` up until it has no parent. Callers store it as the
    /// root of whichever tree it belongs to.
    #[inline(never)]
    fn splay(&mut self, node: NodeId) {
        while let Some(parent) = self.arena[node].parent {
            let node_is_left = self.is_left_child(node, parent);

            let (top, above) = match self.arena[parent].parent {
                None => {
                    if node_is_left {
                        self.rotate_right(node, parent);
                    } else {
                        self.rotate_left(node, parent);
                    }
                    (parent, None)
                }
                Some(grand) => {
                    let above = self.arena[grand].parent;
                    match (node_is_left, self.is_left_child(parent, grand)) {
                        (true, true) => self.zig_zig_right_right(node, parent, grand),
                        (false, false) => self.zig_zig_left_left(node, parent, grand),
                        (false, true) => self.zig_zag_left_right(node, parent, grand),
                        (true, false) => self.zig_zag_right_left(node, parent, grand),
                    }
                    (grand, above)
                }
            };

            // Reconnect to the rest of the tree.
            if let Some(above) = above {
                if self.arena[above].left == Some(top) {
                    self.arena[above].left = Some(node);
                } else {
                    debug_assert_eq!(self.arena[above].right, Some(top));
                    self.arena[above].right = Some(node);
                }
            }
        }
    }

    /// Descend from `start` towards `key`, returning the node holding `key`
    /// or the last node visited before falling off the tree.
    fn locate(&self, start: NodeId, key: Key) -> NodeId {
        let mut current = start;
        loop {
            let node = &self.arena[current];
            let next = match key.cmp(&node.key) {
                cmp::Ordering::Equal => return current,
                cmp::Ordering::Less => node.left,
                cmp::Ordering::Greater => node.right,
            };
            match next {
                Some(next) => current = next,
                None => return current,
            }
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    /// In-order successor of `id` within its tree.
    fn next_largest(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.arena[id].right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        while let Some(parent) = self.arena[child].parent {
            if self.is_left_child(child, parent) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    #[inline(never)]
    pub(crate) fn find(&mut self, root: &mut Option<NodeId>, key: Key) -> bool {
        match *root {
            Some(start) => {
                let node = self.locate(start, key);
                self.splay(node);
                *root = Some(node);
                self.arena[node].key == key
            }
            None => false,
        }
    }

    #[inline(never)]
    pub(crate) fn insert(&mut self, root: &mut Option<NodeId>, key: Key) -> bool {
        let start = match *root {
            Some(start) => start,
            None => {
                *root = Some(self.arena.alloc(key));
                return true;
            }
        };

        let parent = self.locate(start, key);
        let ordering = key.cmp(&self.arena[parent].key);
        let node = match ordering {
            cmp::Ordering::Equal => {
                self.splay(parent);
                *root = Some(parent);
                return false;
            }
            cmp::Ordering::Less => {
                let node = self.arena.alloc(key);
                self.set_left(parent, Some(node));
                node
            }
            cmp::Ordering::Greater => {
                let node = self.arena.alloc(key);
                self.set_right(parent, Some(node));
                node
            }
        };

        // The new leaf's ancestors have stale sums until they are rotated
        // below it, which splaying does for every one of them.
        self.splay(node);
        *root = Some(node);
        true
    }

    #[inline(never)]
    pub(crate) fn remove(&mut self, root: &mut Option<NodeId>, key: Key) -> bool {
        if !self.find(root, key) {
            return false;
        }
        let node = match *root {
            Some(node) => node,
            None => return false,
        };

        let left = self.arena[node].left.take();
        let right = self.arena[node].right.take();
        if let Some(left) = left {
            self.arena[left].parent = None;
        }

        *root = match right {
            None => left,
            Some(right) => {
                self.arena[right].parent = None;
                let successor = self.leftmost(right);
                self.splay(successor);
                debug_assert!(self.arena[successor].left.is_none());
                self.set_left(successor, left);
                self.update(successor);
                Some(successor)
            }
        };

        self.arena.release(node);
        true
    }

    /// Split the tree at `key`. `bias` decides which side an exact match
    /// lands on.
    #[inline(never)]
    pub(crate) fn split(
        &mut self,
        root: Option<NodeId>,
        key: Key,
        bias: Bias,
    ) -> (Option<NodeId>, Option<NodeId>) {
        let start = match root {
            Some(start) => start,
            None => return (None, None),
        };

        let node = self.locate(start, key);
        self.splay(node);

        let stays_left = match self.arena[node].key.cmp(&key) {
            cmp::Ordering::Less => true,
            cmp::Ordering::Greater => false,
            cmp::Ordering::Equal => bias == Bias::Left,
        };

        if stays_left {
            let right = self.arena[node].right.take();
            if let Some(right) = right {
                self.arena[right].parent = None;
                self.arena[node].sum -= self.arena[right].sum;
            }
            (Some(node), right)
        } else {
            let left = self.arena[node].left.take();
            if let Some(left) = left {
                self.arena[left].parent = None;
                self.arena[node].sum -= self.arena[left].sum;
            }
            (left, Some(node))
        }
    }

    /// Join two trees. Every key in `left` must be smaller than every key in
    /// `right`.
    #[inline(never)]
    pub(crate) fn join(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> Option<NodeId> {
        let (left, right) = match (left, right) {
            (None, other) | (other, None) => return other,
            (Some(left), Some(right)) => (left, right),
        };

        let max = self.locate(left, KEY_SENTINEL);
        self.splay(max);
        debug_assert!(self.arena[max].right.is_none());
        debug_assert!(
            self.arena[max].key < self.arena[self.leftmost(right)].key,
            "joined trees overlap"
        );

        self.set_right(max, Some(right));
        self.arena[max].sum += self.arena[right].sum;
        Some(max)
    }

    pub(crate) fn min(&mut self, root: &mut Option<NodeId>) -> Option<Key> {
        let node = self.leftmost((*root)?);
        self.splay(node);
        *root = Some(node);
        Some(self.arena[node].key)
    }

    pub(crate) fn max(&mut self, root: &mut Option<NodeId>) -> Option<Key> {
        let node = self.locate((*root)?, KEY_SENTINEL);
        self.splay(node);
        *root = Some(node);
        Some(self.arena[node].key)
    }

    /// Keys in `[from, to]`, in order. Splays the first candidate so that
    /// the successor walk starts near the root.
    pub(crate) fn range_keys(&mut self, root: &mut Option<NodeId>, from: Key, to: Key) -> Vec<Key> {
        let mut keys = Vec::new();
        let start = match *root {
            Some(start) if from <= to => start,
            _ => return keys,
        };

        let first = self.locate(start, from);
        self.splay(first);
        *root = Some(first);

        let mut cursor = Some(first);
        while let Some(id) = cursor {
            let key = self.arena[id].key;
            if key > to {
                break;
            }
            if key >= from {
                keys.push(key);
            }
            cursor = self.next_largest(id);
        }
        keys
    }

    /// Visit keys in order until `f` returns `false`.
    pub(crate) fn walk(&self, root: Option<NodeId>, f: &mut dyn FnMut(Key) -> bool) {
        let mut cursor = root.map(|root| self.leftmost(root));
        while let Some(id) = cursor {
            if !f(self.arena[id].key) {
                return;
            }
            cursor = self.next_largest(id);
        }
    }

    pub(crate) fn height(&self, root: Option<NodeId>) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = root.into_iter().map(|id| (id, 1)).collect();
        while let Some((id, depth)) = stack.pop() {
            height = cmp::max(height, depth);
            let node = &self.arena[id];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }

    /// Release every node of the tree back to the arena.
    pub(crate) fn release(&mut self, root: Option<NodeId>) -> usize {
        let mut released = 0;
        let mut stack: Vec<NodeId> = root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            stack.extend(node.left);
            stack.extend(node.right);
            self.arena.release(id);
            released += 1;
        }
        released
    }
}
