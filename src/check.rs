//! Independent verification of the tree invariants.

use crate::internal::Forest;
use crate::node::NodeId;
use crate::{Key, Sum};
use alloc::vec::Vec;
use thiserror::Error;

/// A broken tree invariant, as reported by `SplayForest::check`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node still points at a parent.
    #[error("root {key} has a parent")]
    RootHasParent {
        /// Key of the root node.
        key: Key,
    },

    /// A child does not point back at the node that links to it.
    #[error("child {child} does not point back at parent {parent}")]
    ParentMismatch {
        /// Key of the linking node.
        parent: Key,
        /// Key of the child whose parent link is wrong.
        child: Key,
    },

    /// An in-order traversal did not produce strictly increasing keys.
    #[error("key {next} follows {previous} in order")]
    OutOfOrder {
        /// The earlier key in the traversal.
        previous: Key,
        /// The key that should have been larger.
        next: Key,
    },

    /// A cached subtree sum disagrees with a fresh recomputation.
    #[error("node {key} caches sum {cached}, but its subtree sums to {actual}")]
    StaleSum {
        /// Key of the node with the stale aggregate.
        key: Key,
        /// The cached value.
        cached: Sum,
        /// The recomputed value.
        actual: Sum,
    },
}

impl Forest {
    /// Check order, parent links, and every cached sum of the tree rooted at
    /// `root`, without trusting any cached sum.
    pub(crate) fn check(&self, root: Option<NodeId>) -> Result<(), InvariantViolation> {
        let root = match root {
            Some(root) => root,
            None => return Ok(()),
        };
        if self.node(root).parent.is_some() {
            return Err(InvariantViolation::RootHasParent {
                key: self.node(root).key,
            });
        }

        // Post-order over an explicit stack. Each finished subtree leaves
        // exactly one recomputed sum on `sums`.
        let mut sums: Vec<Sum> = Vec::new();
        let mut stack = Vec::new();
        stack.push((root, false));

        while let Some((id, children_done)) = stack.pop() {
            let node = self.node(id);
            if !children_done {
                for child in node.left.into_iter().chain(node.right) {
                    if self.node(child).parent != Some(id) {
                        return Err(InvariantViolation::ParentMismatch {
                            parent: node.key,
                            child: self.node(child).key,
                        });
                    }
                }
                stack.push((id, true));
                stack.extend(node.right.map(|right| (right, false)));
                stack.extend(node.left.map(|left| (left, false)));
                continue;
            }

            let right_sum = match node.right {
                Some(_) => sums.pop().unwrap_or(0),
                None => 0,
            };
            let left_sum = match node.left {
                Some(_) => sums.pop().unwrap_or(0),
                None => 0,
            };
            let actual = Sum::from(node.key) + left_sum + right_sum;
            if actual != node.sum {
                return Err(InvariantViolation::StaleSum {
                    key: node.key,
                    cached: node.sum,
                    actual,
                });
            }
            sums.push(actual);
        }

        let mut previous: Option<Key> = None;
        let mut result = Ok(());
        self.walk(Some(root), &mut |key| {
            if let Some(prev) = previous {
                if prev >= key {
                    result = Err(InvariantViolation::OutOfOrder {
                        previous: prev,
                        next: key,
                    });
                    return false;
                }
            }
            previous = Some(key);
            true
        });
        result
    }
}
