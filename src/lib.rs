#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod check;
pub mod driver;
mod internal;
mod node;

pub use check::InvariantViolation;

use alloc::vec::Vec;
use core::fmt;
use core::iter;
use core::mem;
use node::NodeId;

/// The key type stored in the trees.
pub type Key = i64;

/// The aggregate type: wide enough that summing every representable key
/// can't overflow.
pub type Sum = i128;

/// Reserved key, larger than any key a tree may hold. It is used as the
/// search target when looking for a tree's maximum.
pub const KEY_SENTINEL: Key = Key::MAX;

/// Which side of a `split` an exactly matching key lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bias {
    /// The matching key stays in the left tree.
    Left,
    /// The matching key moves to the right tree.
    Right,
}

/// A handle to one tree inside a `SplayForest`.
///
/// A `Tree` only remembers its root; all of its nodes live in the forest it
/// came from. Handles are neither `Clone` nor `Copy`: `split` and `join`
/// take them by value, so a tree can't be used again once it has been
/// carved up or merged.
///
/// Dropping a handle doesn't free its nodes. Pass it to
/// `SplayForest::release` for that, or drop the whole forest.
#[must_use]
#[derive(Debug, Default)]
pub struct Tree {
    root: Option<NodeId>,
}

impl Tree {
    /// An empty tree. It belongs to no forest until something is inserted.
    #[inline]
    pub const fn new() -> Tree {
        Tree { root: None }
    }

    /// Is this tree empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// An arena of splay tree nodes, shared by any number of `Tree`s.
///
/// Every node caches the sum of the keys in its subtree, so the sum of a
/// whole tree is always available in constant time at its root. Combined
/// with `split` and `join` this gives `O(log n)` amortized range sums; see
/// `SumSet::range_sum`.
///
/// All trees passed to a forest's methods must have been built by that same
/// forest.
#[derive(Debug, Default)]
pub struct SplayForest {
    forest: internal::Forest,
}

impl SplayForest {
    /// Construct a new, empty forest.
    #[inline]
    pub const fn new() -> Self {
        SplayForest {
            forest: internal::Forest::new(),
        }
    }

    /// Construct an empty forest with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        SplayForest {
            forest: internal::Forest::with_capacity(capacity),
        }
    }

    /// The number of live nodes across every tree in this forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    /// Does this forest hold no nodes at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of single rotations performed so far. A zig-zig or zig-zag
    /// step counts as two.
    #[inline]
    pub fn rotations(&self) -> u64 {
        self.forest.rotations()
    }

    /// Look for `key` in `tree`.
    ///
    /// Whether or not the key is present, the last node visited by the search
    /// is splayed to the root.
    #[inline]
    pub fn find(&mut self, tree: &mut Tree, key: Key) -> bool {
        self.forest.find(&mut tree.root, key)
    }

    /// Insert `key` into `tree`.
    ///
    /// Returns `true` if the key was not already present. The inserted (or
    /// already present) key is splayed to the root.
    ///
    /// `KEY_SENTINEL` is reserved and must not be inserted.
    #[inline]
    pub fn insert(&mut self, tree: &mut Tree, key: Key) -> bool {
        debug_assert_ne!(key, KEY_SENTINEL, "the sentinel key is reserved");
        self.forest.insert(&mut tree.root, key)
    }

    /// Remove `key` from `tree`, returning whether it was present.
    #[inline]
    pub fn remove(&mut self, tree: &mut Tree, key: Key) -> bool {
        self.forest.remove(&mut tree.root, key)
    }

    /// Split `tree` into the keys below `key` and the keys above it. `bias`
    /// decides which side gets `key` itself, if present.
    ///
    /// ```
    /// use summing_splay_tree::{Bias, SplayForest, Tree};
    ///
    /// let mut forest = SplayForest::new();
    /// let mut tree = Tree::new();
    /// for key in 1..=7 {
    ///     forest.insert(&mut tree, key);
    /// }
    ///
    /// let (left, right) = forest.split(tree, 5, Bias::Right);
    /// assert_eq!(forest.keys(&left), [1, 2, 3, 4]);
    /// assert_eq!(forest.keys(&right), [5, 6, 7]);
    /// ```
    #[inline]
    pub fn split(&mut self, tree: Tree, key: Key, bias: Bias) -> (Tree, Tree) {
        let (left, right) = self.forest.split(tree.root, key, bias);
        (Tree { root: left }, Tree { root: right })
    }

    /// Join two trees into one.
    ///
    /// Every key in `left` must be smaller than every key in `right`. This is
    /// only checked when `debug_assertions` are enabled; otherwise joining
    /// overlapping trees silently breaks the ordering of the result.
    #[inline]
    pub fn join(&mut self, left: Tree, right: Tree) -> Tree {
        Tree {
            root: self.forest.join(left.root, right.root),
        }
    }

    /// The sum of every key in `tree`, or `0` if it is empty.
    #[inline]
    pub fn sum(&self, tree: &Tree) -> Sum {
        self.forest.sum(tree.root)
    }

    /// The key currently at the root of `tree`.
    #[inline]
    pub fn root_key(&self, tree: &Tree) -> Option<Key> {
        tree.root.map(|root| self.forest.node(root).key)
    }

    /// Splay the smallest key of `tree` to its root and return it.
    #[inline]
    pub fn min(&mut self, tree: &mut Tree) -> Option<Key> {
        self.forest.min(&mut tree.root)
    }

    /// Splay the largest key of `tree` to its root and return it.
    #[inline]
    pub fn max(&mut self, tree: &mut Tree) -> Option<Key> {
        self.forest.max(&mut tree.root)
    }

    /// The keys of `tree` in `[from, to]`, in ascending order.
    #[inline]
    pub fn range_keys(&mut self, tree: &mut Tree, from: Key, to: Key) -> Vec<Key> {
        self.forest.range_keys(&mut tree.root, from, to)
    }

    /// Walk `tree` in order.
    ///
    /// The `C` type controls whether iteration should continue, or break and
    /// return a `C::Result` value. You can use `()` as `C`, and that always
    /// continues iteration. Using `Result<(), E>` as `C` allows you to halt
    /// iteration on error, and propagate the error value. Using `Option<T>` as
    /// `C` allows you to search for some value, halt iteration when its found,
    /// and return it.
    pub fn walk<F, C>(&self, tree: &Tree, mut f: F) -> Option<C::Result>
    where
        F: FnMut(Key) -> C,
        C: WalkControl,
    {
        let mut result = None;
        self.forest.walk(tree.root, &mut |key| {
            result = f(key).should_break();
            result.is_none()
        });
        result
    }

    /// Collect the keys of `tree` in ascending order.
    pub fn keys(&self, tree: &Tree) -> Vec<Key> {
        let mut keys = Vec::new();
        self.walk(tree, |key| keys.push(key));
        keys
    }

    /// The number of keys in `tree`. This walks the whole tree.
    pub fn size(&self, tree: &Tree) -> usize {
        let mut size = 0;
        self.walk(tree, |_| size += 1);
        size
    }

    /// The number of nodes on the longest root-to-leaf path of `tree`.
    pub fn height(&self, tree: &Tree) -> usize {
        self.forest.height(tree.root)
    }

    /// Free every node of `tree`, returning how many there were.
    pub fn release(&mut self, tree: Tree) -> usize {
        self.forest.release(tree.root)
    }

    /// Verify the ordering, parent-link, and subtree-sum invariants of
    /// `tree`, recomputing every sum from scratch.
    pub fn check(&self, tree: &Tree) -> Result<(), InvariantViolation> {
        self.forest.check(tree.root)
    }
}

/// A set of keys answering range-sum queries, backed by a single splay tree.
///
/// ```
/// use summing_splay_tree::SumSet;
///
/// let mut set: SumSet = [4, 2, 1, 3, 6, 5, 7].iter().copied().collect();
/// assert_eq!(set.range_sum(2, 6), 20);
///
/// set.remove(4);
/// assert_eq!(set.range_sum(2, 6), 16);
/// assert!(!set.contains(4));
/// ```
#[derive(Default)]
pub struct SumSet {
    forest: SplayForest,
    tree: Tree,
}

impl fmt::Debug for SumSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let set = &mut f.debug_set();
        self.walk(|key| {
            set.entry(&key);
        });
        set.finish()
    }
}

impl Extend<Key> for SumSet {
    #[inline]
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl iter::FromIterator<Key> for SumSet {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut me = SumSet::new();
        me.extend(iter);
        me
    }
}

impl SumSet {
    /// Construct a new, empty set.
    #[inline]
    pub const fn new() -> Self {
        SumSet {
            forest: SplayForest::new(),
            tree: Tree::new(),
        }
    }

    /// Construct an empty set with room for `capacity` keys.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        SumSet {
            forest: SplayForest::with_capacity(capacity),
            tree: Tree::new(),
        }
    }

    /// Is this set empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of keys in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    /// Insert `key`, returning `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, key: Key) -> bool {
        self.forest.insert(&mut self.tree, key)
    }

    /// Remove `key`, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, key: Key) -> bool {
        self.forest.remove(&mut self.tree, key)
    }

    /// Is `key` in the set?
    ///
    /// This splays, so it needs `&mut self`.
    #[inline]
    pub fn contains(&mut self, key: Key) -> bool {
        self.forest.find(&mut self.tree, key)
    }

    /// The sum of every key `k` with `from <= k <= to`.
    ///
    /// Returns `0` when no key falls in the range, including when
    /// `from > to`.
    pub fn range_sum(&mut self, from: Key, to: Key) -> Sum {
        if from > to || self.is_empty() {
            return 0;
        }

        let tree = mem::take(&mut self.tree);
        let (left, middle) = self.forest.split(tree, from, Bias::Right);
        let (middle, right) = self.forest.split(middle, to, Bias::Left);
        let sum = self.forest.sum(&middle);

        let left = self.forest.join(left, middle);
        self.tree = self.forest.join(left, right);
        sum
    }

    /// The keys `k` with `from <= k <= to`, in ascending order.
    #[inline]
    pub fn range_keys(&mut self, from: Key, to: Key) -> Vec<Key> {
        self.forest.range_keys(&mut self.tree, from, to)
    }

    /// The sum of every key in the set.
    #[inline]
    pub fn sum(&self) -> Sum {
        self.forest.sum(&self.tree)
    }

    /// Get the minimum key, splaying it to the root.
    #[inline]
    pub fn min(&mut self) -> Option<Key> {
        self.forest.min(&mut self.tree)
    }

    /// Get the maximum key, splaying it to the root.
    #[inline]
    pub fn max(&mut self) -> Option<Key> {
        self.forest.max(&mut self.tree)
    }

    /// The key currently at the root of the underlying tree.
    #[inline]
    pub fn root(&self) -> Option<Key> {
        self.forest.root_key(&self.tree)
    }

    /// Walk the set in order. See `SplayForest::walk`.
    #[inline]
    pub fn walk<F, C>(&self, f: F) -> Option<C::Result>
    where
        F: FnMut(Key) -> C,
        C: WalkControl,
    {
        self.forest.walk(&self.tree, f)
    }

    /// Collect the keys in ascending order.
    #[inline]
    pub fn keys(&self) -> Vec<Key> {
        self.forest.keys(&self.tree)
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.tree = Tree::new();
        self.forest.forest.clear();
    }

    /// The height of the underlying tree.
    #[inline]
    pub fn height(&self) -> usize {
        self.forest.height(&self.tree)
    }

    /// Rotations performed so far. See `SplayForest::rotations`.
    #[inline]
    pub fn rotations(&self) -> u64 {
        self.forest.rotations()
    }

    /// Verify the invariants of the underlying tree. See
    /// `SplayForest::check`.
    #[inline]
    pub fn check(&self) -> Result<(), InvariantViolation> {
        self.forest.check(&self.tree)
    }
}

/// A trait that guides whether `walk` should continue, or break, and what
/// the return value is.
pub trait WalkControl {
    /// The result type that is returned when we break.
    type Result;

    /// If iteration should halt, return `Some`. If iteration should continue,
    /// return `None`.
    fn should_break(self) -> Option<Self::Result>;
}

impl WalkControl for () {
    type Result = ();

    fn should_break(self) -> Option<()> {
        None
    }
}

impl<T> WalkControl for Option<T> {
    type Result = T;

    fn should_break(mut self) -> Option<T> {
        self.take()
    }
}

impl<E> WalkControl for Result<(), E> {
    type Result = E;

    fn should_break(self) -> Option<E> {
        self.err()
    }
}
