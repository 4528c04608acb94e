//! A BST that stays balanced by rebuilding itself from scratch.
//!
//! There are no rotations here. Every mutation collects all of the tree's values, sorts them,
//! throws the old nodes away and inserts the values again, always picking the middle of the
//! remaining range first. That costs `O(N lg N)` per mutation but the resulting tree is never
//! taller than `ceil(lg(N + 1))` (when the values are distinct), whatever order they arrived in.
//! The batch operations ([`Tree::add_all`] and [`Tree::remove_all`]) pay for one rebuild for the
//! whole batch, so prefer them when changing many values at once.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Ascending inserts would make a plain BST into a linked list.
//! for x in 1..=7 {
//!     tree.add(x);
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root().map(|n| *n.value()), Some(4));
//!
//! assert!(tree.remove(&4));
//! assert!(!tree.remove(&4));
//! assert!(!tree.contains(&4));
//! assert_eq!(tree.size(), 6);
//! ```

use std::fmt;
use std::iter::FromIterator;

use tracing::trace;

use crate::compare::{Compare, Natural};
use crate::node::{Iter, Link, Node};
use crate::util::balanced_height;

/// A Binary Search Tree ordered by the comparator `C`. Duplicate values are allowed.
#[derive(Clone)]
pub struct Tree<T, C = Natural> {
    pub(crate) root: Link<T>,
    comparator: C,
}

impl<T, C> Default for Tree<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> fmt::Debug for Tree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` using the values' natural ordering.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> Tree<T, C> {
    /// Generates a new, empty `Tree` that orders values with `comparator`. The comparator can't
    /// be changed afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::{Natural, Reverse, Tree};
    ///
    /// let mut tree = Tree::with_comparator(Reverse(Natural));
    /// tree.add_all(vec![1, 2, 3]);
    ///
    /// // Larger values are on the left now.
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.left_child().map(|n| *n.value()), Some(3));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: Link::empty(),
            comparator,
        }
    }

    /// Generates a `Tree` holding the single value `value`.
    pub fn rooted(comparator: C, value: T) -> Self {
        Self {
            root: Link(Some(Node::new_boxed(value))),
            comparator,
        }
    }

    pub(crate) fn from_parts(root: Link<T>, comparator: C) -> Self {
        Self { root, comparator }
    }

    /// The comparator this tree was built with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The root node, if the tree has any values.
    ///
    /// Nodes are replaced wholesale by every mutation so this (like [`Tree::locate`]) only
    /// borrows the tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.node()
    }

    /// Mutable access to the root node. [`Node`] only allows pruning through this.
    pub fn root_mut(&mut self) -> Option<&mut Node<T>> {
        self.root.node_mut()
    }

    /// Whether the tree has no values.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Counts the nodes in the tree. This walks the whole tree every time.
    pub fn size(&self) -> usize {
        self.root().map_or(0, Node::size)
    }

    /// The number of levels in the tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Iterates over the values in preorder. This is _not_ sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.root().map_or_else(Iter::empty, Node::iter)
    }

    /// Collects the values in preorder. This is _not_ sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.values(), vec![&2, &1, &3]);
    /// ```
    pub fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Consumes the tree and returns its values in preorder.
    pub fn into_values(mut self) -> Vec<T> {
        self.root.take_values()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.root = Link::empty();
    }

    /// Takes every value out of the tree, leaving it empty.
    fn take_values(&mut self) -> Vec<T> {
        self.root.take_values()
    }
}

impl<T, C> Tree<T, C>
where
    C: Compare<T>,
{
    /// Inserts `value` and rebuilds the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    /// tree.add(1);
    ///
    /// assert_eq!(tree.size(), 2);
    /// ```
    pub fn add(&mut self, value: T) {
        self.insert_leaf(value);
        self.rebalance();
    }

    /// Inserts every value in `values` and rebuilds the tree once.
    ///
    /// This ends up holding the same values as calling [`Tree::add`] for each of them but
    /// without a rebuild per value.
    pub fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut all = self.take_values();
        all.extend(values);
        self.rebuild(all);
    }

    /// Removes the first value (in preorder) that is `==` to `value` and rebuilds the tree.
    /// Returns whether anything was removed. Nothing is rebuilt if nothing matched.
    ///
    /// Note that this uses `T`'s own equality, not the tree's comparator.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let position = match self.iter().position(|v| v == value) {
            Some(position) => position,
            None => return false,
        };

        // `take_values` collects in the same preorder as `iter`.
        let mut values = self.take_values();
        values.swap_remove(position);
        self.rebuild(values);
        true
    }

    /// Removes every value that is `==` to any of `values` and rebuilds the tree once.
    /// Returns whether anything was removed. Nothing is rebuilt if nothing matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![1, 2, 2, 3].into_iter().collect();
    ///
    /// assert!(tree.remove_all(&[2, 4]));
    /// assert_eq!(tree.size(), 2);
    /// assert!(!tree.remove_all(&[2, 4]));
    /// ```
    pub fn remove_all(&mut self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        if !self.iter().any(|v| values.contains(v)) {
            return false;
        }

        let mut remaining = self.take_values();
        let before = remaining.len();
        remaining.retain(|v| !values.contains(v));
        trace!(removed = before - remaining.len(), "removing batch");
        self.rebuild(remaining);
        true
    }

    /// Finds the first node on the search path whose value compares equal to `value` under the
    /// tree's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree: Tree<_> = (1..=7).collect();
    ///
    /// let node = tree.locate(&6).unwrap();
    /// assert_eq!(node.value(), &6);
    /// assert_eq!(node.left_child().map(|n| *n.value()), Some(5));
    /// assert!(tree.locate(&42).is_none());
    /// ```
    pub fn locate(&self, value: &T) -> Option<&Node<T>> {
        self.root()?.locate(value, &self.comparator)
    }

    /// Whether any value compares equal to `value` under the tree's comparator.
    pub fn contains(&self, value: &T) -> bool {
        self.locate(value).is_some()
    }

    /// Whether every node satisfies the ordering invariant under the tree's comparator.
    pub(crate) fn is_ordered(&self) -> bool {
        self.root()
            .map_or(true, |root| root.is_ordered_by(&self.comparator))
    }

    /// Rebuilds the tree from its own values.
    pub(crate) fn rebalance(&mut self) {
        let values = self.take_values();
        self.rebuild(values);
    }

    /// Sorts `values` and builds a fresh tree from them, replacing whatever was there.
    fn rebuild(&mut self, mut values: Vec<T>) {
        let comparator = &self.comparator;
        values.sort_unstable_by(|a, b| comparator.compare(a, b));

        // Balance only holds when no two values compare equal since ties all go right.
        let distinct = cfg!(test)
            && values
                .windows(2)
                .all(|w| comparator.compare(&w[0], &w[1]).is_lt());

        let len = values.len();
        let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
        self.root = Link::empty();
        self.insert_range(&mut slots, 0, len);

        trace!(len, height = self.height(), "rebuilt tree");

        // In tests, after rebuilding, assert that the tree is as short as it can be.
        if distinct {
            assert!(self.height() <= balanced_height(len));
        }
    }

    /// Inserts the middle of `slots[low..high]` and then does the same for the values above
    /// it and the values below it. Every slot is taken exactly once.
    fn insert_range(&mut self, slots: &mut [Option<T>], low: usize, high: usize) {
        if low == high {
            return;
        }

        let mid = low + (high - low) / 2;
        if let Some(value) = slots[mid].take() {
            self.insert_leaf(value);
        }
        self.insert_range(slots, mid + 1, high);
        self.insert_range(slots, low, mid);
    }

    fn insert_leaf(&mut self, value: T) {
        match self.root.0 {
            Some(ref mut root) => root.insert(value, &self.comparator),
            None => self.root = Link(Some(Node::new_boxed(value))),
        }
    }
}

impl<T, C> Extend<T> for Tree<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.add_all(iter);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
