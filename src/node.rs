//! The recursive building block of a [`Tree`][crate::Tree].
//!
//! A `Node` owns its value and up to two children outright. There are no parent pointers, so
//! nothing can climb back up the tree and no cycles can form. Nodes never hold the comparator;
//! the owning tree lends it to every call instead.
//!
//! Equal values all go right, so a tree holding many duplicates has long right-leaning runs.
//! Every walk here (including drop, clone and (de)serialization) uses a loop or an explicit
//! stack so those runs can't overflow the call stack.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compare::Compare;

/// A single value in a tree and the (possibly empty) subtrees hanging off of it.
///
/// Every value reachable through the left child compares strictly less than this node's
/// value. Every value reachable through the right child compares greater than or equal to it,
/// so duplicates always end up on the right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: Link::empty(),
            right: Link::empty(),
        })
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether this node has a left child.
    pub fn has_left(&self) -> bool {
        self.left.0.is_some()
    }

    /// Whether this node has a right child.
    pub fn has_right(&self) -> bool {
        self.right.0.is_some()
    }

    /// The root of the subtree holding values less than this node's value.
    pub fn left_child(&self) -> Option<&Self> {
        self.left.node()
    }

    /// The root of the subtree holding values greater than or equal to this node's value.
    pub fn right_child(&self) -> Option<&Self> {
        self.right.node()
    }

    /// Mutable access to the left child. The only structural edit a `Node` exposes is
    /// [`prune`][Node::prune] so this can't break the ordering of the tree.
    pub fn left_child_mut(&mut self) -> Option<&mut Self> {
        self.left.node_mut()
    }

    /// Mutable access to the right child. See [`left_child_mut`][Node::left_child_mut].
    pub fn right_child_mut(&mut self) -> Option<&mut Self> {
        self.right.node_mut()
    }

    /// Drops both children of this node (and therefore everything below it). The node itself
    /// stays where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert_eq!(tree.size(), 7);
    ///
    /// tree.root_mut().unwrap().left_child_mut().unwrap().prune();
    /// assert_eq!(tree.size(), 5);
    /// ```
    pub fn prune(&mut self) {
        self.left = Link::empty();
        self.right = Link::empty();
    }

    /// How many nodes are in the subtree rooted here, counted by walking all of them.
    pub fn size(&self) -> usize {
        self.nodes().count()
    }

    /// How many levels are in the subtree rooted here. A node with no children has a height
    /// of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left_child().map(|l| (l, depth + 1)));
            stack.extend(node.right_child().map(|r| (r, depth + 1)));
        }
        height
    }

    /// Iterates over the values of this subtree in preorder: a node, then its left subtree,
    /// then its right subtree. This is _not_ sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { nodes: self.nodes() }
    }

    /// Collects the values of this subtree in preorder.
    pub fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Consumes this subtree and collects its values in preorder.
    pub fn into_values(self: Box<Self>) -> Vec<T> {
        Link(Some(self)).take_values()
    }

    fn nodes(&self) -> Nodes<'_, T> {
        Nodes { stack: vec![self] }
    }

    /// The child slot `value` belongs under. Values less than this node go left, everything
    /// else goes right.
    fn slot_for<C>(&mut self, value: &T, comparator: &C) -> &mut Link<T>
    where
        C: Compare<T> + ?Sized,
    {
        match comparator.compare(value, &self.value) {
            Ordering::Less => &mut self.left,
            Ordering::Equal | Ordering::Greater => &mut self.right,
        }
    }

    /// Walks down from this node and attaches `value` as a new leaf at the first free slot.
    pub(crate) fn insert<C>(&mut self, value: T, comparator: &C)
    where
        C: Compare<T> + ?Sized,
    {
        let mut slot = self.slot_for(&value, comparator);
        loop {
            match slot.0 {
                Some(ref mut node) => slot = node.slot_for(&value, comparator),
                None => break,
            }
        }
        slot.0 = Some(Self::new_boxed(value));
    }

    /// Finds the first node along the search path whose value compares equal to `value`.
    pub(crate) fn locate<C>(&self, value: &T, comparator: &C) -> Option<&Self>
    where
        C: Compare<T> + ?Sized,
    {
        let mut node = self;
        loop {
            node = match comparator.compare(value, &node.value) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left_child()?,
                Ordering::Greater => node.right_child()?,
            };
        }
    }

    /// Checks that every node in this subtree respects the ordering invariant under
    /// `comparator`.
    pub(crate) fn is_ordered_by<C>(&self, comparator: &C) -> bool
    where
        C: Compare<T> + ?Sized,
    {
        // `lower` is inclusive (values routed right of an ancestor), `upper` is exclusive.
        let mut stack: Vec<(&Self, Option<&T>, Option<&T>)> = vec![(self, None, None)];
        while let Some((node, lower, upper)) = stack.pop() {
            let value = &node.value;
            let above_lower = lower.map_or(true, |l| comparator.compare(value, l).is_ge());
            let below_upper = upper.map_or(true, |u| comparator.compare(value, u).is_lt());
            if !(above_lower && below_upper) {
                return false;
            }

            stack.extend(node.left_child().map(|l| (l, lower, Some(value))));
            stack.extend(node.right_child().map(|r| (r, Some(value), upper)));
        }
        true
    }
}

/// An owned, possibly empty subtree.
pub(crate) struct Link<T>(pub(crate) Option<Box<Node<T>>>);

impl<T> Link<T> {
    pub(crate) fn empty() -> Self {
        Self(None)
    }

    pub(crate) fn node(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    pub(crate) fn node_mut(&mut self) -> Option<&mut Node<T>> {
        self.0.as_deref_mut()
    }

    fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            stack: self.node().into_iter().collect(),
        }
    }

    /// Takes every node out of this link, leaving it empty, and returns their values in
    /// preorder.
    pub(crate) fn take_values(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        let mut stack: Vec<Box<Node<T>>> = self.0.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            let Node {
                value,
                mut left,
                mut right,
            } = *node;
            values.push(value);
            // Right is pushed first so the left subtree is visited first.
            stack.extend(right.0.take());
            stack.extend(left.0.take());
        }
        values
    }

    /// Rebuilds a subtree from its preorder values and which children each node had. Returns
    /// `None` if the flags don't describe exactly one tree.
    fn from_preorder<I>(entries: I) -> Option<Self>
    where
        I: DoubleEndedIterator<Item = Entry<T>>,
    {
        // Walking preorder backwards finishes a node's right subtree, then its left subtree,
        // then the node itself, so its children are on top of the stack in that order.
        let mut built: Vec<Box<Node<T>>> = Vec::new();
        for Entry { value, left, right } in entries.rev() {
            let left = if left { Some(built.pop()?) } else { None };
            let right = if right { Some(built.pop()?) } else { None };
            built.push(Box::new(Node {
                value,
                left: Link(left),
                right: Link(right),
            }));
        }

        match built.len() {
            0 => Some(Self::empty()),
            1 => Some(Self(built.pop())),
            _ => None,
        }
    }
}

impl<T> Drop for Link<T> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.0.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.0.take());
            stack.extend(node.right.0.take());
            // `node` is dropped here with no children left to recurse into.
        }
    }
}

impl<T> Clone for Link<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let entries: Vec<Entry<T>> = self
            .nodes()
            .map(|node| Entry {
                value: node.value.clone(),
                left: node.has_left(),
                right: node.has_right(),
            })
            .collect();
        Self::from_preorder(entries.into_iter())
            .expect("Preorder of an existing subtree describes one tree")
    }
}

impl<T> PartialEq for Link<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let mut ours = self.nodes();
        let mut theirs = other.nodes();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b))
                    if a.value == b.value
                        && a.has_left() == b.has_left()
                        && a.has_right() == b.has_right() => {}
                _ => return false,
            }
        }
    }
}

impl<T> Eq for Link<T> where T: Eq {}

impl<T> fmt::Debug for Link<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(|node| &node.value))
            .finish()
    }
}

/// One node in the persisted form of a subtree: its value and which children follow it in
/// preorder.
#[derive(Serialize, Deserialize)]
struct Entry<T> {
    value: T,
    left: bool,
    right: bool,
}

/// Borrowed form of [`Entry`].
#[derive(Serialize)]
#[serde(rename = "Entry")]
struct EntryRef<'a, T> {
    value: &'a T,
    left: bool,
    right: bool,
}

impl<T> Serialize for Link<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.node().map_or(0, Node::size);
        let mut seq = serializer.serialize_seq(Some(len))?;
        for node in self.nodes() {
            seq.serialize_element(&EntryRef {
                value: &node.value,
                left: node.has_left(),
                right: node.has_right(),
            })?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for Link<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry<T>>::deserialize(deserializer)?;
        Self::from_preorder(entries.into_iter())
            .ok_or_else(|| D::Error::custom("preorder entries don't describe a single tree"))
    }
}

/// A preorder iterator over the nodes of a subtree.
#[derive(Clone, Debug)]
struct Nodes<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right_child());
        self.stack.extend(node.left_child());
        Some(node)
    }
}

/// A preorder iterator over the values of a subtree. Created by [`Node::iter`] and
/// [`Tree::iter`][crate::Tree::iter].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    nodes: Nodes<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Nodes { stack: Vec::new() },
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(Node::value)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}
