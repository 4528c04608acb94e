//! Persisting trees.
//!
//! A [`Tree`] serializes its structure but never its comparator: comparators are often
//! closures and can't be written out. Deserializing gives back a [`Snapshot`], which has to be
//! handed a comparator again before it becomes a usable tree.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::{Natural, Snapshot, Tree};
//!
//! let tree: Tree<_> = (1..=7).collect();
//!
//! let bytes = bincode::serialize(&tree).unwrap();
//! let snapshot: Snapshot<i32> = bincode::deserialize(&bytes).unwrap();
//!
//! let restored = snapshot.restore(Natural);
//! assert_eq!(restored.values(), tree.values());
//! ```

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::compare::Compare;
use crate::error::{TreeError, TreeResult};
use crate::node::{Link, Node};
use crate::tree::Tree;

/// The persisted structure of a [`Tree`], without its comparator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    root: Link<T>,
}

/// Borrowed form of [`Snapshot`] so a live tree serializes without cloning.
#[derive(Serialize)]
#[serde(rename = "Snapshot")]
struct SnapshotRef<'a, T> {
    root: &'a Link<T>,
}

impl<T, C> Serialize for Tree<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SnapshotRef { root: &self.root }.serialize(serializer)
    }
}

impl<T> Snapshot<T> {
    /// The persisted root node.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.node()
    }

    /// Number of persisted nodes.
    pub fn size(&self) -> usize {
        self.root().map_or(0, Node::size)
    }

    /// Turns this back into a tree ordered by `comparator`. The tree is rebuilt so it doesn't
    /// matter what comparator (if any) produced the persisted shape.
    pub fn restore<C>(self, comparator: C) -> Tree<T, C>
    where
        C: Compare<T>,
    {
        let mut tree = Tree::from_parts(self.root, comparator);
        tree.rebalance();
        debug!(size = tree.size(), "restored tree from snapshot");
        tree
    }

    /// Like [`Snapshot::restore`] but first checks that the persisted shape is ordered under
    /// `comparator`, failing if it isn't. This catches restoring with a different comparator
    /// than the one the tree was saved with. The tree is rebuilt either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::{Natural, Reverse, Tree, TreeError};
    ///
    /// let tree: Tree<_> = (1..=3).collect();
    ///
    /// let error = tree.snapshot().restore_checked(Reverse(Natural)).unwrap_err();
    /// assert_eq!(error, TreeError::Unordered { size: 3 });
    ///
    /// let restored = tree.snapshot().restore_checked(Natural).unwrap();
    /// assert_eq!(restored.values(), tree.values());
    /// ```
    pub fn restore_checked<C>(self, comparator: C) -> TreeResult<Tree<T, C>>
    where
        C: Compare<T>,
    {
        let mut tree = Tree::from_parts(self.root, comparator);
        if !tree.is_ordered() {
            return Err(TreeError::Unordered { size: tree.size() });
        }

        tree.rebalance();
        debug!(size = tree.size(), "restored checked tree from snapshot");
        Ok(tree)
    }
}

impl<T, C> Tree<T, C> {
    /// Drops the comparator and keeps the structure.
    pub fn into_snapshot(self) -> Snapshot<T> {
        Snapshot { root: self.root }
    }

    /// Copies the structure without the comparator.
    pub fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot {
            root: self.root.clone(),
        }
    }
}
