//! This crate exposes a Binary Search Tree (BST) that keeps itself balanced by periodically
//! rebuilding itself instead of rotating nodes around.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The invariants of the BST in this crate are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a
//!    value greater than _or equal to_ its own value. Duplicates are allowed
//!    and always go right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Self-balancing trees usually keep the height at
//! `O(lg N)` with rotations after each insert or delete. The [`Tree`] here does something
//! simpler: after every mutation it sorts all of its values and builds a brand new tree from
//! the middle out. That makes mutations cost `O(N lg N)` so it's a good fit when lookups far
//! outnumber changes, and batch changes ([`Tree::add_all`], [`Tree::remove_all`]) only pay
//! for a single rebuild.
//!
//! ## Ordering
//!
//! Values are placed with a comparator (see [`compare`]) chosen when the tree is created.
//! [`Natural`] (the default) uses `Ord`. Removal is the exception: it finds values with
//! `PartialEq`, so types where the two disagree should be handled with care.
//!
//! ## Persistence
//!
//! Trees serialize with `serde` but their comparator doesn't come along. See [`snapshot`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod compare;
mod error;
pub mod node;
pub mod snapshot;
pub mod tree;
mod util;


pub use compare::{Compare, Natural, Reverse};
pub use error::{TreeError, TreeResult};
pub use node::Node;
pub use snapshot::Snapshot;
pub use tree::Tree;
