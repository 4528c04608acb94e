//! The ordering capability a [`Tree`][crate::Tree] uses for every placement decision.
//!
//! A comparator is any value implementing [`Compare`]. Closures of the shape
//! `Fn(&T, &T) -> Ordering` are comparators already, and [`Natural`] defers to the
//! element type's own [`Ord`] implementation.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::{Compare, Natural, Reverse};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reverse(Natural).compare(&1, &2), Ordering::Greater);
//!
//! let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
//! assert_eq!(by_len.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be consistent: if `compare(a, b)` is `Less` then `compare(b, a)` is
/// `Greater`, and the relation must be transitive. An inconsistent comparator won't cause
/// memory unsafety but the shape of the tree (and what `locate` finds) is unspecified.
pub trait Compare<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The element type's natural ordering. This is the default comparator of a `Tree`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Flips the ordering of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reverse<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}
