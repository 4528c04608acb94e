use thiserror::Error;

/// Errors from restoring a persisted tree.
///
/// Structural operations on a live [`Tree`][crate::Tree] never fail. Missing values are
/// reported through `bool` and `Option` results instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// The persisted structure doesn't satisfy the ordering invariant under the comparator
    /// supplied on restore.
    #[error("persisted structure of {size} nodes is not ordered under the supplied comparator")]
    Unordered {
        /// Number of nodes in the rejected structure.
        size: usize,
    },
}

/// Convenience alias for results carrying a [`TreeError`].
pub type TreeResult<T> = Result<T, TreeError>;
