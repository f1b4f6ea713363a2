//! Error types for matrix construction and the pre-search API surface.
//!
//! Every error here arises at construction time or before a search begins
//! (see the crate-level docs and spec §7). Once a search is running, a
//! violated invariant is a programming defect, not a recoverable condition,
//! and is reported with `debug_assert!` rather than `Result`.

use thiserror::Error;

/// Errors returned by [`crate::dlx::Matrix`] construction and pre-search methods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The column declaration passed to [`Matrix::new`](crate::dlx::Matrix::new)
    /// was malformed, e.g. it declared the same column name twice.
    #[error("invalid column specification: {0}")]
    InvalidColumnSpec(String),

    /// [`add_sparse_row`](crate::dlx::Matrix::add_sparse_row) was called
    /// after [`end_add`](crate::dlx::Matrix::end_add).
    #[error("cannot add rows: the matrix builder has been closed")]
    BuilderClosed,

    /// A row referenced a column index that doesn't exist.
    #[error("column index {index} is out of range (matrix has {ncols} columns)")]
    IndexOutOfRange { index: usize, ncols: usize },

    /// [`min_column`](crate::dlx::Matrix::min_column) or
    /// [`random_column`](crate::dlx::Matrix::random_column) was called on a
    /// matrix whose primary header ring is empty.
    #[error("matrix has no primary columns remaining")]
    EmptyMatrix,
}
