//! Error types for the B-tree index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the index can report.
///
/// A missing key is not an error: `search` returns `None` and `delete`
/// returns `false`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The tree was configured with a minimum degree below 2.
    ///
    /// This is a programmer error caught at construction time.
    #[error("Invalid minimum degree {min_degree}: must be at least 2")]
    InvalidMinDegree { min_degree: usize },

    /// A structural check found a node that breaks the B-tree property.
    ///
    /// Only [`BTree::check_invariants`](crate::index::btree::BTree::check_invariants)
    /// produces this. Seeing it means the algorithm has a bug.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}
