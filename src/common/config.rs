//! Configuration constants for the B-tree index.

use crate::common::{Error, Result};

/// Smallest legal minimum degree.
///
/// With `t = 2` every node holds 1 to 3 keys (a 2-3-4 tree). Anything
/// smaller cannot split a full node around a median.
pub const MIN_DEGREE_FLOOR: usize = 2;

/// Minimum degree used when no other value is configured.
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Maximum number of keys a node may hold for minimum degree `t`.
#[inline]
pub const fn max_keys(t: usize) -> usize {
    2 * t - 1
}

/// Minimum number of keys a non-root node must hold for minimum degree `t`.
#[inline]
pub const fn min_keys(t: usize) -> usize {
    t - 1
}

/// Construction-time settings for a [`BTree`](crate::index::btree::BTree).
///
/// # Example
/// ```
/// use paged_btree::TreeConfig;
///
/// let config = TreeConfig::new(4);
/// assert!(config.validate().is_ok());
/// assert!(TreeConfig::new(1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Minimum degree `t`. Fixed for the lifetime of the tree.
    pub min_degree: usize,
}

impl TreeConfig {
    /// Create a config with the given minimum degree.
    pub fn new(min_degree: usize) -> Self {
        Self { min_degree }
    }

    /// Reject degrees below [`MIN_DEGREE_FLOOR`].
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < MIN_DEGREE_FLOOR {
            return Err(Error::InvalidMinDegree {
                min_degree: self.min_degree,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DEGREE)
    }
}
