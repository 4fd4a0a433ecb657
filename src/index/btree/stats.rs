//! Simulated page I/O accounting.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Node access counters kept by every tree.
///
/// Nodes stand in for disk pages. Reading a node to make a branching
/// decision counts as one page read; changing a node's keys or children
/// counts as one page write. No bytes move anywhere.
///
/// Fields are atomic so that `search` can count reads through `&self`.
///
/// # Memory Ordering
/// `Ordering::Relaxed` everywhere: the counters are independent and only
/// need atomicity.
///
/// # Example
/// ```
/// use paged_btree::AccessStats;
///
/// let stats = AccessStats::new();
/// stats.record_read();
/// stats.record_write();
/// stats.record_write();
/// assert_eq!(stats.nodes_read(), 1);
/// assert_eq!(stats.nodes_written(), 2);
/// ```
#[derive(Debug)]
pub struct AccessStats {
    nodes_read: AtomicU64,
    nodes_written: AtomicU64,
}

impl AccessStats {
    /// Create a tracker with both counters at zero.
    pub fn new() -> Self {
        Self {
            nodes_read: AtomicU64::new(0),
            nodes_written: AtomicU64::new(0),
        }
    }

    /// Count one node read.
    #[inline]
    pub fn record_read(&self) {
        self.nodes_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one node write.
    #[inline]
    pub fn record_write(&self) {
        self.nodes_written.fetch_add(1, Ordering::Relaxed);
    }

    /// Total nodes read since construction.
    pub fn nodes_read(&self) -> u64 {
        self.nodes_read.load(Ordering::Relaxed)
    }

    /// Total nodes written since construction.
    pub fn nodes_written(&self) -> u64 {
        self.nodes_written.load(Ordering::Relaxed)
    }

    /// Get a point-in-time copy of both counters.
    pub fn snapshot(&self) -> AccessSnapshot {
        AccessSnapshot {
            nodes_read: self.nodes_read(),
            nodes_written: self.nodes_written(),
        }
    }
}

impl Default for AccessStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`AccessStats`].
///
/// Plain integers, so it can be printed, compared and subtracted.
///
/// # Example
/// ```
/// use paged_btree::AccessStats;
///
/// let stats = AccessStats::new();
/// let before = stats.snapshot();
/// stats.record_read();
/// let delta = stats.snapshot().since(&before);
/// assert_eq!(delta.nodes_read, 1);
/// assert_eq!(delta.nodes_written, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessSnapshot {
    pub nodes_read: u64,
    pub nodes_written: u64,
}

impl AccessSnapshot {
    /// Counter growth between `earlier` and `self`.
    ///
    /// Counters never decrease, so this saturates rather than wraps if the
    /// snapshots are passed in the wrong order.
    pub fn since(&self, earlier: &AccessSnapshot) -> AccessSnapshot {
        AccessSnapshot {
            nodes_read: self.nodes_read.saturating_sub(earlier.nodes_read),
            nodes_written: self.nodes_written.saturating_sub(earlier.nodes_written),
        }
    }

    /// Reads plus writes.
    pub fn total(&self) -> u64 {
        self.nodes_read + self.nodes_written
    }
}

impl fmt::Display for AccessSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Access {{ read: {}, written: {} }}",
            self.nodes_read, self.nodes_written
        )
    }
}
