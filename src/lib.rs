//! paged-btree - A B-tree index that accounts for every simulated page access.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          paged-btree                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Driver (bin/btree-bench)                      │   │
//! │  │    key sequences → insert / search / delete phases       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   search · split-before-descend insert · top-down delete │   │
//! │  │         merge · sibling borrow · pred/succ extraction    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Access accounting (AccessStats)                 │   │
//! │  │        one read per node inspected, one write per        │   │
//! │  │              node changed. No real I/O.                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use paged_btree::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for k in 1..=9 {
//!     tree.insert(k);
//! }
//! assert!(tree.contains(&7));
//!
//! tree.delete(&5);
//! assert_eq!(tree.keys(), vec![&1, &2, &3, &4, &6, &7, &8, &9]);
//! println!("{}", tree.stats());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{TreeConfig, DEFAULT_MIN_DEGREE};
pub use common::{Error, Result};

pub use index::btree::{AccessSnapshot, AccessStats, BTree, Node};
