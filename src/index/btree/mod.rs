//! B-tree index with simulated page I/O.
//!
//! # Components
//! - [`BTree`] - The tree handle: search, insert, delete, diagnostics
//! - [`Node`] - One node, standing in for one disk page
//! - [`AccessStats`] / [`AccessSnapshot`] - Node read/write counters
//!
//! Insertion and deletion live in their own modules as extra
//! `impl` blocks on the per-operation I/O context.

mod delete;
mod insert;
mod node;
mod stats;
mod tree;
mod verify;

pub use node::Node;
pub use stats::{AccessSnapshot, AccessStats};
pub use tree::BTree;
