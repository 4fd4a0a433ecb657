//! B-tree node representation.

use std::fmt::{self, Write};

/// A single B-tree node, standing in for one disk page.
///
/// Each child slot owns its subtree, so there are no parent pointers and
/// no shared handles. Splits and merges move whole boxed subtrees between
/// slots.
///
/// # Layout
/// ```text
///            keys:      [ k0 | k1 | k2 ]
///            children: [c0 | c1 | c2 | c3]
///
///   c0 < k0 < c1 < k1 < c2 < k2 < c3
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Box<Node<K>>>,
}

impl<K: Ord> Node<K> {
    /// Create an empty leaf.
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sorted keys stored in this node.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Child subtrees, empty for a leaf.
    pub fn children(&self) -> &[Box<Node<K>>] {
        &self.children
    }

    /// A node is a leaf iff it has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the node holds no keys (only the root of an empty tree).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Locate `key` among this node's keys.
    ///
    /// `Ok(i)` if `keys[i] == key`. `Err(i)` gives the first index with
    /// `key < keys[i]`, which is also the child slot to descend into.
    #[inline]
    pub(crate) fn find(&self, key: &K) -> Result<usize, usize> {
        self.keys.binary_search(key)
    }

    /// A node with `2t - 1` keys must be split before anything descends
    /// into it.
    #[inline]
    pub(crate) fn is_full(&self, max_keys: usize) -> bool {
        self.keys.len() >= max_keys
    }

    /// Append this subtree's keys in ascending order.
    pub(crate) fn collect_keys<'a>(&'a self, out: &mut Vec<&'a K>) {
        if self.is_leaf() {
            out.extend(self.keys.iter());
            return;
        }
        for (i, key) in self.keys.iter().enumerate() {
            self.children[i].collect_keys(out);
            out.push(key);
        }
        if let Some(last) = self.children.last() {
            last.collect_keys(out);
        }
    }

    /// Total number of keys in this subtree.
    pub(crate) fn subtree_len(&self) -> usize {
        self.keys.len()
            + self
                .children
                .iter()
                .map(|child| child.subtree_len())
                .sum::<usize>()
    }
}

impl<K: fmt::Display> Node<K> {
    /// Pre-order, one line per node: `Level {n}: k1 k2 ...`.
    pub(crate) fn write_levels(&self, level: usize, out: &mut String) -> fmt::Result {
        write!(out, "Level {}: ", level)?;
        for key in &self.keys {
            write!(out, "{} ", key)?;
        }
        out.push('\n');

        for child in &self.children {
            child.write_levels(level + 1, out)?;
        }
        Ok(())
    }
}
