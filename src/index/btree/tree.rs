//! The B-tree handle and its public operations.

use std::fmt;

use tracing::debug;

use crate::common::config::{max_keys, TreeConfig};
use crate::common::Result;
use crate::index::btree::{AccessSnapshot, AccessStats, Node};

/// A B-tree of minimum degree `t` with simulated page I/O accounting.
///
/// # Structure
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │                  BTree<K>                    │
/// │  root: Box<Node<K>>   min_degree: t          │
/// │  stats: AccessStats { nodes_read, written }  │
/// └──────────────────────────────────────────────┘
///          │ owns
///          ▼
///     [ k0 | k1 ]          every non-root node: t-1 ..= 2t-1 keys
///     /    |    \          internal node: keys + 1 children
///  [..]  [..]  [..]        all leaves at the same depth
/// ```
///
/// Insertion splits full nodes on the way down; deletion tops up thin
/// nodes on the way down. Neither ever walks back up.
///
/// # Example
/// ```
/// use paged_btree::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for k in [10, 20, 5, 6, 12] {
///     tree.insert(k);
/// }
/// assert!(tree.contains(&6));
/// assert!(tree.delete(&6));
/// assert!(!tree.contains(&6));
/// assert!(tree.nodes_read() > 0);
/// ```
#[derive(Debug)]
pub struct BTree<K> {
    root: Box<Node<K>>,
    min_degree: usize,
    stats: AccessStats,
}

/// Degree and counters borrowed for the duration of one operation.
///
/// Kept apart from [`BTree`] so that the recursive procedures can hold
/// `&mut` to a single node while still counting through `&AccessStats`.
pub(crate) struct NodeIo<'a> {
    pub(crate) min_degree: usize,
    stats: &'a AccessStats,
}

impl<'a> NodeIo<'a> {
    pub(crate) fn new(min_degree: usize, stats: &'a AccessStats) -> Self {
        Self { min_degree, stats }
    }

    /// Count a node inspected to make a branching decision.
    #[inline]
    pub(crate) fn read(&self) {
        self.stats.record_read();
    }

    /// Count a node whose keys or children changed.
    #[inline]
    pub(crate) fn write(&self) {
        self.stats.record_write();
    }

    #[inline]
    pub(crate) fn max_keys(&self) -> usize {
        max_keys(self.min_degree)
    }
}

impl<K: Ord> BTree<K> {
    /// Create an empty tree with minimum degree `min_degree`.
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if `min_degree < 2`
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(min_degree))
    }

    /// Create an empty tree from a [`TreeConfig`].
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if the configured degree is below 2
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            target: "paged_btree::tree",
            min_degree = config.min_degree,
            "created b-tree"
        );
        Ok(Self {
            root: Box::new(Node::new()),
            min_degree: config.min_degree,
            stats: AccessStats::new(),
        })
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Find the node holding `key` and the key's index within it.
    ///
    /// Reads one node per level until a match or a leaf. Absence is not an
    /// error and returns `None`.
    pub fn search(&self, key: &K) -> Option<(&Node<K>, usize)> {
        let mut node: &Node<K> = &self.root;
        loop {
            self.stats.record_read();
            match node.find(key) {
                Ok(i) => return Some((node, i)),
                Err(_) if node.is_leaf() => return None,
                Err(i) => node = &node.children[i],
            }
        }
    }

    /// True if `key` is stored in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `key`.
    ///
    /// A full root is split first, which is the only way the tree grows in
    /// height. Returns `false` if the key was already present; splits made
    /// on the way down are kept.
    pub fn insert(&mut self, key: K) -> bool {
        let io = NodeIo::new(self.min_degree, &self.stats);

        io.read();
        if self.root.is_full(io.max_keys()) {
            let old_root = std::mem::replace(&mut self.root, Box::new(Node::new()));
            self.root.children.push(old_root);
            io.split_child(&mut self.root, 0);
            debug!(
                target: "paged_btree::insert",
                height = self.height(),
                "root split"
            );
        }

        io.insert_non_full(&mut self.root, key)
    }

    /// Remove `key`.
    ///
    /// Returns `false` if the key was absent. Rebalancing done while
    /// looking for it never loses keys. A keyless internal root left by a
    /// merge is replaced by its only child.
    pub fn delete(&mut self, key: &K) -> bool {
        let io = NodeIo::new(self.min_degree, &self.stats);

        io.read();
        let removed = io.delete_from(&mut self.root, key);

        if self.root.is_empty() && !self.root.is_leaf() {
            if let Some(child) = self.root.children.pop() {
                self.root = child;
                debug!(
                    target: "paged_btree::delete",
                    height = self.height(),
                    "root collapsed"
                );
            }
        }

        removed
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Cumulative node reads. Never reset.
    pub fn nodes_read(&self) -> u64 {
        self.stats.nodes_read()
    }

    /// Cumulative node writes. Never reset.
    pub fn nodes_written(&self) -> u64 {
        self.stats.nodes_written()
    }

    /// Both counters at this instant.
    pub fn stats(&self) -> AccessSnapshot {
        self.stats.snapshot()
    }

    /// The minimum degree `t` fixed at construction.
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// The root node.
    pub fn root(&self) -> &Node<K> {
        &self.root
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        let mut out = Vec::new();
        self.root.collect_keys(&mut out);
        out
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Edges from the root to any leaf. An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut node: &Node<K> = &self.root;
        let mut height = 0;
        while let Some(child) = node.children.first() {
            node = child;
            height += 1;
        }
        height
    }
}

impl<K: Ord + fmt::Display> BTree<K> {
    /// Level-by-level dump, one line per node in pre-order.
    ///
    /// ```
    /// use paged_btree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// for k in 1..=4 {
    ///     tree.insert(k);
    /// }
    /// assert_eq!(tree.render(), "Level 0: 2 \nLevel 1: 1 \nLevel 1: 3 4 \n");
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.root.write_levels(0, &mut out);
        out
    }

    /// Print [`render`](Self::render) to stdout.
    pub fn print_tree(&self) {
        print!("{}", self.render());
    }
}

impl<K: Ord> Default for BTree<K> {
    fn default() -> Self {
        Self {
            root: Box::new(Node::new()),
            min_degree: TreeConfig::default().min_degree,
            stats: AccessStats::new(),
        }
    }
}
