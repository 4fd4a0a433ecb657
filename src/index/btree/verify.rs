//! Structural invariant checks.
//!
//! Walks the whole tree and reports the first node that breaks the B-tree
//! property. Meant for tests and debugging; the mutating operations never
//! call it.

use std::fmt::Debug;

use crate::common::config::{max_keys, min_keys};
use crate::common::{Error, Result};
use crate::index::btree::{BTree, Node};

/// Shared state for one verification walk.
struct Checker {
    min_degree: usize,
    leaf_depth: Option<usize>,
}

impl<K: Ord + Debug> BTree<K> {
    /// Verify every structural invariant.
    ///
    /// - non-root nodes hold `t - 1 ..= 2t - 1` keys, the root at most `2t - 1`
    /// - an internal node with `k` keys has `k + 1` children
    /// - keys are strictly ascending and `children[i]` lies between
    ///   `keys[i - 1]` and `keys[i]`
    /// - all leaves are at the same depth
    ///
    /// Does not touch the access counters.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first offending node
    pub fn check_invariants(&self) -> Result<()> {
        let mut checker = Checker {
            min_degree: self.min_degree(),
            leaf_depth: None,
        };
        checker.check(self.root(), 0, None, None)
    }
}

impl Checker {
    fn check<K: Ord + Debug>(
        &mut self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<()> {
        let t = self.min_degree;
        let is_root = depth == 0;

        if node.len() > max_keys(t) {
            return Err(violation(format!(
                "node at depth {} holds {} keys, max is {}",
                depth,
                node.len(),
                max_keys(t)
            )));
        }
        if !is_root && node.len() < min_keys(t) {
            return Err(violation(format!(
                "node at depth {} holds {} keys, min is {}",
                depth,
                node.len(),
                min_keys(t)
            )));
        }
        if is_root && node.is_empty() && !node.is_leaf() {
            return Err(violation("internal root holds no keys".into()));
        }

        if let Some(pair) = node.keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(violation(format!(
                "keys not strictly ascending at depth {}: {:?} then {:?}",
                depth, pair[0], pair[1]
            )));
        }
        if let (Some(lo), Some(first)) = (lower, node.keys.first()) {
            if first <= lo {
                return Err(violation(format!(
                    "key {:?} at depth {} is not above separator {:?}",
                    first, depth, lo
                )));
            }
        }
        if let (Some(hi), Some(last)) = (upper, node.keys.last()) {
            if last >= hi {
                return Err(violation(format!(
                    "key {:?} at depth {} is not below separator {:?}",
                    last, depth, hi
                )));
            }
        }

        if node.is_leaf() {
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(violation(format!(
                    "leaf at depth {}, expected {}",
                    depth, expected
                ))),
            };
        }

        if node.children.len() != node.len() + 1 {
            return Err(violation(format!(
                "internal node at depth {} has {} keys and {} children",
                depth,
                node.len(),
                node.children.len()
            )));
        }

        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
            let hi = if i == node.len() { upper } else { node.keys.get(i) };
            self.check(child, depth + 1, lo, hi)?;
        }
        Ok(())
    }
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}
