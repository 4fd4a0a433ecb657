//! Top-down deletion.
//!
//! Before the descent enters a child, that child is topped up to at least
//! `t` keys by borrowing from a sibling or merging with one. Removing a key
//! from the child can then never leave it below `t - 1`, so no second pass
//! is needed.
//!
//! # Cases at node `x`
//! 1. `x` is a leaf holding the key: remove it.
//! 2. `x` is internal holding the key at `i`:
//!    - (a) `children[i]` has `t` keys: replace with the predecessor
//!    - (b) `children[i + 1]` has `t` keys: replace with the successor
//!    - (c) otherwise merge both children around the key and recurse
//! 3. The key is not in `x`: top up `children[i]`, then recurse into it.

use std::mem;

use tracing::trace;

use crate::index::btree::tree::NodeIo;
use crate::index::btree::Node;

impl NodeIo<'_> {
    /// Remove `key` from the subtree under `node`.
    ///
    /// `node` has already been read by the caller. Returns `false` if the
    /// key is absent.
    pub(crate) fn delete_from<K: Ord>(&self, node: &mut Node<K>, key: &K) -> bool {
        match node.find(key) {
            Ok(i) => {
                self.remove_at(node, i);
                true
            }
            Err(_) if node.is_leaf() => false,
            Err(i) => {
                let i = self.fill_child(node, i);
                self.delete_from(&mut node.children[i], key)
            }
        }
    }

    /// Remove `node.keys[i]`.
    fn remove_at<K: Ord>(&self, node: &mut Node<K>, i: usize) {
        if node.is_leaf() {
            node.keys.remove(i);
            self.write();
            return;
        }

        let t = self.min_degree;

        self.read();
        if node.children[i].len() >= t {
            node.keys[i] = self.pop_max(&mut node.children[i]);
            self.write();
            return;
        }

        self.read();
        if node.children[i + 1].len() >= t {
            node.keys[i] = self.pop_min(&mut node.children[i + 1]);
            self.write();
            return;
        }

        // Both neighbours hold t - 1 keys. After the merge the key sits
        // right after the left child's original keys.
        let at = node.children[i].len();
        self.merge(node, i);
        self.remove_at(&mut node.children[i], at);
    }

    /// Remove and return the largest key under `node`.
    fn pop_max<K: Ord>(&self, node: &mut Node<K>) -> K {
        if node.is_leaf() {
            let key = node.keys.remove(node.keys.len() - 1);
            self.write();
            return key;
        }
        let last = node.children.len() - 1;
        let last = self.fill_child(node, last);
        self.pop_max(&mut node.children[last])
    }

    /// Remove and return the smallest key under `node`.
    fn pop_min<K: Ord>(&self, node: &mut Node<K>) -> K {
        if node.is_leaf() {
            let key = node.keys.remove(0);
            self.write();
            return key;
        }
        let first = self.fill_child(node, 0);
        self.pop_min(&mut node.children[first])
    }

    /// Make sure `node.children[i]` holds at least `t` keys.
    ///
    /// Tries the left sibling, then the right sibling, then merges (with
    /// the right sibling unless `i` is the last child). Returns the index
    /// of the child that now covers the same key range, which is `i - 1`
    /// after a merge into the left sibling and `i` otherwise.
    fn fill_child<K: Ord>(&self, node: &mut Node<K>, i: usize) -> usize {
        let t = self.min_degree;

        self.read();
        if node.children[i].len() >= t {
            return i;
        }

        if i > 0 {
            self.read();
            if node.children[i - 1].len() >= t {
                self.borrow_from_left(node, i);
                return i;
            }
        }

        if i + 1 < node.children.len() {
            self.read();
            if node.children[i + 1].len() >= t {
                self.borrow_from_right(node, i);
                return i;
            }
            self.merge(node, i);
            i
        } else {
            self.merge(node, i - 1);
            i - 1
        }
    }

    /// Fuse `parent.children[i]`, `parent.keys[i]` and
    /// `parent.children[i + 1]` into one node at slot `i`.
    ///
    /// Writes the parent and the surviving node. The absorbed right node is
    /// dropped.
    fn merge<K: Ord>(&self, parent: &mut Node<K>, i: usize) {
        let Node {
            keys: right_keys,
            children: right_children,
        } = *parent.children.remove(i + 1);
        let separator = parent.keys.remove(i);

        let left = &mut parent.children[i];
        left.keys.push(separator);
        left.keys.extend(right_keys);
        left.children.extend(right_children);

        self.write();
        self.write();
        trace!(
            target: "paged_btree::delete",
            index = i,
            merged_keys = parent.children[i].len(),
            "merged children"
        );
    }

    /// Rotate one key from `children[i - 1]` through the parent into
    /// `children[i]`.
    fn borrow_from_left<K: Ord>(&self, parent: &mut Node<K>, i: usize) {
        let Node { keys, children } = parent;
        let (before, after) = children.split_at_mut(i);
        let left = &mut before[i - 1];
        let child = &mut after[0];

        if let Some(borrowed) = left.keys.pop() {
            let separator = mem::replace(&mut keys[i - 1], borrowed);
            child.keys.insert(0, separator);
            if let Some(subtree) = left.children.pop() {
                child.children.insert(0, subtree);
            }
        }

        self.write();
        self.write();
        self.write();
        trace!(target: "paged_btree::delete", index = i, "borrowed from left sibling");
    }

    /// Rotate one key from `children[i + 1]` through the parent into
    /// `children[i]`.
    fn borrow_from_right<K: Ord>(&self, parent: &mut Node<K>, i: usize) {
        let Node { keys, children } = parent;
        let (before, after) = children.split_at_mut(i + 1);
        let child = &mut before[i];
        let right = &mut after[0];

        let borrowed = right.keys.remove(0);
        let separator = mem::replace(&mut keys[i], borrowed);
        child.keys.push(separator);
        if !right.is_leaf() {
            child.children.push(right.children.remove(0));
        }

        self.write();
        self.write();
        self.write();
        trace!(target: "paged_btree::delete", index = i, "borrowed from right sibling");
    }
}

#[cfg(test)]
mod tests {
    use crate::index::btree::tree::NodeIo;
    use crate::index::btree::{AccessStats, BTree, Node};

    fn leaf(keys: &[i32]) -> Box<Node<i32>> {
        Box::new(Node {
            keys: keys.to_vec(),
            children: Vec::new(),
        })
    }

    fn tree_with(t: usize, keys: impl IntoIterator<Item = i32>) -> BTree<i32> {
        let mut tree = BTree::new(t).unwrap();
        for k in keys {
            tree.insert(k);
        }
        tree
    }

    fn sorted(tree: &BTree<i32>) -> Vec<i32> {
        tree.keys().into_iter().copied().collect()
    }

    #[test]
    fn test_merge_pulls_down_separator() {
        let stats = AccessStats::new();
        let io = NodeIo::new(2, &stats);
        let mut parent = Node {
            keys: vec![10, 20],
            children: vec![leaf(&[5]), leaf(&[15]), leaf(&[25])],
        };

        io.merge(&mut parent, 0);

        assert_eq!(parent.keys(), &[20]);
        assert_eq!(parent.children().len(), 2);
        assert_eq!(parent.children()[0].keys(), &[5, 10, 15]);
        assert_eq!(stats.nodes_written(), 2);
    }

    #[test]
    fn test_merge_internal_concatenates_children() {
        let stats = AccessStats::new();
        let io = NodeIo::new(2, &stats);
        let left = Box::new(Node {
            keys: vec![2],
            children: vec![leaf(&[1]), leaf(&[3])],
        });
        let right = Box::new(Node {
            keys: vec![6],
            children: vec![leaf(&[5]), leaf(&[7])],
        });
        let mut parent = Node {
            keys: vec![4],
            children: vec![left, right],
        };

        io.merge(&mut parent, 0);

        assert!(parent.keys().is_empty());
        let merged = &parent.children()[0];
        assert_eq!(merged.keys(), &[2, 4, 6]);
        let child_keys: Vec<&[i32]> = merged.children().iter().map(|c| c.keys()).collect();
        assert_eq!(child_keys, vec![&[1][..], &[3][..], &[5][..], &[7][..]]);
    }

    #[test]
    fn test_borrow_from_left_moves_subtree() {
        let stats = AccessStats::new();
        let io = NodeIo::new(2, &stats);
        let left = Box::new(Node {
            keys: vec![2, 4],
            children: vec![leaf(&[1]), leaf(&[3]), leaf(&[5])],
        });
        let child = Box::new(Node {
            keys: vec![8],
            children: vec![leaf(&[7]), leaf(&[9])],
        });
        let mut parent = Node {
            keys: vec![6],
            children: vec![left, child],
        };

        io.borrow_from_left(&mut parent, 1);

        assert_eq!(parent.keys(), &[4]);
        assert_eq!(parent.children()[0].keys(), &[2]);
        let child = &parent.children()[1];
        assert_eq!(child.keys(), &[6, 8]);
        assert_eq!(child.children()[0].keys(), &[5]);
        assert_eq!(child.children().len(), 3);
        assert_eq!(stats.nodes_written(), 3);
    }

    #[test]
    fn test_borrow_from_right_moves_subtree() {
        let stats = AccessStats::new();
        let io = NodeIo::new(2, &stats);
        let child = Box::new(Node {
            keys: vec![2],
            children: vec![leaf(&[1]), leaf(&[3])],
        });
        let right = Box::new(Node {
            keys: vec![6, 8],
            children: vec![leaf(&[5]), leaf(&[7]), leaf(&[9])],
        });
        let mut parent = Node {
            keys: vec![4],
            children: vec![child, right],
        };

        io.borrow_from_right(&mut parent, 0);

        assert_eq!(parent.keys(), &[6]);
        let child = &parent.children()[0];
        assert_eq!(child.keys(), &[2, 4]);
        assert_eq!(child.children()[2].keys(), &[5]);
        assert_eq!(parent.children()[1].keys(), &[8]);
        assert_eq!(parent.children()[1].children().len(), 2);
    }

    #[test]
    fn test_delete_internal_uses_predecessor() {
        let mut tree = tree_with(2, [10, 20, 30, 40, 5, 6]);
        // Root [20] over [5 6 10] and [30 40]; the left child can spare a key.
        assert_eq!(tree.root().keys(), &[20]);
        assert!(tree.delete(&20));
        assert_eq!(tree.root().keys(), &[10]);
        assert_eq!(tree.root().children()[0].keys(), &[5, 6]);
        assert_eq!(sorted(&tree), vec![5, 6, 10, 30, 40]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_internal_uses_successor() {
        let mut tree = tree_with(2, [10, 20, 30, 40]);
        // Root [20] over [10] and [30 40]; only the right child can spare.
        assert_eq!(tree.root().keys(), &[20]);
        assert!(tree.delete(&20));
        assert_eq!(tree.root().keys(), &[30]);
        assert_eq!(tree.root().children()[1].keys(), &[40]);
        assert_eq!(sorted(&tree), vec![10, 30, 40]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_internal_merges_thin_children() {
        // Root [2] over [1] and [3]: both children at t - 1 = 1 key.
        let mut tree = tree_with(2, [1, 2, 3, 4]);
        tree.delete(&4);
        assert_eq!(tree.root().keys(), &[2]);

        assert!(tree.delete(&2));
        assert_eq!(tree.height(), 0);
        assert_eq!(sorted(&tree), vec![1, 3]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_every_other_key() {
        let mut tree = tree_with(3, 1..=200);
        for k in (1..=200).step_by(2) {
            assert!(tree.delete(&k));
            tree.check_invariants().unwrap();
        }
        assert_eq!(sorted(&tree), (2..=200).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_delete_counts_writes() {
        let mut tree = tree_with(3, 1..=9);
        let before = tree.stats();
        tree.delete(&9);
        // Root read, child read, leaf write.
        let delta = tree.stats().since(&before);
        assert_eq!(delta.nodes_read, 2);
        assert_eq!(delta.nodes_written, 1);
    }
}
