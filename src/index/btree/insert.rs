//! Top-down insertion.
//!
//! Any full child is split before the descent enters it, so a single pass
//! from the root always finds room at the leaf and never has to push a
//! median back up.

use std::cmp::Ordering;

use tracing::trace;

use crate::index::btree::tree::NodeIo;
use crate::index::btree::Node;

impl NodeIo<'_> {
    /// Insert `key` under `node`, which must not be full.
    ///
    /// `node` has already been read by the caller. Returns `false` if the
    /// key is already present.
    pub(crate) fn insert_non_full<K: Ord>(&self, node: &mut Node<K>, key: K) -> bool {
        let mut i = match node.find(&key) {
            Ok(_) => return false,
            Err(i) => i,
        };

        if node.is_leaf() {
            node.keys.insert(i, key);
            self.write();
            return true;
        }

        self.read();
        if node.children[i].is_full(self.max_keys()) {
            self.split_child(node, i);
            // The promoted median now sits at keys[i].
            match key.cmp(&node.keys[i]) {
                Ordering::Less => {}
                Ordering::Equal => return false,
                Ordering::Greater => i += 1,
            }
        }

        self.insert_non_full(&mut node.children[i], key)
    }

    /// Split the full child `parent.children[i]` around its median.
    ///
    /// ```text
    ///   parent: [ .. a  b .. ]          parent: [ .. a  m  b .. ]
    ///                 |           =>                /    \
    ///          [ l0..l(t-2) m r0..r(t-2) ]     [l0..]    [r0..]
    /// ```
    ///
    /// The left half stays in place, the right half moves to a new sibling
    /// at `i + 1`, and the median moves up into `parent.keys[i]`. Writes
    /// the parent and both halves.
    pub(crate) fn split_child<K: Ord>(&self, parent: &mut Node<K>, i: usize) {
        let t = self.min_degree;
        let child = &mut parent.children[i];
        debug_assert_eq!(child.len(), self.max_keys());

        let right_keys = child.keys.split_off(t);
        let right_children = if child.is_leaf() {
            Vec::new()
        } else {
            child.children.split_off(t)
        };
        let median = child.keys.remove(t - 1);

        let right = Box::new(Node {
            keys: right_keys,
            children: right_children,
        });
        parent.keys.insert(i, median);
        parent.children.insert(i + 1, right);

        self.write();
        self.write();
        self.write();
        trace!(
            target: "paged_btree::insert",
            index = i,
            parent_keys = parent.len(),
            "split child"
        );
    }
}
