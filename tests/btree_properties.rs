//! Property tests: random operation sequences checked against a
//! `BTreeSet` model.

use std::collections::BTreeSet;

use paged_btree::BTree;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Delete(i16),
    Search(i16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A narrow key range keeps collisions, hits and misses all common.
    let key = -200i16..200;
    prop_oneof![
        3 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::Delete),
        1 => key.prop_map(Op::Search),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_matches_model_and_keeps_invariants(
        t in 2usize..6,
        ops in proptest::collection::vec(op_strategy(), 1..400),
    ) {
        let mut tree = BTree::new(t).unwrap();
        let mut model = BTreeSet::new();
        let mut last = tree.stats();

        for op in ops {
            match op {
                Op::Insert(k) => prop_assert_eq!(tree.insert(k), model.insert(k)),
                Op::Delete(k) => prop_assert_eq!(tree.delete(&k), model.remove(&k)),
                Op::Search(k) => prop_assert_eq!(tree.contains(&k), model.contains(&k)),
            }

            if let Err(e) = tree.check_invariants() {
                return Err(TestCaseError::fail(e.to_string()));
            }

            let now = tree.stats();
            prop_assert!(now.nodes_read > last.nodes_read);
            prop_assert!(now.nodes_written >= last.nodes_written);
            last = now;
        }

        let keys: Vec<i16> = tree.keys().into_iter().copied().collect();
        let expected: Vec<i16> = model.into_iter().collect();
        prop_assert_eq!(tree.len(), expected.len());
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn prop_insert_delete_round_trip(
        t in 2usize..5,
        keys in proptest::collection::btree_set(0u32..10_000, 0..300),
        probe in 10_000u32..20_000,
    ) {
        let mut tree = BTree::new(t).unwrap();
        for &k in &keys {
            tree.insert(k);
        }
        let before: Vec<u32> = tree.keys().into_iter().copied().collect();

        prop_assert!(tree.insert(probe));
        prop_assert!(tree.contains(&probe));
        prop_assert!(tree.delete(&probe));
        prop_assert!(!tree.contains(&probe));

        let after: Vec<u32> = tree.keys().into_iter().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn prop_absent_delete_is_idempotent(
        t in 2usize..5,
        keys in proptest::collection::vec(0u32..1_000, 0..300),
        absent in proptest::collection::vec(1_000u32..2_000, 1..20),
    ) {
        let mut tree = BTree::new(t).unwrap();
        for &k in &keys {
            tree.insert(k);
        }
        let before: Vec<u32> = tree.keys().into_iter().copied().collect();

        for k in &absent {
            prop_assert!(!tree.delete(k));
        }

        let after: Vec<u32> = tree.keys().into_iter().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert!(tree.check_invariants().is_ok());
    }
}
