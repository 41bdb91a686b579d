//! Property tests: build and search checked against brute-force scans of
//! the input.

use bptindex::index::btree::{InternalNode, NodeRef};
use bptindex::{
    compare_key, BPlusTree, Error, Field, FieldOrdering, IndexConfig, Key, QueryField, QueryKey,
    Record,
};
use proptest::prelude::*;

/// Small domains so that duplicate keys and wildcard hits are common.
fn key_strategy() -> impl Strategy<Value = Key> {
    ("[a-d]", 0i64..3, "[xy]", 0i64..2).prop_map(|(a, b, c, d)| Key::from((a, b, c, d)))
}

fn sorted_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((key_strategy(), 0u8..4), 0..80).prop_map(|mut entries| {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
            .into_iter()
            .map(|(key, page)| Record::new(key, format!("p{}", page)))
            .collect()
    })
}

fn text_field(pattern: &'static str) -> impl Strategy<Value = QueryField> {
    prop_oneof![
        Just(QueryField::Wildcard),
        pattern.prop_map(|s| QueryField::Exact(Field::from(s))),
    ]
}

fn int_field(max: i64) -> impl Strategy<Value = QueryField> {
    prop_oneof![
        Just(QueryField::Wildcard),
        (0..max).prop_map(QueryField::from),
    ]
}

fn wildcard_query() -> impl Strategy<Value = QueryKey> {
    (text_field("[a-e]"), int_field(4), text_field("[xyz]"), int_field(3))
        .prop_map(|(a, b, c, d)| QueryKey::new([a, b, c, d]))
        .prop_filter("needs at least one wildcard", QueryKey::has_wildcard)
}

fn brute_force<'a>(records: &'a [Record], query: &QueryKey) -> Vec<&'a Record> {
    records.iter().filter(|r| query.matches(r.key())).collect()
}

fn check_separators(node: &NodeRef, tree: &BPlusTree) -> Result<(), TestCaseError> {
    if let NodeRef::Internal(inner) = node {
        let inner: &InternalNode = inner;
        prop_assert_eq!(inner.children().len(), inner.separators().len() + 1);
        for (i, separator) in inner.separators().iter().enumerate() {
            prop_assert_eq!(
                inner.children()[i + 1].smallest_key(tree.leaves()),
                Some(separator)
            );
        }
        for child in inner.children() {
            check_separators(child, tree)?;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_leaf_chain_reproduces_input(records in sorted_records(), capacity in 2usize..8) {
        let tree = BPlusTree::build(records.clone(), IndexConfig::new(capacity)).unwrap();
        let chained: Vec<Record> = tree
            .leaf_chain()
            .flat_map(|leaf| leaf.entries().iter().cloned())
            .collect();
        prop_assert_eq!(chained, records.clone());
        prop_assert_eq!(tree.len(), records.len());
        prop_assert_eq!(tree.leaf_chain().count(), tree.leaves().len());
    }

    #[test]
    fn prop_structure_invariants(records in sorted_records(), capacity in 2usize..8) {
        let tree = BPlusTree::build(records, IndexConfig::new(capacity)).unwrap();
        tree.check_invariants().unwrap();

        let leaf_capacity = capacity - 1;
        let last = tree.leaves().len().saturating_sub(1);
        for (i, leaf) in tree.leaves().iter().enumerate() {
            prop_assert!(!leaf.is_empty());
            prop_assert!(leaf.len() <= leaf_capacity);
            if i < last {
                prop_assert_eq!(leaf.len(), leaf_capacity);
            }
        }
        if let Some(root) = tree.root() {
            check_separators(root, &tree)?;
        }
    }

    #[test]
    fn prop_full_equality_matches_brute_force(
        records in sorted_records(),
        candidate in key_strategy(),
        capacity in 2usize..8,
    ) {
        let tree = BPlusTree::build(records.clone(), IndexConfig::new(capacity)).unwrap();
        if tree.is_empty() {
            prop_assert!(matches!(tree.search(&QueryKey::exact(&candidate)), Err(Error::EmptyTree)));
            return Ok(());
        }

        // Every stored key, plus one arbitrary key that may be absent
        let mut keys: Vec<&Key> = records.iter().map(Record::key).collect();
        keys.push(&candidate);
        for key in keys {
            let query = QueryKey::exact(key);
            let result = tree.search(&query).unwrap();
            prop_assert_eq!(&result.matches, &brute_force(&records, &query));
        }
    }

    #[test]
    fn prop_wildcard_matches_brute_force(
        records in sorted_records(),
        query in wildcard_query(),
        capacity in 2usize..8,
    ) {
        let tree = BPlusTree::build(records.clone(), IndexConfig::new(capacity)).unwrap();
        if tree.is_empty() {
            return Ok(());
        }
        let result = tree.search(&query).unwrap();
        prop_assert_eq!(&result.matches, &brute_force(&records, &query));
        prop_assert_eq!(
            result.distinct_locator_count(),
            brute_force(&records, &query)
                .iter()
                .map(|r| r.locator())
                .collect::<std::collections::BTreeSet<_>>()
                .len()
        );
    }

    #[test]
    fn prop_wildcard_stop_is_sound(
        records in sorted_records(),
        query in wildcard_query(),
        capacity in 2usize..8,
    ) {
        let tree = BPlusTree::build(records, IndexConfig::new(capacity)).unwrap();
        if tree.is_empty() {
            return Ok(());
        }
        let result = tree.search(&query).unwrap();
        if let Some(stop) = result.stopped_at {
            let leaf = tree.leaf(stop).unwrap();
            prop_assert_eq!(compare_key(&query, leaf.first_key().unwrap()), FieldOrdering::Less);
            let later_match = tree.leaves()[stop.0..]
                .iter()
                .flat_map(|l| l.entries())
                .any(|r| query.matches(r.key()));
            prop_assert!(!later_match);
            // Scanned leaves are exactly the ones between landing and stop
            prop_assert_eq!(result.leaves_visited, stop.0 - result.landed_leaf.0);
        } else {
            prop_assert_eq!(result.leaves_visited, tree.leaves().len() - result.landed_leaf.0);
        }
    }

    #[test]
    fn prop_search_is_idempotent(
        records in sorted_records(),
        query in wildcard_query(),
        capacity in 2usize..8,
    ) {
        let tree = BPlusTree::build(records, IndexConfig::new(capacity)).unwrap();
        if tree.is_empty() {
            return Ok(());
        }
        let first = tree.search(&query).unwrap();
        let second = tree.search(&query).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_invalid_capacity_is_rejected() {
    let records = vec![Record::new(Key::from(("a", 0, "x", 0)), "p0")];
    for capacity in [0, 1] {
        assert!(matches!(
            BPlusTree::build(records.clone(), IndexConfig::new(capacity)),
            Err(Error::InvalidCapacity { .. })
        ));
    }
}

#[test]
fn test_concurrent_readers() {
    use std::sync::Arc;
    use std::thread;

    let records: Vec<Record> = (0..500)
        .map(|i| Record::new(Key::from(("k", i / 10, "x", i % 10)), format!("p{}", i / 25)))
        .collect();
    let tree = Arc::new(BPlusTree::build(records, IndexConfig::new(5)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                let query = QueryKey::from(("k", t * 10, "*", "*"));
                tree.search(&query).unwrap().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
}
