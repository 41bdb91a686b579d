//! Worked example: NODECAP = 3 over keys A..E.
//!
//! ```text
//!            [C | E]
//!          /    |    \
//!     [A,B] → [C,D] → [E]
//! ```

use bptindex::{BPlusTree, IndexConfig, Key, LeafId, QueryKey, Record};

fn example_tree() -> BPlusTree {
    let records = ["A", "B", "C", "D", "E"]
        .into_iter()
        .map(|name| Record::new(Key::from((name, 1, 0, 0)), format!("page-{}", name)));
    BPlusTree::build(records, IndexConfig::new(3)).unwrap()
}

fn names(result: &bptindex::SearchResult<'_>) -> Vec<String> {
    result
        .matches
        .iter()
        .map(|r| r.key().fields()[0].to_string())
        .collect()
}

#[test]
fn test_leaf_layout() {
    let tree = example_tree();
    let layout: Vec<Vec<String>> = tree
        .leaf_chain()
        .map(|leaf| {
            leaf.entries()
                .iter()
                .map(|r| r.key().fields()[0].to_string())
                .collect()
        })
        .collect();
    assert_eq!(layout, vec![vec!["A", "B"], vec!["C", "D"], vec!["E"]]);
    tree.check_invariants().unwrap();
}

#[test]
fn test_full_equality_lands_on_matching_leaf() {
    let tree = example_tree();
    let result = tree.search(&QueryKey::from(("C", 1, 0, 0))).unwrap();

    assert_eq!(result.landed_leaf, LeafId::new(1));
    assert_eq!(names(&result), vec!["C"]);
    assert_eq!(result.matches[0].locator().as_str(), "page-C");
    assert_eq!(result.internal_nodes_visited, 1);
    assert_eq!(result.leaves_visited, 1);
}

#[test]
fn test_every_key_is_found() {
    let tree = example_tree();
    for name in ["A", "B", "C", "D", "E"] {
        let result = tree.search(&QueryKey::from((name, 1, 0, 0))).unwrap();
        assert_eq!(names(&result), vec![name], "searching {}", name);
    }
}

#[test]
fn test_wildcard_scans_whole_sibling_chain() {
    let tree = example_tree();
    let result = tree.search(&QueryKey::from(("*", 1, 0, 0))).unwrap();

    assert_eq!(result.landed_leaf, LeafId::new(0));
    assert_eq!(names(&result), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(result.leaves_visited, 3);
    assert_eq!(result.stopped_at, None);
    assert_eq!(result.total_nodes_visited(), 4);
    assert_eq!(result.distinct_locator_count(), 5);
}

#[test]
fn test_wildcard_with_no_match() {
    let tree = example_tree();
    let result = tree.search(&QueryKey::from(("*", 2, 0, 0))).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.leaves_visited, 3);
}

#[test]
fn test_missing_key() {
    let tree = example_tree();
    let result = tree.search(&QueryKey::from(("BB", 1, 0, 0))).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.landed_leaf, LeafId::new(0));
}

#[test]
fn test_repeated_search_is_identical() {
    let tree = example_tree();
    let query = QueryKey::from(("*", 1, 0, 0));
    let first = tree.search(&query).unwrap();
    let second = tree.search(&query).unwrap();
    assert_eq!(first, second);
}
