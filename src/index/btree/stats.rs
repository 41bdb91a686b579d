//! Shape statistics of a built tree.

use std::fmt;

/// A point-in-time summary of a tree's shape.
///
/// The tree is immutable after build, so a snapshot never goes stale.
///
/// # Example
/// ```
/// use bptindex::{BPlusTree, IndexConfig, Key, Record};
///
/// let records = (0..5).map(|i| Record::new(Key::from(("k", i, 0, 0)), "p"));
/// let tree = BPlusTree::build(records, IndexConfig::new(3)).unwrap();
///
/// let stats = tree.stats();
/// assert_eq!(stats.leaves, 3);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Number of indexed records.
    pub records: usize,

    /// Number of leaf nodes.
    pub leaves: usize,

    /// Number of internal nodes across all levels.
    pub internal_nodes: usize,

    /// Levels from root to leaf inclusive; 0 for an empty tree.
    pub height: usize,
}

impl TreeStats {
    /// Average number of records per leaf (0.0 for an empty tree).
    pub fn leaf_fill(&self) -> f64 {
        if self.leaves == 0 {
            0.0
        } else {
            self.records as f64 / self.leaves as f64
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tree {{ records: {}, leaves: {}, internal: {}, height: {}, fill: {:.2} }}",
            self.records,
            self.leaves,
            self.internal_nodes,
            self.height,
            self.leaf_fill()
        )
    }
}
