//! Bottom-up bulk loading.
//!
//! ```text
//! records (sorted) ──chunk(NODECAP-1)──▶ [L0]→[L1]→[L2]→ ... →[Ln]
//!                                          └──chunk(NODECAP)──┘
//!                                               [I0] [I1] ...
//!                                                 └───...───┘
//!                                                    root
//! ```

use tracing::{debug, info};

use crate::common::config::IndexConfig;
use crate::common::{Error, LeafId, Result};
use crate::index::btree::node::{InternalNode, LeafNode, NodeRef};
use crate::index::btree::record::Record;
use crate::index::btree::BPlusTree;

/// Builds a [`BPlusTree`] from records already sorted by key.
///
/// The input order is trusted, not verified. Unsorted input still builds,
/// but searches on the result are unspecified; use
/// [`BPlusTree::check_invariants`] to detect it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    config: IndexConfig,
}

impl TreeBuilder {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Bulk-load `records` into a new tree.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` if the configured capacity is below 2.
    /// No record is consumed in that case.
    pub fn build<I>(&self, records: I) -> Result<BPlusTree>
    where
        I: IntoIterator<Item = Record>,
    {
        self.config.validate()?;

        let mut leaves = pack_leaves(records, self.config.leaf_capacity());
        link_leaves(&mut leaves);
        let record_count = leaves.iter().map(LeafNode::len).sum();
        debug!(leaves = leaves.len(), "generated leaf level");

        let mut level: Vec<NodeRef> = (0..leaves.len())
            .map(|i| NodeRef::Leaf(LeafId::new(i)))
            .collect();
        let mut depth = 1;

        while level.len() > 1 {
            level = group_level(level, self.config.fan_out(), &leaves)?;
            depth += 1;
            debug!(depth, nodes = level.len(), "created internal level");
        }

        let root = level.pop();
        info!(
            records = record_count,
            leaves = leaves.len(),
            height = root.as_ref().map_or(0, NodeRef::height),
            "built B+tree"
        );

        Ok(BPlusTree::from_parts(self.config, leaves, root, record_count))
    }
}

/// Chunk records into leaves of at most `leaf_capacity` entries.
fn pack_leaves<I>(records: I, leaf_capacity: usize) -> Vec<LeafNode>
where
    I: IntoIterator<Item = Record>,
{
    let mut leaves = Vec::new();
    let mut current = Vec::with_capacity(leaf_capacity);

    for record in records {
        current.push(record);
        if current.len() == leaf_capacity {
            let full = std::mem::replace(&mut current, Vec::with_capacity(leaf_capacity));
            leaves.push(LeafNode::new(full));
        }
    }

    // Tail group; empty when the count is an exact multiple
    if !current.is_empty() {
        leaves.push(LeafNode::new(current));
    }

    leaves
}

fn link_leaves(leaves: &mut [LeafNode]) {
    let count = leaves.len();
    for (i, leaf) in leaves.iter_mut().enumerate().take(count.saturating_sub(1)) {
        leaf.set_next(LeafId::new(i + 1));
    }
}

/// Group one level into parents of at most `fan_out` children each.
fn group_level(level: Vec<NodeRef>, fan_out: usize, leaves: &[LeafNode]) -> Result<Vec<NodeRef>> {
    let mut parents = Vec::with_capacity(level.len().div_ceil(fan_out));
    let mut nodes = level.into_iter().peekable();

    while nodes.peek().is_some() {
        let children: Vec<NodeRef> = nodes.by_ref().take(fan_out).collect();
        let separators = children[1..]
            .iter()
            .map(|child| {
                child.smallest_key(leaves).cloned().ok_or_else(|| {
                    Error::InvariantViolation("child subtree has no leftmost key".to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;
        parents.push(NodeRef::Internal(Box::new(InternalNode::new(
            separators, children,
        ))));
    }

    Ok(parents)
}
