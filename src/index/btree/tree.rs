//! The built tree: leaf arena, root, and read-only introspection.

use std::fmt::Write as _;

use crate::common::config::IndexConfig;
use crate::common::{Error, LeafId, Result};
use crate::index::btree::builder::TreeBuilder;
use crate::index::btree::key::Key;
use crate::index::btree::node::{InternalNode, LeafNode, NodeRef};
use crate::index::btree::record::Record;
use crate::index::btree::stats::TreeStats;

/// A static B+tree, bulk-loaded once and immutable afterwards.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                         BPlusTree                           │
/// │                                                             │
/// │   root: NodeRef ──▶ Internal { separators, children }       │
/// │                         │           │           │           │
/// │                    Leaf(0)     Leaf(1)      Leaf(2)         │
/// │                         │           │           │           │
/// │   leaves: Vec<LeafNode> ▼           ▼           ▼           │
/// │          [L0] ──next──▶ [L1] ──next──▶ [L2] ──next──▶ None  │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// Nothing is mutated after [`TreeBuilder::build`] returns, so a tree can
/// be shared (e.g. in an `Arc`) and searched from several threads without
/// locking.
///
/// # Usage
/// ```
/// use bptindex::{BPlusTree, IndexConfig, Key, QueryKey, Record};
///
/// let records = ["A", "B", "C", "D", "E"]
///     .into_iter()
///     .map(|name| Record::new(Key::from((name, 1, 0, 0)), name));
/// let tree = BPlusTree::build(records, IndexConfig::new(3))?;
///
/// let hit = tree.search(&QueryKey::from(("C", 1, 0, 0)))?;
/// assert_eq!(hit.len(), 1);
///
/// let all = tree.search(&QueryKey::from(("*", 1, 0, 0)))?;
/// assert_eq!(all.len(), 5);
/// # Ok::<(), bptindex::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    config: IndexConfig,

    /// Leaf arena in sibling order.
    pub(crate) leaves: Vec<LeafNode>,

    /// `None` only when built from zero records.
    pub(crate) root: Option<NodeRef>,

    record_count: usize,
}

impl BPlusTree {
    /// Shorthand for `TreeBuilder::new(config).build(records)`.
    pub fn build<I>(records: I, config: IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        TreeBuilder::new(config).build(records)
    }

    pub(crate) fn from_parts(
        config: IndexConfig,
        leaves: Vec<LeafNode>,
        root: Option<NodeRef>,
        record_count: usize,
    ) -> Self {
        Self {
            config,
            leaves,
            root,
            record_count,
        }
    }

    #[inline]
    pub fn root(&self) -> Option<&NodeRef> {
        self.root.as_ref()
    }

    /// True if the tree was built from zero records and has no root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of indexed records.
    #[inline]
    pub fn len(&self) -> usize {
        self.record_count
    }

    #[inline]
    pub fn leaf(&self, id: LeafId) -> Option<&LeafNode> {
        self.leaves.get(id.0)
    }

    /// All leaves, in arena (= sibling) order.
    #[inline]
    pub fn leaves(&self) -> &[LeafNode] {
        &self.leaves
    }

    /// Walk the sibling chain from the leftmost leaf.
    pub fn leaf_chain(&self) -> LeafChain<'_> {
        LeafChain {
            leaves: &self.leaves,
            next: if self.leaves.is_empty() {
                None
            } else {
                Some(LeafId::new(0))
            },
        }
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            records: self.record_count,
            leaves: self.leaves.len(),
            internal_nodes: self.root.as_ref().map_or(0, count_internal),
            height: self.root.as_ref().map_or(0, NodeRef::height),
        }
    }

    /// Render the whole tree, one node per line, for debugging.
    ///
    /// Each line is indented with `==` per level and prefixed `==> `.
    /// Internal nodes list their separators and child count, leaves list
    /// their records.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            self.render_node(root, 0, &mut out);
        }
        out
    }

    fn render_node(&self, node: &NodeRef, level: usize, out: &mut String) {
        let indent = "==".repeat(level);
        match node {
            NodeRef::Internal(inner) => {
                let separators: Vec<String> =
                    inner.separators().iter().map(ToString::to_string).collect();
                // Writing to a String cannot fail
                let _ = writeln!(
                    out,
                    "{}==> {} pointers {}",
                    indent,
                    separators.join(" "),
                    inner.children().len()
                );
                for child in inner.children() {
                    self.render_node(child, level + 1, out);
                }
            }
            NodeRef::Leaf(id) => {
                let entries: Vec<String> = self
                    .leaf(*id)
                    .map(|leaf| leaf.entries().iter().map(ToString::to_string).collect())
                    .unwrap_or_default();
                let _ = writeln!(out, "{}==> {}", indent, entries.join(" "));
            }
        }
    }

    /// Verify the structural invariants of a built tree.
    ///
    /// Checks that the sibling chain visits the arena in order, that every
    /// leaf is non-empty and within capacity (only the last may be partial),
    /// that records are globally sorted, that every internal node has
    /// `separators.len() + 1` children (at most `NODECAP`) with
    /// `separators[i] == smallest_key(children[i + 1])`, and that all leaves
    /// sit at the same depth.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` describing the first defect found.
    pub fn check_invariants(&self) -> Result<()> {
        self.check_leaf_level()?;
        if let Some(root) = &self.root {
            let mut leaf_depth = None;
            let mut next_leaf = 0;
            self.check_node(root, 1, &mut leaf_depth, &mut next_leaf)?;
            if next_leaf != self.leaves.len() {
                return Err(violation(format!(
                    "root reaches {} of {} leaves",
                    next_leaf,
                    self.leaves.len()
                )));
            }
        } else if !self.leaves.is_empty() {
            return Err(violation("leaves present but tree has no root".to_string()));
        }
        Ok(())
    }

    fn check_leaf_level(&self) -> Result<()> {
        let capacity = self.config.leaf_capacity();
        let last = self.leaves.len().saturating_sub(1);
        let mut total = 0;
        let mut prev_key: Option<&Key> = None;

        for (i, leaf) in self.leaves.iter().enumerate() {
            let expected_next = (i < last).then(|| LeafId::new(i + 1));
            if leaf.next() != expected_next {
                return Err(violation(format!(
                    "leaf {} links to {:?}, expected {:?}",
                    i,
                    leaf.next(),
                    expected_next
                )));
            }
            if leaf.is_empty() || leaf.len() > capacity {
                return Err(violation(format!(
                    "leaf {} holds {} records, capacity {}",
                    i,
                    leaf.len(),
                    capacity
                )));
            }
            if i < last && leaf.len() != capacity {
                return Err(violation(format!(
                    "leaf {} is partially filled but is not the last leaf",
                    i
                )));
            }
            for record in leaf.entries() {
                if prev_key.is_some_and(|prev| prev > record.key()) {
                    return Err(violation(format!(
                        "record {} out of order in leaf {}",
                        record, i
                    )));
                }
                prev_key = Some(record.key());
            }
            total += leaf.len();
        }

        if total != self.record_count {
            return Err(violation(format!(
                "leaves hold {} records, expected {}",
                total, self.record_count
            )));
        }
        Ok(())
    }

    fn check_node(
        &self,
        node: &NodeRef,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        next_leaf: &mut usize,
    ) -> Result<()> {
        match node {
            NodeRef::Leaf(id) => {
                if *leaf_depth.get_or_insert(depth) != depth {
                    return Err(violation(format!("{} at uneven depth {}", id, depth)));
                }
                // Subtrees must cover the arena left to right
                if id.0 != *next_leaf {
                    return Err(violation(format!(
                        "{} reached where leaf {} was expected",
                        id, next_leaf
                    )));
                }
                *next_leaf += 1;
                Ok(())
            }
            NodeRef::Internal(inner) => {
                self.check_internal(inner)?;
                for child in inner.children() {
                    self.check_node(child, depth + 1, leaf_depth, next_leaf)?;
                }
                Ok(())
            }
        }
    }

    fn check_internal(&self, inner: &InternalNode) -> Result<()> {
        let children = inner.children();
        if children.len() != inner.separators().len() + 1 {
            return Err(violation(format!(
                "{} separators for {} children",
                inner.separators().len(),
                children.len()
            )));
        }
        if children.len() > self.config.fan_out() {
            return Err(violation(format!(
                "{} children exceed fan-out {}",
                children.len(),
                self.config.fan_out()
            )));
        }
        for (i, separator) in inner.separators().iter().enumerate() {
            if children[i + 1].smallest_key(&self.leaves) != Some(separator) {
                return Err(violation(format!(
                    "separator {} is not the smallest key of child {}",
                    separator,
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

fn count_internal(node: &NodeRef) -> usize {
    match node {
        NodeRef::Leaf(_) => 0,
        NodeRef::Internal(inner) => 1 + inner.children().iter().map(count_internal).sum::<usize>(),
    }
}

/// Iterator over leaves following the `next` links.
#[derive(Debug, Clone)]
pub struct LeafChain<'a> {
    leaves: &'a [LeafNode],
    next: Option<LeafId>,
}

impl<'a> Iterator for LeafChain<'a> {
    type Item = &'a LeafNode;

    fn next(&mut self) -> Option<Self::Item> {
        let leaf = self.leaves.get(self.next?.0)?;
        self.next = leaf.next();
        Some(leaf)
    }
}
