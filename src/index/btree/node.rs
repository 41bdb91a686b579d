//! Leaf and internal node representation.
//!
//! Leaves live in an arena owned by the tree and are addressed by
//! [`LeafId`]; the sibling chain is a chain of arena indices. Internal nodes
//! own their children exclusively, so the structure has no shared ownership
//! and no cycles.

use crate::common::LeafId;
use crate::index::btree::key::Key;
use crate::index::btree::record::Record;

/// A leaf: sorted records plus a forward link to the next leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    entries: Vec<Record>,
    next: Option<LeafId>,
}

impl LeafNode {
    /// Create an unlinked leaf. `entries` must be non-empty and sorted.
    pub(crate) fn new(entries: Vec<Record>) -> Self {
        debug_assert!(!entries.is_empty(), "leaves are never empty");
        Self {
            entries,
            next: None,
        }
    }

    /// Assigned exactly once while the builder links the level.
    pub(crate) fn set_next(&mut self, next: LeafId) {
        debug_assert!(self.next.is_none(), "sibling link assigned twice");
        self.next = Some(next);
    }

    #[inline]
    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    #[inline]
    pub fn next(&self) -> Option<LeafId> {
        self.next
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the first entry.
    pub fn first_key(&self) -> Option<&Key> {
        self.entries.first().map(Record::key)
    }

    /// Key of the last entry.
    pub fn last_key(&self) -> Option<&Key> {
        self.entries.last().map(Record::key)
    }
}

/// An internal node: `k` separators routing into `k + 1` children.
///
/// `children[i]` holds keys `z` with `separators[i - 1] <= z < separators[i]`
/// (unbounded at either end), and `separators[i]` is the smallest key under
/// `children[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNode {
    separators: Vec<Key>,
    children: Vec<NodeRef>,
}

impl InternalNode {
    pub(crate) fn new(separators: Vec<Key>, children: Vec<NodeRef>) -> Self {
        debug_assert_eq!(separators.len() + 1, children.len());
        Self {
            separators,
            children,
        }
    }

    #[inline]
    pub fn separators(&self) -> &[Key] {
        &self.separators
    }

    #[inline]
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }
}

/// Reference to a node of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Leaf(LeafId),
    Internal(Box<InternalNode>),
}

impl NodeRef {
    /// Smallest key in the subtree: the first key of its leftmost leaf.
    ///
    /// `leaves` is the arena the subtree's leaf ids point into. Returns
    /// `None` only for an id outside the arena.
    pub fn smallest_key<'a>(&'a self, leaves: &'a [LeafNode]) -> Option<&'a Key> {
        let mut node = self;
        loop {
            match node {
                NodeRef::Leaf(id) => return leaves.get(id.0).and_then(LeafNode::first_key),
                NodeRef::Internal(inner) => node = inner.children.first()?,
            }
        }
    }

    /// Number of levels below and including this node.
    pub fn height(&self) -> usize {
        match self {
            NodeRef::Leaf(_) => 1,
            NodeRef::Internal(inner) => 1 + inner.children.first().map_or(0, NodeRef::height),
        }
    }
}
