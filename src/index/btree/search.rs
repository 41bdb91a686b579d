//! Search: one routing descent to a leaf, then a leaf-level scan.
//!
//! Routing never fans out. Wildcard queries land on the leftmost leaf that
//! can hold a match and expand along the sibling chain until the stop
//! predicate shows that no later leaf can match.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, trace};

use crate::common::{Error, LeafId, Locator, Result};
use crate::index::btree::key::{compare_key, FieldOrdering, QueryKey};
use crate::index::btree::node::{InternalNode, LeafNode, NodeRef};
use crate::index::btree::record::Record;
use crate::index::btree::BPlusTree;

/// Outcome of one search.
///
/// Borrows the matched records from the tree. All counters belong to this
/// call only; repeating a search yields an identical result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    /// Matching records in key order.
    pub matches: Vec<&'a Record>,

    /// Internal nodes passed through during the descent.
    pub internal_nodes_visited: usize,

    /// Leaves whose entries were scanned.
    pub leaves_visited: usize,

    /// Leaf the descent ended on.
    pub landed_leaf: LeafId,

    /// Leaf whose first record made a wildcard scan stop, if one did.
    pub stopped_at: Option<LeafId>,
}

impl<'a> SearchResult<'a> {
    fn new(landed_leaf: LeafId, internal_nodes_visited: usize) -> Self {
        Self {
            matches: Vec::new(),
            internal_nodes_visited,
            leaves_visited: 0,
            landed_leaf,
            stopped_at: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True when nothing matched. This is a normal outcome, not an error.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Internal nodes plus leaves visited.
    #[inline]
    pub fn total_nodes_visited(&self) -> usize {
        self.internal_nodes_visited + self.leaves_visited
    }

    /// The distinct locators among the matches.
    pub fn distinct_locators(&self) -> BTreeSet<&'a Locator> {
        self.matches.iter().map(|r| r.locator()).collect()
    }

    /// Number of distinct locators among the matches.
    pub fn distinct_locator_count(&self) -> usize {
        self.distinct_locators().len()
    }
}

impl fmt::Display for SearchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Search {{ matches: {}, locators: {}, internal: {}, leaves: {} }}",
            self.len(),
            self.distinct_locator_count(),
            self.internal_nodes_visited,
            self.leaves_visited
        )
    }
}

impl BPlusTree {
    /// Find every record matching `query`.
    ///
    /// Concrete query fields must be equal; wildcard fields match anything.
    ///
    /// # Errors
    /// Returns `Error::EmptyTree` if the tree has no root. Check
    /// [`BPlusTree::is_empty`] first to avoid it.
    pub fn search(&self, query: &QueryKey) -> Result<SearchResult<'_>> {
        let root = self.root.as_ref().ok_or(Error::EmptyTree)?;

        let (landed, internal_visited) = descend(root, query);
        let mut result = SearchResult::new(landed, internal_visited);

        if query.has_wildcard() {
            self.scan_wildcard(query, &mut result);
        } else {
            self.scan_exact(query, &mut result);
        }

        debug!(
            query = %query,
            matches = result.len(),
            internal = result.internal_nodes_visited,
            leaves = result.leaves_visited,
            "search complete"
        );
        Ok(result)
    }

    /// Scan the landed leaf, then extend over neighbours that continue a
    /// run of keys equal to the query.
    fn scan_exact<'a>(&'a self, query: &QueryKey, result: &mut SearchResult<'a>) {
        let landed = result.landed_leaf;
        collect_matches(&self.leaves[landed.0], query, &mut result.matches);
        result.leaves_visited = 1;

        // Duplicates ending in earlier leaves; arena order is sibling order
        let mut cur = landed;
        while let Some(prev) = cur.prev() {
            let leaf = &self.leaves[prev.0];
            if !ends_with(leaf, query) {
                break;
            }
            trace!(leaf = prev.0, "equal run continues backwards");
            let mut earlier = Vec::new();
            collect_matches(leaf, query, &mut earlier);
            earlier.append(&mut result.matches);
            result.matches = earlier;
            result.leaves_visited += 1;
            cur = prev;
        }

        let mut next = self.leaves[landed.0].next();
        while let Some(id) = next {
            let leaf = &self.leaves[id.0];
            if !starts_with(leaf, query) {
                break;
            }
            trace!(leaf = id.0, "equal run continues forwards");
            collect_matches(leaf, query, &mut result.matches);
            result.leaves_visited += 1;
            next = leaf.next();
        }
    }

    /// Scan the landed leaf, then follow siblings until the stop predicate
    /// fires or the chain ends.
    fn scan_wildcard<'a>(&'a self, query: &QueryKey, result: &mut SearchResult<'a>) {
        let landed = &self.leaves[result.landed_leaf.0];
        collect_matches(landed, query, &mut result.matches);
        result.leaves_visited = 1;

        let mut next = landed.next();
        while let Some(id) = next {
            let leaf = &self.leaves[id.0];
            if starts_after(leaf, query) {
                trace!(leaf = id.0, "wildcard scan stopped");
                result.stopped_at = Some(id);
                break;
            }
            collect_matches(leaf, query, &mut result.matches);
            result.leaves_visited += 1;
            next = leaf.next();
        }
    }
}

/// Walk from `root` to a leaf. Returns the leaf and the number of internal
/// nodes passed through.
fn descend(root: &NodeRef, query: &QueryKey) -> (LeafId, usize) {
    let mut node = root;
    let mut visited = 0;
    loop {
        match node {
            NodeRef::Leaf(id) => return (*id, visited),
            NodeRef::Internal(inner) => {
                visited += 1;
                let child = route(inner, query);
                trace!(child, separators = inner.separators().len(), "visited internal");
                node = &inner.children()[child];
            }
        }
    }
}

/// Pick the child of `node` to descend into.
///
/// Separators are scanned left to right. The first one that sorts after
/// the query, or where a wildcard is reached before any difference, routes
/// to the child on its left. A separator equal to the query routes to the
/// child that begins with it. If none decides, the last child is taken.
pub(crate) fn route(node: &InternalNode, query: &QueryKey) -> usize {
    for (i, separator) in node.separators().iter().enumerate() {
        match compare_key(query, separator) {
            FieldOrdering::Less | FieldOrdering::Wildcard => return i,
            FieldOrdering::Equal => return i + 1,
            FieldOrdering::Greater => {}
        }
    }
    node.separators().len()
}

fn collect_matches<'a>(leaf: &'a LeafNode, query: &QueryKey, out: &mut Vec<&'a Record>) {
    out.extend(leaf.entries().iter().filter(|r| query.matches(r.key())));
}

/// Stop predicate: the leaf's first record already sorts after the query
/// at a concrete position reached before any wildcard. Records are sorted,
/// so no later leaf can match either.
fn starts_after(leaf: &LeafNode, query: &QueryKey) -> bool {
    leaf.first_key()
        .is_some_and(|k| compare_key(query, k) == FieldOrdering::Less)
}

fn starts_with(leaf: &LeafNode, query: &QueryKey) -> bool {
    leaf.first_key()
        .is_some_and(|k| compare_key(query, k) == FieldOrdering::Equal)
}

fn ends_with(leaf: &LeafNode, query: &QueryKey) -> bool {
    leaf.last_key()
        .is_some_and(|k| compare_key(query, k) == FieldOrdering::Equal)
}
