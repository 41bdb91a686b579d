//! Leaf identifier type.

use std::fmt;

/// Identifies a leaf in the tree's leaf arena.
///
/// Using `usize` because:
/// 1. Leaves are stored in `Vec<LeafNode>`
/// 2. Direct indexing without casting: `leaves[leaf_id.0]`
/// 3. Leaves are allocated in sibling order, so `LeafId(i + 1)` follows `LeafId(i)`
///
/// # Example
/// ```
/// use bptindex::LeafId;
///
/// let leaf_id = LeafId::new(5);
/// assert_eq!(leaf_id.prev(), Some(LeafId::new(4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub usize);

impl LeafId {
    /// Create a new LeafId.
    #[inline]
    pub fn new(id: usize) -> Self {
        LeafId(id)
    }

    /// The arena slot directly before this one, if any.
    #[inline]
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(LeafId)
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Leaf({})", self.0)
    }
}
