//! Configuration constants and index configuration for bptindex.

use crate::common::{Error, Result};

/// Number of fields in every composite key.
pub const KEY_ARITY: usize = 4;

/// Query-field text that matches any stored value.
pub const WILDCARD: &str = "*";

/// Smallest usable node capacity.
///
/// With `NODECAP = 2` a leaf holds one record and an internal node two
/// children. Anything smaller cannot make progress while grouping levels.
pub const MIN_NODE_CAPACITY: usize = 2;

/// Default node capacity (`NODECAP`).
///
/// # Layout
/// - Leaf nodes hold up to `NODECAP - 1` records (59)
/// - Internal nodes hold up to `NODECAP` children (60) and `NODECAP - 1`
///   separator keys
///
/// A few thousand records therefore fit in a tree of height 2.
pub const DEFAULT_NODE_CAPACITY: usize = 60;

/// Build-time configuration of a [`BPlusTree`](crate::index::btree::BPlusTree).
///
/// # Example
/// ```
/// use bptindex::IndexConfig;
///
/// let config = IndexConfig::new(3);
/// assert_eq!(config.leaf_capacity(), 2);
/// assert_eq!(config.fan_out(), 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Maximum fan-out of internal nodes (`NODECAP`).
    pub node_capacity: usize,
}

impl IndexConfig {
    /// Create a configuration with the given node capacity.
    ///
    /// The capacity is not checked here; see [`IndexConfig::validate`].
    pub fn new(node_capacity: usize) -> Self {
        Self { node_capacity }
    }

    /// Maximum number of records per leaf (`NODECAP - 1`).
    #[inline]
    pub fn leaf_capacity(&self) -> usize {
        self.node_capacity.saturating_sub(1)
    }

    /// Maximum number of children per internal node (`NODECAP`).
    #[inline]
    pub fn fan_out(&self) -> usize {
        self.node_capacity
    }

    /// Check that the capacity can build a tree.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` if `node_capacity < MIN_NODE_CAPACITY`.
    pub fn validate(&self) -> Result<()> {
        if self.node_capacity < MIN_NODE_CAPACITY {
            return Err(Error::InvalidCapacity {
                capacity: self.node_capacity,
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let config = IndexConfig::default();
        assert_eq!(config.node_capacity, 60);
        assert_eq!(config.leaf_capacity(), 59);
        assert_eq!(config.fan_out(), 60);
    }

    #[test]
    fn test_validate_rejects_small_capacity() {
        for capacity in [0, 1] {
            match IndexConfig::new(capacity).validate() {
                Err(Error::InvalidCapacity { capacity: c }) => assert_eq!(c, capacity),
                other => panic!("Expected InvalidCapacity, got {:?}", other),
            }
        }
        assert!(IndexConfig::new(MIN_NODE_CAPACITY).validate().is_ok());
    }

    #[test]
    fn test_leaf_capacity_never_underflows() {
        assert_eq!(IndexConfig::new(0).leaf_capacity(), 0);
    }
}
