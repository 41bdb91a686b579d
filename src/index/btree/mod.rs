//! Static B+tree index.
//!
//! # Components
//! - [`key`] - Fields, keys, query keys and the wildcard-aware comparison
//! - [`Record`] - A key plus the locator of the full tuple
//! - [`LeafNode`] / [`InternalNode`] / [`NodeRef`] - Node representation
//! - [`TreeBuilder`] - Bottom-up bulk loading
//! - [`BPlusTree`] - The built, immutable tree
//! - [`SearchResult`] - Matches and visit counters of one search
//! - [`TreeStats`] - Shape summary

mod builder;
pub mod key;
mod node;
mod record;
mod search;
mod stats;
mod tree;

pub use builder::TreeBuilder;
pub use key::{compare_field, compare_key, Field, FieldOrdering, Key, QueryField, QueryKey};
pub use node::{InternalNode, LeafNode, NodeRef};
pub use record::Record;
pub use search::SearchResult;
pub use stats::TreeStats;
pub use tree::{BPlusTree, LeafChain};
