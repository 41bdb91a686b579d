//! bptindex - A static, bulk-loaded B+tree index with equality and wildcard lookups.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           bptindex                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              I/O glue (source/, report/, main)           │   │
//! │  │      record file → Vec<Record>     SearchResult → text   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Search (index/btree/search)                 │   │
//! │  │   routing descent → leaf scan → sibling-chain expansion  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Tree (index/btree/tree, builder)            │   │
//! │  │   root ─▶ internal levels ─▶ leaf arena [L0]→[L1]→...    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Keys (index/btree/key, record)              │   │
//! │  │   Field · Key · QueryKey · compare_field / compare_key   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (config, Error, LeafId, Locator)
//! - [`index`] - The B+tree: build and search
//! - [`source`] - Tab-separated record and query files
//! - [`report`] - Console rendering of search results
//!
//! # Quick Start
//! ```
//! use bptindex::{BPlusTree, IndexConfig, Key, QueryKey, Record};
//!
//! // Records must arrive sorted by key
//! let records = vec![
//!     Record::new(Key::from(("Adali", "s1", "90", "1")), "p1"),
//!     Record::new(Key::from(("Adali", "s2", "75", "4")), "p1"),
//!     Record::new(Key::from(("Fang", "s1", "70", "3")), "p2"),
//! ];
//! let tree = BPlusTree::build(records, IndexConfig::new(3)).unwrap();
//!
//! let result = tree.search(&QueryKey::from(("Adali", "*", "*", "*"))).unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.distinct_locator_count(), 1);
//! ```

pub mod common;
pub mod index;
pub mod report;
pub mod source;

// Re-export commonly used items at crate root for convenience
pub use common::config::{IndexConfig, DEFAULT_NODE_CAPACITY, KEY_ARITY, WILDCARD};
pub use common::{Error, LeafId, Locator, Result};

pub use index::btree::{
    compare_field, compare_key, BPlusTree, Field, FieldOrdering, Key, QueryField, QueryKey,
    Record, SearchResult, TreeBuilder, TreeStats,
};
pub use report::SearchReport;
