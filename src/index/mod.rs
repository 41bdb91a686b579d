//! Index structures.
//!
//! - [`btree`] - Static, bulk-loaded B+tree with equality and wildcard search

pub mod btree;
