//! Common types and utilities shared across bptindex.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`IndexConfig`](config::IndexConfig)
//! - Error types
//! - Identifiers (LeafId, Locator)

pub mod config;
pub mod error;
mod leaf_id;
mod locator;

pub use error::{Error, Result};
pub use leaf_id::LeafId;
pub use locator::Locator;
