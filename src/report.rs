//! Console rendering of search results.
//!
//! One block per query. The header names only the searched key; there is
//! a single index, so no index name is printed.
//!
//! ```text
//! Searching for equality (Fang,*,*,*)
//!    visited 2 leaf nodes
//! Total nodes visited: 4
//! 2 Records found.
//! (Fang,s1,70,3) pageid:p4
//! (Fang,s9,81,1) pageid:p4
//! Total disk pages: 1
//! ```

use std::fmt;

use crate::index::btree::{QueryKey, SearchResult};

/// Display adapter pairing a query with its result.
pub struct SearchReport<'q, 'a> {
    query: &'q QueryKey,
    result: &'q SearchResult<'a>,
}

impl<'q, 'a> SearchReport<'q, 'a> {
    pub fn new(query: &'q QueryKey, result: &'q SearchResult<'a>) -> Self {
        Self { query, result }
    }
}

impl fmt::Display for SearchReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Searching for equality {}", self.query)?;
        writeln!(f, "   visited {} leaf nodes", self.result.leaves_visited)?;
        writeln!(f, "Total nodes visited: {}", self.result.total_nodes_visited())?;
        if self.result.is_empty() {
            writeln!(f, "Record not found.")?;
        } else {
            writeln!(f, "{} Records found.", self.result.len())?;
            for record in &self.result.matches {
                writeln!(f, "{} pageid:{}", record.key(), record.locator())?;
            }
        }
        writeln!(f, "Total disk pages: {}", self.result.distinct_locator_count())
    }
}
