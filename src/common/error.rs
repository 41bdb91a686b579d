//! Error types for bptindex.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in bptindex.
///
/// A search that finds nothing is not an error; it returns an empty
/// [`SearchResult`](crate::index::btree::SearchResult).
#[derive(Debug, Error)]
pub enum Error {
    /// Node capacity below the minimum of 2.
    ///
    /// Raised before any record is consumed; the build is aborted.
    #[error("Invalid node capacity {capacity}: must be at least 2")]
    InvalidCapacity { capacity: usize },

    /// Search attempted against a tree built from zero records.
    ///
    /// Callers should check `BPlusTree::is_empty()` before searching.
    #[error("Search attempted on an empty tree")]
    EmptyTree,

    /// I/O error while reading a record or query file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a record or query file (1-based line number).
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A structural check on a built tree failed.
    ///
    /// This indicates a bug, or input that was not sorted by key.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCapacity { capacity: 1 };
        assert_eq!(format!("{}", err), "Invalid node capacity 1: must be at least 2");

        let err = Error::EmptyTree;
        assert_eq!(format!("{}", err), "Search attempted on an empty tree");

        let err = Error::Parse {
            line: 7,
            reason: "expected 5 fields".to_string(),
        };
        assert_eq!(format!("{}", err), "Parse error on line 7: expected 5 fields");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.source().is_some());
        assert!(Error::EmptyTree.source().is_none());
    }
}
