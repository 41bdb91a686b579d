//! Record locator type.

use std::fmt;

/// Identifies where a record's full data lives.
///
/// The index never interprets a locator; it is stored with the key and
/// returned unchanged by search. In the scores data set it is the page id
/// column of the input file.
///
/// # Example
/// ```
/// use bptindex::Locator;
///
/// let loc = Locator::new("p17");
/// assert_eq!(loc.as_str(), "p17");
/// assert_eq!(loc.to_string(), "p17");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locator(String);

impl Locator {
    /// Create a new Locator.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Locator(id.into())
    }

    /// Borrow the locator text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locator {
    fn from(id: &str) -> Self {
        Locator::new(id)
    }
}

impl From<String> for Locator {
    fn from(id: String) -> Self {
        Locator(id)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
