//! Indexed record: a composite key plus the locator of the full tuple.

use std::fmt;

use crate::common::Locator;
use crate::index::btree::key::Key;

/// An immutable `(key, locator)` entry stored in a leaf.
///
/// # Example
/// ```
/// use bptindex::{Key, Record};
///
/// let rec = Record::new(Key::from(("Adali", "s1", "90", "1")), "p3");
/// assert_eq!(rec.to_string(), "(Adali,s1,90,1):p3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    key: Key,
    locator: Locator,
}

impl Record {
    pub fn new(key: Key, locator: impl Into<Locator>) -> Self {
        Self {
            key,
            locator: locator.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.locator)
    }
}
