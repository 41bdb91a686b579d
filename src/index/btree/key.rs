//! Keys, query keys and the wildcard-aware comparison used by routing and
//! leaf scanning.

use std::cmp::Ordering;
use std::fmt;

use crate::common::config::{KEY_ARITY, WILDCARD};

// ============================================================================
// FIELDS
// ============================================================================

/// One component of a composite key.
///
/// Ordering is derived: every `Int` sorts before every `Text`, and values
/// of the same variant compare naturally. Stored keys never hold the
/// wildcard; it exists only as [`QueryField::Wildcard`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Int(i64),
    Text(String),
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Int(v)
    }
}

impl From<i32> for Field {
    fn from(v: i32) -> Self {
        Field::Int(i64::from(v))
    }
}

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::Text(v.to_string())
    }
}

impl From<String> for Field {
    fn from(v: String) -> Self {
        Field::Text(v)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(v) => write!(f, "{}", v),
            Field::Text(v) => f.write_str(v),
        }
    }
}

/// One component of a query key: a concrete value or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryField {
    /// Matches any stored value in this position.
    Wildcard,
    Exact(Field),
}

impl QueryField {
    /// Parse query text. `*` is the wildcard, anything else is a text field.
    pub fn parse(text: &str) -> Self {
        if text == WILDCARD {
            QueryField::Wildcard
        } else {
            QueryField::Exact(Field::Text(text.to_string()))
        }
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, QueryField::Wildcard)
    }
}

impl From<Field> for QueryField {
    fn from(f: Field) -> Self {
        QueryField::Exact(f)
    }
}

impl From<&str> for QueryField {
    fn from(v: &str) -> Self {
        QueryField::parse(v)
    }
}

impl From<i64> for QueryField {
    fn from(v: i64) -> Self {
        QueryField::Exact(Field::Int(v))
    }
}

impl From<i32> for QueryField {
    fn from(v: i32) -> Self {
        QueryField::Exact(Field::from(v))
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryField::Wildcard => f.write_str(WILDCARD),
            QueryField::Exact(field) => write!(f, "{}", field),
        }
    }
}

// ============================================================================
// KEYS
// ============================================================================

/// Composite key of a stored record, ordered lexicographically.
///
/// # Example
/// ```
/// use bptindex::Key;
///
/// let a = Key::from(("Adali", "s1", 90, 1));
/// let b = Key::from(("Adali", "s2", 10, 1));
/// assert!(a < b);
/// assert_eq!(a.to_string(), "(Adali,s1,90,1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key([Field; KEY_ARITY]);

impl Key {
    pub fn new(fields: [Field; KEY_ARITY]) -> Self {
        Key(fields)
    }

    #[inline]
    pub fn fields(&self) -> &[Field; KEY_ARITY] {
        &self.0
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for Key
where
    A: Into<Field>,
    B: Into<Field>,
    C: Into<Field>,
    D: Into<Field>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        Key([a.into(), b.into(), c.into(), d.into()])
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.0;
        write!(f, "({},{},{},{})", a, b, c, d)
    }
}

/// Key supplied to a search. Any position may be the wildcard.
///
/// # Example
/// ```
/// use bptindex::{Key, QueryKey};
///
/// let query = QueryKey::from(("*", "s1", "*", "*"));
/// assert!(query.has_wildcard());
/// assert!(query.matches(&Key::from(("Fang", "s1", "70", "3"))));
/// assert!(!query.matches(&Key::from(("Fang", "s2", "70", "3"))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey([QueryField; KEY_ARITY]);

impl QueryKey {
    pub fn new(fields: [QueryField; KEY_ARITY]) -> Self {
        QueryKey(fields)
    }

    /// Query that matches exactly one key value.
    pub fn exact(key: &Key) -> Self {
        QueryKey(key.fields().clone().map(QueryField::Exact))
    }

    #[inline]
    pub fn fields(&self) -> &[QueryField; KEY_ARITY] {
        &self.0
    }

    /// True if at least one position is the wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(QueryField::is_wildcard)
    }

    /// True if every concrete position equals the stored field.
    pub fn matches(&self, key: &Key) -> bool {
        self.0
            .iter()
            .zip(key.fields())
            .all(|(q, stored)| match q {
                QueryField::Wildcard => true,
                QueryField::Exact(f) => f == stored,
            })
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for QueryKey
where
    A: Into<QueryField>,
    B: Into<QueryField>,
    C: Into<QueryField>,
    D: Into<QueryField>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        QueryKey([a.into(), b.into(), c.into(), d.into()])
    }
}

impl From<&Key> for QueryKey {
    fn from(key: &Key) -> Self {
        QueryKey::exact(key)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.0;
        write!(f, "({},{},{},{})", a, b, c, d)
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

/// Outcome of comparing a query field (or key) against a stored one.
///
/// `Less`, `Equal` and `Greater` give the ordering of the *query* relative
/// to the stored value. `Wildcard` means a wildcard position was reached
/// before any concrete difference, so no ordering can be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrdering {
    Less,
    Equal,
    Greater,
    Wildcard,
}

impl From<Ordering> for FieldOrdering {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => FieldOrdering::Less,
            Ordering::Equal => FieldOrdering::Equal,
            Ordering::Greater => FieldOrdering::Greater,
        }
    }
}

/// Compare one query field against one stored field.
#[inline]
pub fn compare_field(query: &QueryField, stored: &Field) -> FieldOrdering {
    match query {
        QueryField::Wildcard => FieldOrdering::Wildcard,
        QueryField::Exact(f) => f.cmp(stored).into(),
    }
}

/// Compare a query key against a stored key, left to right.
///
/// Returns the first result that is not `Equal`, or `Equal` when all four
/// positions are equal.
///
/// # Example
/// ```
/// use bptindex::{compare_key, FieldOrdering, Key, QueryKey};
///
/// let stored = Key::from(("B", 1, 0, 0));
/// assert_eq!(compare_key(&QueryKey::from(("A", 9, 9, 9)), &stored), FieldOrdering::Less);
/// assert_eq!(compare_key(&QueryKey::from(("B", "*", 9, 9)), &stored), FieldOrdering::Wildcard);
/// assert_eq!(compare_key(&QueryKey::from(("B", 1, 0, 0)), &stored), FieldOrdering::Equal);
/// ```
pub fn compare_key(query: &QueryKey, stored: &Key) -> FieldOrdering {
    query
        .fields()
        .iter()
        .zip(stored.fields())
        .map(|(q, s)| compare_field(q, s))
        .find(|ord| *ord != FieldOrdering::Equal)
        .unwrap_or(FieldOrdering::Equal)
}
