//! Record and query files.
//!
//! Both formats are tab-separated text, one entry per line:
//! ```text
//! records:  name \t showid \t finalscore \t place \t pageid
//! queries:  name \t showid \t finalscore \t place      (any field may be *)
//! ```
//!
//! Fields are trimmed and kept as text, so they compare as strings. Blank
//! lines are skipped. Records are returned in file order; the file must
//! already be sorted by key for the tree built from it to be searchable.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::common::config::{KEY_ARITY, WILDCARD};
use crate::common::{Error, Result};
use crate::index::btree::{Field, Key, QueryField, QueryKey, Record};

/// Number of columns in a record line: the key plus the locator.
pub const RECORD_COLUMNS: usize = KEY_ARITY + 1;

/// Load every record from a tab-separated file.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be read, or `Error::Parse` for
/// the first line with fewer than five fields or a `*` key column.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let records = read_lines(path.as_ref(), parse_record_line)?;
    debug!(path = %path.as_ref().display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Load every query from a tab-separated file.
///
/// # Errors
/// Returns `Error::Io` if the file cannot be read, or `Error::Parse` for
/// the first line with fewer than four fields.
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<QueryKey>> {
    let queries = read_lines(path.as_ref(), parse_query_line)?;
    debug!(path = %path.as_ref().display(), queries = queries.len(), "loaded queries");
    Ok(queries)
}

/// Parse one record line. Extra columns are ignored.
///
/// # Errors
/// Returns `Error::Parse` (tagged with `line`) if fewer than five fields
/// are present, or if a key column holds the wildcard marker.
pub fn parse_record_line(line: usize, text: &str) -> Result<Record> {
    let fields = split_fields(text);
    if fields.len() < RECORD_COLUMNS {
        return Err(Error::Parse {
            line,
            reason: format!(
                "expected {} tab-separated fields, found {}",
                RECORD_COLUMNS,
                fields.len()
            ),
        });
    }
    if fields[..KEY_ARITY].contains(&WILDCARD) {
        return Err(Error::Parse {
            line,
            reason: "wildcard not allowed in a stored key".to_string(),
        });
    }
    let key = Key::new([
        Field::from(fields[0]),
        Field::from(fields[1]),
        Field::from(fields[2]),
        Field::from(fields[3]),
    ]);
    Ok(Record::new(key, fields[KEY_ARITY]))
}

/// Parse one query line. `*` marks a wildcard field.
///
/// # Errors
/// Returns `Error::Parse` (tagged with `line`) if fewer than four fields
/// are present.
pub fn parse_query_line(line: usize, text: &str) -> Result<QueryKey> {
    let fields = split_fields(text);
    if fields.len() < KEY_ARITY {
        return Err(Error::Parse {
            line,
            reason: format!(
                "expected {} tab-separated fields, found {}",
                KEY_ARITY,
                fields.len()
            ),
        });
    }
    Ok(QueryKey::new([
        QueryField::parse(fields[0]),
        QueryField::parse(fields[1]),
        QueryField::parse(fields[2]),
        QueryField::parse(fields[3]),
    ]))
}

fn split_fields(text: &str) -> Vec<&str> {
    text.trim_end_matches(['\r', '\n'])
        .split('\t')
        .map(str::trim)
        .collect()
}

fn read_lines<T>(path: &Path, parse: impl Fn(usize, &str) -> Result<T>) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(parse(idx + 1, &line)?);
    }

    Ok(out)
}
