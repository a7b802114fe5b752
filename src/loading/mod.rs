//! Loaders for MovieLens-formatted rating data.
//!
//! Three file formats feed the recommender core:
//!
//! - **item catalog** (`u.item` style): pipe-separated lines whose first
//!   two fields are the item id and display name; any further fields are
//!   ignored, as are blank lines.
//! - **training ratings** (`u.data` / `u1.base` style): tab-separated
//!   `user <TAB> item <TAB> rating <TAB> timestamp` lines. The timestamp
//!   is ignored.
//! - **test ratings** (`u1.test` style): same tab-separated format,
//!   loaded flat as one observation per (user, item) pair.
//!
//! Malformed lines fail the load with the file path and 1-based line
//! number, rather than being silently skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{ItemCatalog, RatingTable, TestSet};
use crate::error::{Result, SugerirError};

fn parse_error(path: &Path, line: usize, message: &str) -> SugerirError {
    SugerirError::Parse {
        path: path.display().to_string(),
        line,
        message: message.to_string(),
    }
}

/// One parsed tab-separated rating line: (user, item, rating).
fn parse_rating_line<'a>(path: &Path, number: usize, line: &'a str) -> Result<(&'a str, &'a str, f64)> {
    let mut fields = line.split('\t');
    let user_id = fields
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| parse_error(path, number, "missing user id"))?;
    let item_id = fields
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| parse_error(path, number, "missing item id"))?;
    let rating_field = fields
        .next()
        .ok_or_else(|| parse_error(path, number, "missing rating field"))?;
    let rating: f64 = rating_field
        .trim()
        .parse()
        .map_err(|_| parse_error(path, number, &format!("invalid rating `{rating_field}`")))?;
    Ok((user_id, item_id, rating))
}

/// Loads an item catalog from a pipe-separated file.
///
/// # Errors
///
/// Returns [`SugerirError::Io`] if the file cannot be read and
/// [`SugerirError::Parse`] for a non-blank line without an `id|name`
/// prefix.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<ItemCatalog> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut catalog = ItemCatalog::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, '|');
        let item_id = fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| parse_error(path, idx + 1, "missing item id"))?;
        let name = fields
            .next()
            .ok_or_else(|| parse_error(path, idx + 1, "expected `id|name`"))?;
        catalog.insert(item_id, name);
    }
    Ok(catalog)
}

/// Loads a training table from a tab-separated ratings file.
///
/// # Errors
///
/// Returns [`SugerirError::Io`] if the file cannot be read and
/// [`SugerirError::Parse`] for a malformed line.
pub fn load_training<P: AsRef<Path>>(path: P) -> Result<RatingTable> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut table = RatingTable::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (user_id, item_id, rating) = parse_rating_line(path, idx + 1, &line)?;
        table.insert(user_id, item_id, rating);
    }
    Ok(table)
}

/// Loads a held-out test set from a tab-separated ratings file.
///
/// # Errors
///
/// Returns [`SugerirError::Io`] if the file cannot be read and
/// [`SugerirError::Parse`] for a malformed line.
pub fn load_test<P: AsRef<Path>>(path: P) -> Result<TestSet> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut test = TestSet::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (user_id, item_id, rating) = parse_rating_line(path, idx + 1, &line)?;
        test.insert(user_id, item_id, rating);
    }
    Ok(test)
}
