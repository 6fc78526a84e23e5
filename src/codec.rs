//! The path codec converts between a nested JSON document and a flat mapping
//! of delimiter-joined key paths to scalar values.
//!
//! [`flatten`] and [`unflatten`] are inverses for any document whose object
//! keys do not contain the delimiter: `unflatten(flatten(doc)) == doc`, and
//! `flatten(unflatten(entries)) == entries` (order-independent) for any entry
//! list where no path is a strict prefix of another.
//!
//! Arrays are flattened through their stringified indices ("0", "1", ...),
//! so a document containing arrays unflattens back to index-keyed objects.

use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use crate::{KvsExtraError, Result};

/// the path delimiter used by the kv export/import operations
pub const DELIMITER: char = '/';

/// A single leaf value stored under a key path.
/// Values are kept as a tagged union rather than raw JSON so that the codec's
/// conflict and equality checks are exhaustive; an object or array is never a
/// `Scalar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// the JSON `null` value
    Null,
    /// a JSON boolean
    Bool(bool),
    /// a JSON number, integer or float
    Number(Number),
    /// a JSON string
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Value {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::String(s) => Value::String(s),
        }
    }
}

/// A single `(path, value)` pair produced by [`flatten`] and consumed by
/// [`unflatten`]. The path is a sequence of non-empty segments joined by the
/// delimiter.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    /// the delimiter-joined key path
    pub path: String,
    /// the leaf value stored at `path`
    pub value: Scalar,
}

impl FlatEntry {
    /// creates a flat entry from a path and value
    pub fn new<P: Into<String>>(path: P, value: Scalar) -> Self {
        FlatEntry { path: path.into(), value }
    }
}

/// Flattens a nested JSON document into a list of [`FlatEntry`]s, one per
/// leaf, in the document's own (insertion) order.
///
/// The emitted path of each leaf is the join of all ancestor keys with
/// `delimiter`; array elements contribute their index as a segment.
///
/// # Errors
/// - [`KvsExtraError::KeyContainsDelimiter`] if any object key contains
///   `delimiter` (such a path could not be unflattened losslessly)
/// - [`KvsExtraError::InvalidPath`] if `doc` is itself a scalar, which has no
///   path to store it under
pub fn flatten(doc: &Value, delimiter: char) -> Result<Vec<FlatEntry>> {
    if !doc.is_object() && !doc.is_array() {
        return Err(KvsExtraError::InvalidPath { path: String::new() });
    }
    let mut entries = Vec::new();
    flatten_value(doc, delimiter, String::new(), &mut entries)?;
    Ok(entries)
}

/// depth-first walk of `value`, appending a [`FlatEntry`] for every leaf
fn flatten_value(
    value: &Value,
    delimiter: char,
    path: String,
    entries: &mut Vec<FlatEntry>,
) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key.contains(delimiter) {
                    return Err(KvsExtraError::KeyContainsDelimiter {
                        key: key.clone(),
                        delimiter,
                    });
                }
                flatten_value(child, delimiter, join(&path, key, delimiter), entries)?;
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let segment = idx.to_string();
                flatten_value(child, delimiter, join(&path, &segment, delimiter), entries)?;
            }
        }
        Value::Null => entries.push(FlatEntry::new(path, Scalar::Null)),
        Value::Bool(b) => entries.push(FlatEntry::new(path, Scalar::Bool(*b))),
        Value::Number(n) => entries.push(FlatEntry::new(path, Scalar::Number(n.clone()))),
        Value::String(s) => entries.push(FlatEntry::new(path, Scalar::String(s.clone()))),
    }
    Ok(())
}

/// joins a parent path and a child segment with the delimiter
fn join(path: &str, segment: &str, delimiter: char) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", path, delimiter, segment)
    }
}

/// Rebuilds a nested JSON document from a list of [`FlatEntry`]s by splitting
/// each path on `delimiter` and merging the resulting branches into one tree.
///
/// Unflattening is a structural merge, not an overwrite: entries that
/// disagree on the shape of the tree fail instead of clobbering each other.
///
/// # Errors
/// - [`KvsExtraError::PathConflict`] if one entry's path is a strict prefix
///   of another's, if a segment is a leaf in one entry and a mapping in
///   another, or if the same path appears twice
/// - [`KvsExtraError::InvalidPath`] if a path is empty or has an empty segment
pub fn unflatten(entries: &[FlatEntry], delimiter: char) -> Result<Value> {
    let mut root = Map::new();
    for entry in entries {
        insert_entry(&mut root, entry, delimiter)?;
    }
    Ok(Value::Object(root))
}

/// walks/creates the nested maps for one entry's path and places its value
/// at the final segment
fn insert_entry(root: &mut Map<String, Value>, entry: &FlatEntry, delimiter: char) -> Result<()> {
    let segments: Vec<&str> = entry.path.split(delimiter).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(KvsExtraError::InvalidPath { path: entry.path.clone() });
    }

    // segments is non-empty here since a split never yields zero parts
    let (last, parents) = segments.split_last().unwrap();

    let mut current = root;
    let mut walked = String::new();
    for segment in parents {
        walked = join(&walked, segment, delimiter);
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            // a previous entry placed a leaf where this path needs a mapping
            _ => {
                return Err(KvsExtraError::PathConflict {
                    path: entry.path.clone(),
                    existing: walked,
                })
            }
        };
    }

    walked = join(&walked, last, delimiter);
    if current.contains_key(*last) {
        // either a duplicate path, or this path is a strict prefix of a
        // previously inserted one
        return Err(KvsExtraError::PathConflict {
            path: entry.path.clone(),
            existing: walked,
        });
    }
    current.insert(last.to_string(), entry.value.clone().into());
    Ok(())
}
