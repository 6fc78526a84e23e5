//! The export/import round-trip pipeline over a [`KeySpace`].
//!
//! Export fetches every key under a root prefix and prints them as one
//! nested JSON document; import flattens a JSON/JSON5 document into
//! individual key writes. Neither direction is atomic: export issues one
//! fetch per key and discards everything on the first failure, while import
//! issues one write per entry and stops at the first failure without rolling
//! back the writes that already succeeded.

use std::fs;
use std::io::Write;
use serde_json::Value;
use tracing::info;
use crate::client::KeySpace;
use crate::codec::{flatten, unflatten, FlatEntry, DELIMITER};
use crate::{KvsExtraError, Result};

/// Exports every key under `root_key` as a nested JSON document, written to
/// `out` with 2-space indentation.
///
/// Enumeration and per-key fetches are independent remote calls; if any of
/// them fails (or the prefix matches nothing), the whole export fails with
/// [`KvsExtraError::RootKeyNotFound`] and nothing is written to `out`.
pub fn export<S: KeySpace, W: Write>(store: &mut S, root_key: &str, out: &mut W) -> Result<()> {
    let not_found = || KvsExtraError::RootKeyNotFound { root_key: root_key.to_string() };

    let keys = store.list_keys(root_key).map_err(|_| not_found())?;
    if keys.is_empty() {
        return Err(not_found());
    }

    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let value = store.get_value(&key).map_err(|_| not_found())?;
        entries.push(FlatEntry::new(key, value));
    }

    let doc = unflatten(&entries, DELIMITER)?;
    let json = serde_json::to_string_pretty(&doc)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Reads `file_name`, parses it as JSON5 and imports the document with
/// [`import_document`].
///
/// An empty `file_name` fails with [`KvsExtraError::MissingArgument`] before
/// the store is touched.
pub fn import<S: KeySpace>(store: &mut S, file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(KvsExtraError::MissingArgument);
    }
    let text = fs::read_to_string(file_name)?;
    let doc: Value = json5::from_str(&text)?;
    import_document(store, &doc)
}

/// Flattens `doc` and writes each resulting entry to the store, in document
/// order.
///
/// Writes are independent; the first failed write aborts the import with
/// [`KvsExtraError::KeyWriteFailed`] naming the key, and the keys written
/// before it stay written. Each successful write is logged.
pub fn import_document<S: KeySpace>(store: &mut S, doc: &Value) -> Result<()> {
    for entry in flatten(doc, DELIMITER)? {
        store
            .set_value(&entry.path, &entry.value)
            .map_err(|_| KvsExtraError::KeyWriteFailed { key: entry.path.clone() })?;
        info!("Set key '{}' to '{}'", entry.path, entry.value);
    }
    Ok(())
}
