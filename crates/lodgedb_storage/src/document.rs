//! JSON document layer over a store backend.
//!
//! A collection persists as one store holding a pretty-printed JSON array
//! of documents. This layer distinguishes the three outcomes callers need
//! to tell apart: a store that was never written (a valid empty
//! collection), a store whose content is not an array (corruption), and a
//! store that cannot be read at all (environmental failure).

use crate::backend::StoreBackend;
use crate::error::{StorageError, StoreResult};
use serde_json::Value;
use std::io;

/// Name of the store holding the given collection.
fn store_name(collection: &str) -> String {
    format!("{collection}.json")
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loads all documents of a collection.
///
/// A collection that has never been saved is an empty collection, not an
/// error.
///
/// # Errors
///
/// Returns [`StorageError::Corrupted`] if the store content is not a JSON
/// array, and [`StorageError::Io`] if the store exists but cannot be read.
pub fn load_documents(backend: &dyn StoreBackend, collection: &str) -> StoreResult<Vec<Value>> {
    let Some(data) = backend.read(&store_name(collection))? else {
        return Ok(Vec::new());
    };

    let value: Value = serde_json::from_slice(&data)
        .map_err(|e| StorageError::corrupted(format!("{collection}: {e}")))?;

    match value {
        Value::Array(documents) => Ok(documents),
        other => Err(StorageError::corrupted(format!(
            "{collection}: expected a top-level array, found {}",
            json_type(&other)
        ))),
    }
}

/// Saves all documents of a collection, pretty-printed for human
/// inspection.
///
/// The whole store is replaced in one write; there are no partial saves.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the store cannot be written.
pub fn save_documents(
    backend: &dyn StoreBackend,
    collection: &str,
    documents: &[Value],
) -> StoreResult<()> {
    let data = serde_json::to_vec_pretty(documents)
        .map_err(|e| StorageError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    backend.write(&store_name(collection), &data)
}
