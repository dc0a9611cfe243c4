//! Shared load/save policy for record collections.
//!
//! Read failures degrade to an empty collection so every operation keeps
//! working from a well-formed view; write failures propagate to the
//! caller. Documents that fail to decode are the registries' concern,
//! not this module's: the full document list, malformed entries
//! included, travels through load and save untouched.

use crate::error::CoreResult;
use lodgedb_storage::{load_documents, save_documents, StoreBackend};
use serde_json::Value;
use tracing::error;

/// Loads a collection, absorbing read failures into an empty view.
pub(crate) fn load_or_empty(backend: &dyn StoreBackend, name: &str) -> Vec<Value> {
    match load_documents(backend, name) {
        Ok(documents) => documents,
        Err(err) => {
            error!("failed to load collection {name}: {err}");
            Vec::new()
        }
    }
}

/// Persists a collection wholesale.
pub(crate) fn save(backend: &dyn StoreBackend, name: &str, documents: &[Value]) -> CoreResult<()> {
    save_documents(backend, name, documents)?;
    Ok(())
}

/// Returns the highest `id` present in the given documents, or 0.
///
/// Documents without a usable `id` are ignored here; scans report them
/// when they actually get in the way of an operation.
pub(crate) fn max_id(documents: &[Value]) -> u64 {
    documents
        .iter()
        .filter_map(|document| document.get("id").and_then(Value::as_u64))
        .max()
        .unwrap_or(0)
}
