//! In-memory store backend for testing.

use crate::backend::StoreBackend;
use crate::error::StoreResult;
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory store backend.
///
/// This backend keeps every store in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral databases that don't need persistence
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use lodgedb_storage::{MemoryBackend, StoreBackend};
///
/// let backend = MemoryBackend::new();
/// backend.write("notes.json", b"[]").unwrap();
/// assert_eq!(backend.read("notes.json").unwrap().as_deref(), Some(&b"[]"[..]));
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stores: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Creates a new backend with no stores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend seeded with one store.
    ///
    /// Useful for testing how pre-existing content is handled.
    #[must_use]
    pub fn with_store(name: impl Into<String>, data: Vec<u8>) -> Self {
        let backend = Self::new();
        backend.stores.write().insert(name.into(), data);
        backend
    }

    /// Returns a copy of the named store's content, if present.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn store(&self, name: &str) -> Option<Vec<u8>> {
        self.stores.read().get(name).cloned()
    }

    /// Removes all stores.
    pub fn clear(&self) {
        self.stores.write().clear();
    }
}

impl StoreBackend for MemoryBackend {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.stores.read().get(name).cloned())
    }

    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        self.stores.write().insert(name.to_string(), data.to_vec());
        Ok(())
    }
}
