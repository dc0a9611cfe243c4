//! Store backend trait definition.

use crate::error::StoreResult;

/// A low-level store backend for LodgeDB.
///
/// Store backends are **opaque byte stores** keyed by name. They provide
/// whole-store reads and whole-store replacements. LodgeDB owns all content
/// interpretation - backends do not understand collections or records.
///
/// # Invariants
///
/// - `read` returns exactly the bytes of the most recent completed `write`
///   for that name, or `None` if the name was never written
/// - `write` replaces the named store as a single unit; readers never
///   observe a partially written store
/// - Backends must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::MemoryBackend`] - For testing
/// - [`super::DirBackend`] - For persistent storage
pub trait StoreBackend: Send + Sync {
    /// Reads the full content of the named store.
    ///
    /// Returns `Ok(None)` if the store has never been written. This is the
    /// ordinary state of a fresh database and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the full content of the named store.
    ///
    /// After this returns successfully, a subsequent `read` observes
    /// exactly `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()>;
}
