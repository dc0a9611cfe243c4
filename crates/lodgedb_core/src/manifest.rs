//! Database manifest and id allocation.
//!
//! The manifest persists the monotonic id counters next to the
//! collection stores, so identifiers stay unique across the full history
//! of each collection, deletions included. Counters are bumped and
//! persisted *before* the record they number is appended: a crash in
//! between wastes an id but can never issue one twice.

use crate::error::{CoreError, CoreResult};
use lodgedb_storage::StoreBackend;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the manifest store.
const MANIFEST_STORE: &str = "manifest.json";

/// Current manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Database manifest containing format version and id counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version of the database directory.
    pub format_version: u32,
    /// Next facility id to assign.
    pub next_facility_id: u64,
    /// Next customer id to assign.
    pub next_customer_id: u64,
    /// Next booking id to assign.
    pub next_booking_id: u64,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            format_version: MANIFEST_VERSION,
            next_facility_id: 1,
            next_customer_id: 1,
            next_booking_id: 1,
        }
    }
}

impl Manifest {
    /// Loads the manifest from the backend.
    ///
    /// Returns `None` if it has never been saved (new database).
    ///
    /// # Errors
    ///
    /// A manifest that exists but cannot be decoded, or that carries a
    /// newer format version than this build understands, is an error.
    /// Unlike collection content, it is not absorbed: re-issuing ids
    /// against an unreadable counter would break uniqueness.
    pub fn load(backend: &dyn StoreBackend) -> CoreResult<Option<Self>> {
        let Some(data) = backend.read(MANIFEST_STORE)? else {
            return Ok(None);
        };

        let manifest: Self = serde_json::from_slice(&data)
            .map_err(|e| CoreError::invalid_format(format!("manifest: {e}")))?;

        if manifest.format_version > MANIFEST_VERSION {
            return Err(CoreError::invalid_format(format!(
                "unsupported manifest version: {}",
                manifest.format_version
            )));
        }

        Ok(Some(manifest))
    }

    /// Saves the manifest to the backend.
    pub fn save(&self, backend: &dyn StoreBackend) -> CoreResult<()> {
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| CoreError::invalid_format(format!("manifest encode: {e}")))?;
        backend.write(MANIFEST_STORE, &data)?;
        Ok(())
    }
}

/// Hands out record ids from the persisted manifest counters.
///
/// Shared by all registries of one database. Internally synchronized;
/// every allocation persists the bumped counter before returning.
pub(crate) struct IdAllocator {
    backend: Arc<dyn StoreBackend>,
    manifest: Mutex<Manifest>,
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator")
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

impl IdAllocator {
    /// Loads the allocator state, starting fresh if none exists.
    pub(crate) fn open(backend: Arc<dyn StoreBackend>) -> CoreResult<Self> {
        let manifest = Manifest::load(backend.as_ref())?.unwrap_or_default();
        Ok(Self {
            backend,
            manifest: Mutex::new(manifest),
        })
    }

    /// Raises counters that have fallen behind the ids actually present
    /// in the stores.
    ///
    /// Keeps hand-edited directories and directories created before the
    /// manifest existed safe: the next id is always greater than every id
    /// ever observed.
    pub(crate) fn reconcile(
        &self,
        max_facility_id: u64,
        max_customer_id: u64,
        max_booking_id: u64,
    ) -> CoreResult<()> {
        let mut manifest = self.manifest.lock();
        let reconciled = Manifest {
            format_version: manifest.format_version,
            next_facility_id: manifest.next_facility_id.max(max_facility_id + 1),
            next_customer_id: manifest.next_customer_id.max(max_customer_id + 1),
            next_booking_id: manifest.next_booking_id.max(max_booking_id + 1),
        };

        if reconciled != *manifest {
            reconciled.save(self.backend.as_ref())?;
            *manifest = reconciled;
        }

        Ok(())
    }

    pub(crate) fn allocate_facility_id(&self) -> CoreResult<u64> {
        self.allocate(|manifest| &mut manifest.next_facility_id)
    }

    pub(crate) fn allocate_customer_id(&self) -> CoreResult<u64> {
        self.allocate(|manifest| &mut manifest.next_customer_id)
    }

    pub(crate) fn allocate_booking_id(&self) -> CoreResult<u64> {
        self.allocate(|manifest| &mut manifest.next_booking_id)
    }

    /// Takes the next id from one counter, persisting the bump first.
    fn allocate(&self, select: fn(&mut Manifest) -> &mut u64) -> CoreResult<u64> {
        let mut manifest = self.manifest.lock();
        let id = *select(&mut manifest);
        *select(&mut manifest) = id + 1;

        if let Err(err) = manifest.save(self.backend.as_ref()) {
            *select(&mut manifest) = id;
            return Err(err);
        }

        Ok(id)
    }
}
