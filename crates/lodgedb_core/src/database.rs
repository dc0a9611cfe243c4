//! Database facade.

use crate::booking::BookingLedger;
use crate::clock::{Clock, SystemClock};
use crate::collection;
use crate::config::Config;
use crate::customer::CustomerRegistry;
use crate::dir::DatabaseDir;
use crate::error::CoreResult;
use crate::facility::FacilityRegistry;
use crate::manifest::IdAllocator;
use crate::{booking, customer, facility};
use lodgedb_storage::{DirBackend, MemoryBackend, StoreBackend};
use std::path::Path;
use std::sync::Arc;

/// The main database handle.
///
/// `Database` is the primary entry point for LodgeDB. It wires the
/// facility registry, the customer registry, and the booking ledger over
/// one store backend, and holds the directory lock for persistent
/// databases.
///
/// # Opening a Database
///
/// ```rust
/// use lodgedb_core::Database;
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Database::open(dir.path()).unwrap();
///
/// let facility = db.facilities().create("Hotel Azul", 5).unwrap();
/// let customer = db.customers().create("Ana", "ana@example.com").unwrap();
/// assert!(db.bookings().create(customer.id, facility.id).unwrap());
/// ```
///
/// # In-Memory Databases
///
/// For testing, use [`Database::open_in_memory`]; nothing touches the
/// file system and all data is lost on drop.
pub struct Database {
    facilities: Arc<FacilityRegistry>,
    customers: Arc<CustomerRegistry>,
    bookings: Arc<BookingLedger>,
    /// Database directory (holds the lock). `None` for in-memory
    /// databases.
    dir: Option<DatabaseDir>,
}

impl Database {
    /// Opens a database from a directory path with default
    /// configuration.
    ///
    /// The method creates the directory if needed, acquires the
    /// exclusive directory lock, loads the manifest, and reconciles the
    /// id counters against the ids present in the stores.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another process has the database locked (`DatabaseLocked`)
    /// - The manifest exists but cannot be understood (`InvalidFormat`)
    /// - I/O errors occur
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a database from a directory path with custom configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Database::open`]; additionally fails when the directory
    /// is missing and `create_if_missing` is false.
    pub fn open_with_config(path: &Path, config: Config) -> CoreResult<Self> {
        let dir = DatabaseDir::open(path, config.create_if_missing)?;
        let backend = DirBackend::open_with_sync(dir.path(), config.sync_on_save)?;
        Self::build(Some(dir), Arc::new(backend), Arc::new(SystemClock))
    }

    /// Opens a database over the given backend and clock.
    ///
    /// This is a lower-level constructor for tests and embedders with
    /// pre-configured parts. No directory lock is taken; the backend is
    /// assumed to be exclusively owned.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists on the backend but cannot
    /// be understood, or if reconciling it fails.
    pub fn open_with_parts(
        backend: Arc<dyn StoreBackend>,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        Self::build(None, backend, clock)
    }

    /// Opens a fresh in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible to match the
    /// other constructors.
    pub fn open_in_memory() -> CoreResult<Self> {
        Self::open_with_parts(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    fn build(
        dir: Option<DatabaseDir>,
        backend: Arc<dyn StoreBackend>,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        let ids = Arc::new(IdAllocator::open(Arc::clone(&backend))?);

        // Counters must stay ahead of every id already in the stores,
        // manifest or not
        ids.reconcile(
            collection::max_id(&collection::load_or_empty(
                backend.as_ref(),
                facility::COLLECTION,
            )),
            collection::max_id(&collection::load_or_empty(
                backend.as_ref(),
                customer::COLLECTION,
            )),
            collection::max_id(&collection::load_or_empty(
                backend.as_ref(),
                booking::COLLECTION,
            )),
        )?;

        let facilities = Arc::new(FacilityRegistry::new(
            Arc::clone(&backend),
            Arc::clone(&ids),
        ));
        let customers = Arc::new(CustomerRegistry::new(
            Arc::clone(&backend),
            Arc::clone(&ids),
        ));
        let bookings = Arc::new(BookingLedger::new(
            backend,
            ids,
            Arc::clone(&facilities),
            clock,
        ));

        Ok(Self {
            facilities,
            customers,
            bookings,
            dir,
        })
    }

    /// Returns the facility registry.
    #[must_use]
    pub fn facilities(&self) -> &FacilityRegistry {
        &self.facilities
    }

    /// Returns the customer registry.
    #[must_use]
    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    /// Returns the booking ledger.
    #[must_use]
    pub fn bookings(&self) -> &BookingLedger {
        &self.bookings
    }

    /// Returns the database directory path, or `None` for in-memory
    /// databases.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(DatabaseDir::path)
    }
}
