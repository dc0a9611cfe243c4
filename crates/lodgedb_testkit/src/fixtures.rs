//! Test fixtures and database helpers.
//!
//! Provides convenience functions for setting up test databases
//! and common test scenarios.

use lodgedb_core::{Clock, Database, SystemClock};
use lodgedb_storage::{save_documents, StoreBackend};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// A test database with automatic cleanup.
pub struct TestDatabase {
    /// The database instance.
    pub db: Database,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestDatabase {
    /// Creates a new in-memory test database.
    pub fn memory() -> Self {
        Self {
            db: Database::open_in_memory().expect("Failed to open in-memory database"),
            _temp_dir: None,
        }
    }

    /// Creates a new file-based test database in a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db = Database::open(temp_dir.path()).expect("Failed to open file database");

        Self {
            db,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Creates a test database over the given backend.
    ///
    /// Keep a second handle to the backend to inspect or seed raw store
    /// content around operations.
    pub fn over(backend: Arc<dyn StoreBackend>) -> Self {
        Self::over_with_clock(backend, Arc::new(SystemClock))
    }

    /// Creates a test database over the given backend and clock.
    pub fn over_with_clock(backend: Arc<dyn StoreBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            db: Database::open_with_parts(backend, clock)
                .expect("Failed to open database over backend"),
            _temp_dir: None,
        }
    }

    /// Returns the database path if file-based, `None` if in-memory.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl std::ops::DerefMut for TestDatabase {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.db
    }
}

/// Runs a test with a temporary in-memory database.
///
/// # Example
///
/// ```rust
/// use lodgedb_testkit::with_temp_db;
///
/// with_temp_db(|db| {
///     let facility = db.facilities().create("Hotel Test", 2).unwrap();
///     assert_eq!(facility.available_capacity, 2);
/// });
/// ```
pub fn with_temp_db<F, R>(f: F) -> R
where
    F: FnOnce(&Database) -> R,
{
    let test_db = TestDatabase::memory();
    f(&test_db.db)
}

/// Runs a test with a temporary file-based database.
pub fn with_file_db<F, R>(f: F) -> R
where
    F: FnOnce(&Database, &Path) -> R,
{
    let test_db = TestDatabase::file();
    let path = test_db
        .path()
        .expect("File database should have a path")
        .to_path_buf();
    f(&test_db.db, &path)
}

/// A clock that always returns the same timestamp.
#[derive(Debug, Clone)]
pub struct FixedClock {
    stamp: String,
}

impl FixedClock {
    /// Creates a clock pinned to the given timestamp.
    #[must_use]
    pub fn new(stamp: impl Into<String>) -> Self {
        Self {
            stamp: stamp.into(),
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new("2026-01-15 12:00:00")
    }
}

impl Clock for FixedClock {
    fn now_string(&self) -> String {
        self.stamp.clone()
    }
}

/// Replaces a collection store with the given documents.
///
/// Accepts arbitrary documents so tests can seed malformed records next
/// to valid ones.
pub fn seed_documents(backend: &dyn StoreBackend, collection: &str, documents: &[Value]) {
    save_documents(backend, collection, documents).expect("Failed to seed collection");
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates an in-memory database with `facility_count` facilities of
    /// `rooms_each` rooms and one customer per facility.
    pub fn populated_database(facility_count: usize, rooms_each: u32) -> TestDatabase {
        let test_db = TestDatabase::memory();

        for i in 1..=facility_count {
            test_db
                .facilities()
                .create(&format!("Facility {i}"), rooms_each)
                .expect("Failed to create facility");
            test_db
                .customers()
                .create(&format!("Customer {i}"), &format!("customer{i}@example.com"))
                .expect("Failed to create customer");
        }

        test_db
    }

    /// Creates an in-memory database with one facility booked to
    /// capacity. Returns the database and the facility's id.
    pub fn fully_booked_facility(rooms: u32) -> (TestDatabase, u64) {
        let test_db = TestDatabase::memory();
        let facility = test_db
            .facilities()
            .create("Facility Full", rooms)
            .expect("Failed to create facility");
        let customer = test_db
            .customers()
            .create("Customer", "customer@example.com")
            .expect("Failed to create customer");

        for _ in 0..rooms {
            let booked = test_db
                .bookings()
                .create(customer.id, facility.id)
                .expect("Failed to book");
            assert!(booked, "Facility filled up before its stated capacity");
        }

        (test_db, facility.id)
    }
}
