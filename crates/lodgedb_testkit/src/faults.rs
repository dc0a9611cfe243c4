//! Fault injection for failure-path testing.
//!
//! Wraps a store backend and makes selected writes fail, so tests can
//! verify that callers keep their stores consistent when persistence
//! breaks mid-operation.

use lodgedb_storage::{StoreBackend, StoreResult};
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// A store backend wrapper that can inject write failures.
///
/// Failures can target one named store or fire after a number of
/// successful writes. Reads always pass through to the inner backend.
pub struct FlakyBackend {
    inner: Arc<dyn StoreBackend>,
    fail_store: Mutex<Option<String>>,
    writes_before_failure: AtomicUsize,
    tripped: AtomicBool,
}

impl FlakyBackend {
    /// Creates a new flaky backend wrapping an inner backend.
    ///
    /// No failures are injected until one of the `fail_*` methods is
    /// called.
    pub fn new(inner: Arc<dyn StoreBackend>) -> Self {
        Self {
            inner,
            fail_store: Mutex::new(None),
            writes_before_failure: AtomicUsize::new(usize::MAX),
            tripped: AtomicBool::new(false),
        }
    }

    /// Makes every write to the named store fail.
    pub fn fail_writes_to(&self, store: impl Into<String>) {
        *self.fail_store.lock() = Some(store.into());
    }

    /// Lets the next `writes` writes through, then fails every write
    /// after them regardless of store.
    pub fn fail_after_writes(&self, writes: usize) {
        self.writes_before_failure.store(writes, Ordering::SeqCst);
    }

    /// Clears all injected failures.
    pub fn reset(&self) {
        *self.fail_store.lock() = None;
        self.writes_before_failure.store(usize::MAX, Ordering::SeqCst);
        self.tripped.store(false, Ordering::SeqCst);
    }

    /// Returns whether any injected failure has fired.
    pub fn has_tripped(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }

    fn injected_failure(&self, store: &str) -> io::Error {
        self.tripped.store(true, Ordering::SeqCst);
        io::Error::new(
            io::ErrorKind::Other,
            format!("injected write failure on {store}"),
        )
    }
}

impl StoreBackend for FlakyBackend {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.read(name)
    }

    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        if self.fail_store.lock().as_deref() == Some(name) {
            return Err(self.injected_failure(name).into());
        }

        let remaining = self.writes_before_failure.load(Ordering::SeqCst);
        if remaining != usize::MAX {
            if remaining == 0 {
                return Err(self.injected_failure(name).into());
            }
            self.writes_before_failure.store(remaining - 1, Ordering::SeqCst);
        }

        self.inner.write(name, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestDatabase;
    use lodgedb_storage::MemoryBackend;

    fn flaky_over_memory() -> (Arc<FlakyBackend>, Arc<MemoryBackend>) {
        let inner = Arc::new(MemoryBackend::new());
        let flaky = Arc::new(FlakyBackend::new(
            Arc::clone(&inner) as Arc<dyn StoreBackend>
        ));
        (flaky, inner)
    }

    #[test]
    fn test_flaky_backend_normal_operation() {
        let (flaky, _inner) = flaky_over_memory();

        flaky.write("data.json", b"[]").unwrap();

        assert_eq!(flaky.read("data.json").unwrap().as_deref(), Some(&b"[]"[..]));
        assert!(!flaky.has_tripped());
    }

    #[test]
    fn test_flaky_backend_fails_named_store() {
        let (flaky, inner) = flaky_over_memory();
        flaky.fail_writes_to("bookings.json");

        assert!(flaky.write("bookings.json", b"[]").is_err());
        assert!(flaky.write("facilities.json", b"[]").is_ok());

        assert!(flaky.has_tripped());
        assert!(inner.store("bookings.json").is_none());
        assert!(inner.store("facilities.json").is_some());
    }

    #[test]
    fn test_flaky_backend_fails_after_count() {
        let (flaky, _inner) = flaky_over_memory();
        flaky.fail_after_writes(2);

        assert!(flaky.write("a.json", b"1").is_ok());
        assert!(flaky.write("b.json", b"2").is_ok());
        assert!(flaky.write("c.json", b"3").is_err());
        assert!(flaky.has_tripped());
    }

    #[test]
    fn test_flaky_backend_reset_clears_failures() {
        let (flaky, _inner) = flaky_over_memory();
        flaky.fail_writes_to("data.json");
        assert!(flaky.write("data.json", b"[]").is_err());

        flaky.reset();

        assert!(flaky.write("data.json", b"[]").is_ok());
        assert!(!flaky.has_tripped());
    }

    #[test]
    fn test_failed_booking_write_keeps_capacity_consistent() {
        let (flaky, _inner) = flaky_over_memory();
        let test_db = TestDatabase::over(Arc::clone(&flaky) as Arc<dyn StoreBackend>);

        let facility = test_db.facilities().create("Hotel Test", 2).unwrap();
        flaky.fail_writes_to("bookings.json");

        assert!(test_db.bookings().create(1, facility.id).is_err());
        assert!(flaky.has_tripped());

        // The reserved room was put back when the booking failed to persist
        let listed = test_db.facilities().list_valid().unwrap();
        assert_eq!(listed[0].available_capacity, 2);
    }

    #[test]
    fn test_failed_facility_write_surfaces_to_caller() {
        let (flaky, _inner) = flaky_over_memory();
        let test_db = TestDatabase::over(Arc::clone(&flaky) as Arc<dyn StoreBackend>);
        flaky.fail_writes_to("facilities.json");

        assert!(test_db.facilities().create("Hotel Test", 2).is_err());
    }
}
