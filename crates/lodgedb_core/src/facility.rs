//! Facility registry: capacity accounting and the reserve/release pair.

use crate::collection;
use crate::error::CoreResult;
use crate::manifest::IdAllocator;
use crate::record::Facility;
use lodgedb_storage::StoreBackend;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

pub(crate) const COLLECTION: &str = "facilities";

/// Owns the facility collection and enforces the capacity invariant.
///
/// `reserve` is the sole gate preventing over-booking: the capacity check
/// and the decrement are observed as a single unit because every
/// operation runs its whole load-mutate-save cycle under the registry's
/// collection lock.
pub struct FacilityRegistry {
    backend: Arc<dyn StoreBackend>,
    ids: Arc<IdAllocator>,
    /// Guards the load-mutate-save cycle of the facility collection.
    lock: Mutex<()>,
}

impl FacilityRegistry {
    pub(crate) fn new(backend: Arc<dyn StoreBackend>, ids: Arc<IdAllocator>) -> Self {
        Self {
            backend,
            ids,
            lock: Mutex::new(()),
        }
    }

    /// Creates a facility with all rooms available and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the id counter or the collection cannot be
    /// persisted.
    pub fn create(&self, name: &str, total_capacity: u32) -> CoreResult<Facility> {
        let _guard = self.lock.lock();
        let mut documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        let id = self.ids.allocate_facility_id()?;
        let facility = Facility {
            id,
            name: name.to_string(),
            total_capacity,
            available_capacity: total_capacity,
        };

        documents.push(facility.to_document());
        collection::save(self.backend.as_ref(), COLLECTION, &documents)?;

        Ok(facility)
    }

    /// Returns all well-formed facilities, in store order.
    ///
    /// Malformed documents are logged and skipped; an unreadable or
    /// corrupted store degrades to an empty list.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the registry operations
    /// uniform for callers.
    pub fn list_valid(&self) -> CoreResult<Vec<Facility>> {
        let _guard = self.lock.lock();
        let documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        Ok(documents.iter().filter_map(decode_or_warn).collect())
    }

    /// Takes one room from the facility, if any is free.
    ///
    /// Returns `Ok(true)` after decrementing and persisting. Returns
    /// `Ok(false)` without touching the store when the facility is full
    /// or no well-formed document matches `facility_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the decremented collection cannot be
    /// persisted.
    pub fn reserve(&self, facility_id: u64) -> CoreResult<bool> {
        let _guard = self.lock.lock();
        let mut documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        let mut reserved = false;
        for document in &mut documents {
            let Some(facility) = decode_or_warn(document) else {
                continue;
            };
            if facility.id != facility_id {
                continue;
            }
            if facility.available_capacity == 0 {
                return Ok(false);
            }

            set_available(document, facility.available_capacity - 1);
            reserved = true;
            break;
        }

        if !reserved {
            return Ok(false);
        }

        collection::save(self.backend.as_ref(), COLLECTION, &documents)?;
        Ok(true)
    }

    /// Returns one room to the facility, never exceeding its total.
    ///
    /// An increment that would pass `total_capacity` is clamped and
    /// logged instead of applied; release undoes a prior reserve, it does
    /// not grow facilities. The collection is persisted even when no
    /// document matched `facility_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn release(&self, facility_id: u64) -> CoreResult<()> {
        let _guard = self.lock.lock();
        let mut documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        for document in &mut documents {
            let Some(facility) = decode_or_warn(document) else {
                continue;
            };
            if facility.id != facility_id {
                continue;
            }

            if facility.available_capacity >= facility.total_capacity {
                warn!(
                    "release on facility {facility_id} would exceed total capacity {}; leaving at {}",
                    facility.total_capacity, facility.available_capacity
                );
            } else {
                set_available(document, facility.available_capacity + 1);
            }
            break;
        }

        collection::save(self.backend.as_ref(), COLLECTION, &documents)
    }
}

fn decode_or_warn(document: &Value) -> Option<Facility> {
    let facility = Facility::from_document(document);
    if facility.is_none() {
        warn!("skipping malformed facility document: {document}");
    }
    facility
}

fn set_available(document: &mut Value, value: u32) {
    if let Value::Object(map) = document {
        map.insert("available_capacity".to_string(), json!(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgedb_storage::MemoryBackend;

    fn registry_over(backend: Arc<MemoryBackend>) -> FacilityRegistry {
        let ids = Arc::new(IdAllocator::open(backend.clone() as Arc<dyn StoreBackend>).unwrap());
        FacilityRegistry::new(backend, ids)
    }

    fn fresh_registry() -> FacilityRegistry {
        registry_over(Arc::new(MemoryBackend::new()))
    }

    fn seeded_registry(documents: serde_json::Value) -> FacilityRegistry {
        let data = serde_json::to_vec_pretty(&documents).unwrap();
        registry_over(Arc::new(MemoryBackend::with_store("facilities.json", data)))
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let registry = fresh_registry();

        let first = registry.create("Hotel Test", 10).unwrap();
        let second = registry.create("Hotel Azul", 5).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_starts_at_full_capacity() {
        let registry = fresh_registry();

        let facility = registry.create("Hotel Test", 10).unwrap();
        assert_eq!(facility.available_capacity, 10);

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].available_capacity, 10);
    }

    #[test]
    fn list_valid_skips_malformed_documents() {
        let registry = seeded_registry(serde_json::json!([
            {"id": 1, "name": "Hotel Test", "total_capacity": 3, "available_capacity": 3},
            {"id": 2, "name": "Hotel Roto"},
            {"name": "sin id", "available_capacity": 4},
        ]));

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 1);
    }

    #[test]
    fn reserve_decrements_and_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let registry = registry_over(backend.clone());
        let facility = registry.create("Hotel Test", 2).unwrap();

        assert!(registry.reserve(facility.id).unwrap());

        // A registry reopened over the same store sees the decrement
        let reopened = registry_over(backend);
        let listed = reopened.list_valid().unwrap();
        assert_eq!(listed[0].available_capacity, 1);
    }

    #[test]
    fn reserve_at_zero_returns_false_without_persisting() {
        let backend = Arc::new(MemoryBackend::new());
        let registry = registry_over(backend.clone());
        let facility = registry.create("Hotel Test", 1).unwrap();

        assert!(registry.reserve(facility.id).unwrap());
        let stored_before = backend.store("facilities.json");

        assert!(!registry.reserve(facility.id).unwrap());
        assert_eq!(backend.store("facilities.json"), stored_before);
    }

    #[test]
    fn reserve_unknown_facility_returns_false() {
        let registry = fresh_registry();
        registry.create("Hotel Test", 3).unwrap();

        assert!(!registry.reserve(99).unwrap());
    }

    #[test]
    fn reserve_continues_past_malformed_documents() {
        let registry = seeded_registry(serde_json::json!([
            {"id": 1, "name": "Hotel Roto"},
            {"id": 1, "name": "Hotel Test", "total_capacity": 1, "available_capacity": 1},
        ]));

        assert!(registry.reserve(1).unwrap());
    }

    #[test]
    fn release_restores_reserved_room() {
        let registry = fresh_registry();
        let facility = registry.create("Hotel Test", 5).unwrap();

        assert!(registry.reserve(facility.id).unwrap());
        registry.release(facility.id).unwrap();

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed[0].available_capacity, 5);
    }

    #[test]
    fn release_clamps_at_total_capacity() {
        let registry = fresh_registry();
        let facility = registry.create("Hotel Test", 2).unwrap();

        registry.release(facility.id).unwrap();

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed[0].available_capacity, 2);
    }

    #[test]
    fn release_without_match_still_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let registry = registry_over(backend.clone());

        registry.release(99).unwrap();

        assert!(backend.store("facilities.json").is_some());
    }

    #[test]
    fn release_clamps_when_total_is_absent() {
        let registry = seeded_registry(serde_json::json!([
            {"id": 1, "name": "Hotel Test", "available_capacity": 4},
        ]));

        registry.release(1).unwrap();

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed[0].available_capacity, 4);
    }

    #[test]
    fn extra_fields_survive_reserve_and_release() {
        let registry = seeded_registry(serde_json::json!([
            {"id": 1, "name": "Hotel Test", "total_capacity": 2,
             "available_capacity": 2, "city": "Oaxaca"},
        ]));

        assert!(registry.reserve(1).unwrap());
        registry.release(1).unwrap();

        let documents = collection::load_or_empty(registry.backend.as_ref(), COLLECTION);
        assert_eq!(documents[0].get("city").and_then(Value::as_str), Some("Oaxaca"));
    }
}
