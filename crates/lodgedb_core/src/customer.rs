//! Customer registry.

use crate::collection;
use crate::error::CoreResult;
use crate::manifest::IdAllocator;
use crate::record::Customer;
use lodgedb_storage::StoreBackend;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

pub(crate) const COLLECTION: &str = "customers";

/// Owns the customer collection.
///
/// Customers carry no cross-record invariant; the registry offers
/// creation and validated listing only.
pub struct CustomerRegistry {
    backend: Arc<dyn StoreBackend>,
    ids: Arc<IdAllocator>,
    /// Guards the load-mutate-save cycle of the customer collection.
    lock: Mutex<()>,
}

impl CustomerRegistry {
    pub(crate) fn new(backend: Arc<dyn StoreBackend>, ids: Arc<IdAllocator>) -> Self {
        Self {
            backend,
            ids,
            lock: Mutex::new(()),
        }
    }

    /// Creates a customer and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the id counter or the collection cannot be
    /// persisted.
    pub fn create(&self, name: &str, contact: &str) -> CoreResult<Customer> {
        let _guard = self.lock.lock();
        let mut documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        let id = self.ids.allocate_customer_id()?;
        let customer = Customer {
            id,
            name: name.to_string(),
            contact: contact.to_string(),
        };

        documents.push(customer.to_document());
        collection::save(self.backend.as_ref(), COLLECTION, &documents)?;

        Ok(customer)
    }

    /// Returns all well-formed customers, in store order.
    ///
    /// Malformed documents are logged and skipped; an unreadable or
    /// corrupted store degrades to an empty list.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the registry operations
    /// uniform for callers.
    pub fn list_valid(&self) -> CoreResult<Vec<Customer>> {
        let _guard = self.lock.lock();
        let documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        Ok(documents.iter().filter_map(decode_or_warn).collect())
    }
}

fn decode_or_warn(document: &Value) -> Option<Customer> {
    let customer = Customer::from_document(document);
    if customer.is_none() {
        warn!("skipping malformed customer document: {document}");
    }
    customer
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgedb_storage::MemoryBackend;

    fn fresh_registry() -> CustomerRegistry {
        let backend: Arc<dyn StoreBackend> = Arc::new(MemoryBackend::new());
        let ids = Arc::new(IdAllocator::open(Arc::clone(&backend)).unwrap());
        CustomerRegistry::new(backend, ids)
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let registry = fresh_registry();

        let first = registry.create("Ana", "ana@example.com").unwrap();
        let second = registry.create("Luis", "555-0102").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn created_customers_are_listed_in_order() {
        let registry = fresh_registry();
        registry.create("Ana", "ana@example.com").unwrap();
        registry.create("Luis", "555-0102").unwrap();

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Ana");
        assert_eq!(listed[1].name, "Luis");
    }

    #[test]
    fn list_valid_skips_malformed_documents() {
        let data = serde_json::to_vec_pretty(&serde_json::json!([
            {"id": 1, "name": "Ana", "contact": "ana@example.com"},
            {"contact": "sin nombre"},
        ]))
        .unwrap();
        let backend: Arc<dyn StoreBackend> =
            Arc::new(MemoryBackend::with_store("customers.json", data));
        let ids = Arc::new(IdAllocator::open(Arc::clone(&backend)).unwrap());
        let registry = CustomerRegistry::new(backend, ids);

        let listed = registry.list_valid().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Ana");
    }
}
