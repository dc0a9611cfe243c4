//! Typed records and document validation.
//!
//! Collections persist as arrays of loosely structured JSON documents.
//! Each record type decodes itself from a document with
//! `from_document`, returning `None` when a required field is missing or
//! has the wrong type. Scans treat such documents as malformed: they are
//! logged, skipped, and left untouched in the store.

use serde_json::{json, Value};

/// A lodging facility with a fixed total room count and a dynamically
/// tracked available count.
///
/// Invariant: `available_capacity <= total_capacity` after any operation
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    /// Unique identifier, assigned sequentially starting at 1.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Fixed room count.
    pub total_capacity: u32,
    /// Rooms currently free.
    pub available_capacity: u32,
}

impl Facility {
    /// Decodes a facility from a stored document.
    ///
    /// Required fields: `id`, `name`, `available_capacity`. A document
    /// without `total_capacity` is treated as being at capacity, i.e.
    /// `total_capacity = available_capacity`.
    #[must_use]
    pub fn from_document(document: &Value) -> Option<Self> {
        let id = document.get("id")?.as_u64()?;
        let name = document.get("name")?.as_str()?.to_string();
        let available_capacity = u32::try_from(document.get("available_capacity")?.as_u64()?).ok()?;
        let total_capacity = match document.get("total_capacity") {
            Some(value) => u32::try_from(value.as_u64()?).ok()?,
            None => available_capacity,
        };

        Some(Self {
            id,
            name,
            total_capacity,
            available_capacity,
        })
    }

    /// Encodes this facility as a stored document.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "total_capacity": self.total_capacity,
            "available_capacity": self.available_capacity,
        })
    }
}

/// A customer known to the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier, assigned sequentially starting at 1.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-form contact details.
    pub contact: String,
}

impl Customer {
    /// Decodes a customer from a stored document.
    ///
    /// Required fields: `id`, `name`. A missing `contact` decodes as an
    /// empty string.
    #[must_use]
    pub fn from_document(document: &Value) -> Option<Self> {
        let id = document.get("id")?.as_u64()?;
        let name = document.get("name")?.as_str()?.to_string();
        let contact = document
            .get("contact")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self { id, name, contact })
    }

    /// Encodes this customer as a stored document.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "contact": self.contact,
        })
    }
}

/// A booking linking one customer to one facility, valid from creation
/// until cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Unique identifier, assigned sequentially starting at 1.
    pub id: u64,
    /// The booking customer. Not checked against the customer registry.
    pub customer_id: u64,
    /// The booked facility.
    pub facility_id: u64,
    /// Creation timestamp, formatted as [`crate::TIMESTAMP_FORMAT`].
    pub created_at: String,
}

impl Booking {
    /// Decodes a booking from a stored document.
    ///
    /// Required fields: `id`, `customer_id`, `facility_id`. A missing
    /// `created_at` decodes as an empty string.
    #[must_use]
    pub fn from_document(document: &Value) -> Option<Self> {
        let id = document.get("id")?.as_u64()?;
        let customer_id = document.get("customer_id")?.as_u64()?;
        let facility_id = document.get("facility_id")?.as_u64()?;
        let created_at = document
            .get("created_at")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self {
            id,
            customer_id,
            facility_id,
            created_at,
        })
    }

    /// Encodes this booking as a stored document.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "id": self.id,
            "customer_id": self.customer_id,
            "facility_id": self.facility_id,
            "created_at": self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_decodes_complete_document() {
        let document = json!({
            "id": 1,
            "name": "Hotel Test",
            "total_capacity": 10,
            "available_capacity": 7,
        });

        let facility = Facility::from_document(&document).unwrap();
        assert_eq!(facility.id, 1);
        assert_eq!(facility.name, "Hotel Test");
        assert_eq!(facility.total_capacity, 10);
        assert_eq!(facility.available_capacity, 7);
    }

    #[test]
    fn facility_missing_name_is_malformed() {
        let document = json!({"id": 1, "available_capacity": 3});
        assert!(Facility::from_document(&document).is_none());
    }

    #[test]
    fn facility_missing_available_capacity_is_malformed() {
        let document = json!({"id": 1, "name": "Hotel Test"});
        assert!(Facility::from_document(&document).is_none());
    }

    #[test]
    fn facility_wrong_type_is_malformed() {
        let document = json!({"id": "one", "name": "Hotel Test", "available_capacity": 3});
        assert!(Facility::from_document(&document).is_none());
    }

    #[test]
    fn facility_without_total_is_treated_as_full() {
        let document = json!({"id": 2, "name": "Hotel Test", "available_capacity": 4});

        let facility = Facility::from_document(&document).unwrap();
        assert_eq!(facility.total_capacity, 4);
    }

    #[test]
    fn facility_document_round_trips() {
        let facility = Facility {
            id: 3,
            name: "Hotel Azul".to_string(),
            total_capacity: 5,
            available_capacity: 2,
        };

        let decoded = Facility::from_document(&facility.to_document()).unwrap();
        assert_eq!(decoded, facility);
    }

    #[test]
    fn facility_non_object_is_malformed() {
        assert!(Facility::from_document(&json!(42)).is_none());
        assert!(Facility::from_document(&json!(["id", 1])).is_none());
    }

    #[test]
    fn customer_missing_contact_defaults_empty() {
        let document = json!({"id": 1, "name": "Ana"});

        let customer = Customer::from_document(&document).unwrap();
        assert_eq!(customer.contact, "");
    }

    #[test]
    fn customer_missing_name_is_malformed() {
        let document = json!({"id": 1, "contact": "ana@example.com"});
        assert!(Customer::from_document(&document).is_none());
    }

    #[test]
    fn booking_decodes_complete_document() {
        let document = json!({
            "id": 1,
            "customer_id": 2,
            "facility_id": 3,
            "created_at": "2026-08-22 10:30:00",
        });

        let booking = Booking::from_document(&document).unwrap();
        assert_eq!(booking.id, 1);
        assert_eq!(booking.customer_id, 2);
        assert_eq!(booking.facility_id, 3);
        assert_eq!(booking.created_at, "2026-08-22 10:30:00");
    }

    #[test]
    fn booking_missing_facility_is_malformed() {
        let document = json!({"id": 1, "customer_id": 2});
        assert!(Booking::from_document(&document).is_none());
    }

    #[test]
    fn booking_missing_timestamp_defaults_empty() {
        let document = json!({"id": 1, "customer_id": 2, "facility_id": 3});

        let booking = Booking::from_document(&document).unwrap();
        assert_eq!(booking.created_at, "");
    }
}
