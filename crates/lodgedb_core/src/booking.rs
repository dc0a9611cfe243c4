//! Booking ledger: couples booking records to facility capacity.

use crate::clock::Clock;
use crate::collection;
use crate::error::CoreResult;
use crate::facility::FacilityRegistry;
use crate::manifest::IdAllocator;
use crate::record::Booking;
use lodgedb_storage::StoreBackend;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

pub(crate) const COLLECTION: &str = "bookings";

/// Owns the booking collection and composes with the facility registry
/// so booking creation and cancellation stay atomic with capacity
/// changes.
///
/// Lock order is always ledger before facility registry; the registry
/// never calls back into the ledger.
pub struct BookingLedger {
    backend: Arc<dyn StoreBackend>,
    ids: Arc<IdAllocator>,
    facilities: Arc<FacilityRegistry>,
    clock: Arc<dyn Clock>,
    /// Guards the load-mutate-save cycle of the booking collection.
    lock: Mutex<()>,
}

impl BookingLedger {
    pub(crate) fn new(
        backend: Arc<dyn StoreBackend>,
        ids: Arc<IdAllocator>,
        facilities: Arc<FacilityRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            ids,
            facilities,
            clock,
            lock: Mutex::new(()),
        }
    }

    /// Books one room of `facility_id` for `customer_id`.
    ///
    /// Reservation is the gating precondition: the facility's capacity is
    /// taken first, and only then is the booking record written and
    /// `Ok(true)` returned. A full or unknown facility yields `Ok(false)`
    /// with nothing written. `customer_id` is recorded as given; its
    /// existence is not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be persisted. The reserved room
    /// is released again before the error is returned, so capacity never
    /// leaks into bookings that were never recorded.
    pub fn create(&self, customer_id: u64, facility_id: u64) -> CoreResult<bool> {
        let _guard = self.lock.lock();

        if !self.facilities.reserve(facility_id)? {
            return Ok(false);
        }

        let mut documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        let id = match self.ids.allocate_booking_id() {
            Ok(id) => id,
            Err(err) => {
                self.undo_reserve(facility_id);
                return Err(err);
            }
        };

        let booking = Booking {
            id,
            customer_id,
            facility_id,
            created_at: self.clock.now_string(),
        };

        documents.push(booking.to_document());
        if let Err(err) = collection::save(self.backend.as_ref(), COLLECTION, &documents) {
            self.undo_reserve(facility_id);
            return Err(err);
        }

        Ok(true)
    }

    /// Cancels the booking with the given id.
    ///
    /// On the first match the booked facility's room is released, the
    /// booking is removed, and the reduced collection is persisted. An
    /// unknown id yields `Ok(false)` and no capacity change. Malformed
    /// documents encountered during the scan are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be persisted.
    pub fn cancel(&self, booking_id: u64) -> CoreResult<bool> {
        let _guard = self.lock.lock();
        let mut documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        let mut target = None;
        for (index, document) in documents.iter().enumerate() {
            let Some(booking) = decode_or_warn(document) else {
                continue;
            };
            if booking.id == booking_id {
                target = Some((index, booking.facility_id));
                break;
            }
        }

        let Some((index, facility_id)) = target else {
            return Ok(false);
        };

        self.facilities.release(facility_id)?;
        documents.remove(index);

        if let Err(err) = collection::save(self.backend.as_ref(), COLLECTION, &documents) {
            error!("booking {booking_id} removal failed after capacity release; stores disagree: {err}");
            return Err(err);
        }

        Ok(true)
    }

    /// Returns all well-formed bookings, in store order.
    ///
    /// Malformed documents are logged and skipped; an unreadable or
    /// corrupted store degrades to an empty list.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the ledger operations
    /// uniform for callers.
    pub fn list_valid(&self) -> CoreResult<Vec<Booking>> {
        let _guard = self.lock.lock();
        let documents = collection::load_or_empty(self.backend.as_ref(), COLLECTION);

        Ok(documents.iter().filter_map(decode_or_warn).collect())
    }

    /// Returns the reserved room when the booking itself could not be
    /// persisted, keeping the capacity invariant intact.
    fn undo_reserve(&self, facility_id: u64) {
        if let Err(err) = self.facilities.release(facility_id) {
            error!("failed to release facility {facility_id} after booking failure: {err}");
        }
    }
}

fn decode_or_warn(document: &Value) -> Option<Booking> {
    let booking = Booking::from_document(document);
    if booking.is_none() {
        warn!("skipping malformed booking document: {document}");
    }
    booking
}
