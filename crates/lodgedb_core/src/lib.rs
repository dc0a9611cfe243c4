//! # LodgeDB Core
//!
//! Core booking engine for LodgeDB.
//!
//! This crate provides:
//! - Typed facility, customer, and booking records over JSON stores
//! - A facility registry enforcing the capacity invariant
//! - A booking ledger coupling bookings to capacity changes
//! - Persisted monotonic id allocation via the manifest
//! - Database directory handling with single-writer locking
//!
//! ## Capacity invariant
//!
//! For every facility, `0 <= available_capacity <= total_capacity` holds
//! after any operation completes. `reserve`/`release` are the only
//! mutations of available capacity, each one runs under its collection's
//! lock, and release clamps at the facility's total.
//!
//! ## Failure policy
//!
//! Reads fail soft: corrupted or unreadable stores are logged and
//! treated as empty, and malformed individual records are logged and
//! skipped without aborting the enclosing operation. Writes fail loud:
//! a store that cannot be persisted surfaces as an `Err` to the caller.
//! Business outcomes (full facility, unknown id) are `Ok(false)`, not
//! errors.
//!
//! ## Example
//!
//! ```rust
//! use lodgedb_core::Database;
//!
//! let db = Database::open_in_memory().unwrap();
//!
//! let facility = db.facilities().create("Hotel Azul", 5).unwrap();
//! let customer = db.customers().create("Ana", "ana@example.com").unwrap();
//!
//! assert!(db.bookings().create(customer.id, facility.id).unwrap());
//! let facilities = db.facilities().list_valid().unwrap();
//! assert_eq!(facilities[0].available_capacity, 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod booking;
mod clock;
mod collection;
mod config;
mod customer;
mod database;
mod dir;
mod error;
mod facility;
mod manifest;
mod record;

pub use booking::BookingLedger;
pub use clock::{Clock, SystemClock, TIMESTAMP_FORMAT};
pub use config::Config;
pub use customer::CustomerRegistry;
pub use database::Database;
pub use error::{CoreError, CoreResult};
pub use facility::FacilityRegistry;
pub use manifest::{Manifest, MANIFEST_VERSION};
pub use record::{Booking, Customer, Facility};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
