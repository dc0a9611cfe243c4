//! # LodgeDB Testkit
//!
//! Test utilities for LodgeDB.
//!
//! This crate provides:
//! - Test fixtures and database helpers
//! - Property-based test generators using proptest
//! - Fault-injecting store backends for failure-path testing
//!
//! ## Usage
//!
//! ```rust
//! use lodgedb_testkit::prelude::*;
//!
//! let db = TestDatabase::memory();
//! let facility = db.facilities().create("Hotel Azul", 3).unwrap();
//! assert!(db.bookings().create(1, facility.id).unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
