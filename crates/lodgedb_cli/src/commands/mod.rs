//! CLI command implementations.

pub mod add_customer;
pub mod add_facility;
pub mod book;
pub mod cancel;
pub mod list;
