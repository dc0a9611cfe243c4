//! Cancel command implementation.

use lodgedb_core::Database;
use std::path::Path;

/// Runs the cancel command.
pub fn run(data_dir: &Path, booking_id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(data_dir)?;

    if db.bookings().cancel(booking_id)? {
        println!("Booking {booking_id} cancelled");
    } else {
        println!("No booking with id {booking_id}");
    }

    Ok(())
}
