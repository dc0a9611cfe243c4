//! Book command implementation.

use lodgedb_core::Database;
use std::path::Path;

/// Runs the book command.
///
/// A full or unknown facility is an ordinary outcome, reported on stdout
/// with a zero exit status.
pub fn run(
    data_dir: &Path,
    customer_id: u64,
    facility_id: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(data_dir)?;

    if db.bookings().create(customer_id, facility_id)? {
        match db.bookings().list_valid()?.last() {
            Some(booking) => println!(
                "Booking [{}] confirmed: customer {} at facility {}",
                booking.id, customer_id, facility_id
            ),
            None => println!("Booking confirmed: customer {customer_id} at facility {facility_id}"),
        }
    } else {
        println!("No rooms available at facility {facility_id}");
    }

    Ok(())
}
