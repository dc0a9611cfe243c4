//! Add-facility command implementation.

use lodgedb_core::Database;
use std::path::Path;

/// Runs the add-facility command.
pub fn run(data_dir: &Path, name: &str, capacity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(data_dir)?;
    let facility = db.facilities().create(name, capacity)?;

    println!(
        "Added facility [{}] {} with {} rooms",
        facility.id, facility.name, facility.total_capacity
    );

    Ok(())
}
