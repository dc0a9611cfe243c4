//! Add-customer command implementation.

use lodgedb_core::Database;
use std::path::Path;

/// Runs the add-customer command.
pub fn run(data_dir: &Path, name: &str, contact: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(data_dir)?;
    let customer = db.customers().create(name, contact)?;

    println!("Added customer [{}] {}", customer.id, customer.name);

    Ok(())
}
