//! List command implementation.

use lodgedb_core::{Booking, Customer, Database, Facility};
use serde_json::Value;
use std::path::Path;

/// Runs the list command.
///
/// `collection` selects one of `facilities`, `customers`, or `bookings`.
/// Malformed documents are skipped, matching every other read path.
pub fn run(
    data_dir: &Path,
    collection: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(data_dir)?;

    match collection {
        "facilities" => {
            let facilities = db.facilities().list_valid()?;
            match format {
                "json" => print_json(facilities.iter().map(Facility::to_document))?,
                _ => print_facilities(&facilities),
            }
        }
        "customers" => {
            let customers = db.customers().list_valid()?;
            match format {
                "json" => print_json(customers.iter().map(Customer::to_document))?,
                _ => print_customers(&customers),
            }
        }
        "bookings" => {
            let bookings = db.bookings().list_valid()?;
            match format {
                "json" => print_json(bookings.iter().map(Booking::to_document))?,
                _ => print_bookings(&bookings),
            }
        }
        other => {
            return Err(format!(
                "unknown collection {other:?} (expected facilities, customers, or bookings)"
            )
            .into());
        }
    }

    Ok(())
}

fn print_json(
    documents: impl Iterator<Item = Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents: Vec<Value> = documents.collect();
    println!("{}", serde_json::to_string_pretty(&documents)?);
    Ok(())
}

fn print_facilities(facilities: &[Facility]) {
    if facilities.is_empty() {
        println!("No facilities registered");
        return;
    }
    println!("Facilities:");
    for facility in facilities {
        println!(
            "  [{}] {} ({}/{} rooms available)",
            facility.id, facility.name, facility.available_capacity, facility.total_capacity
        );
    }
}

fn print_customers(customers: &[Customer]) {
    if customers.is_empty() {
        println!("No customers registered");
        return;
    }
    println!("Customers:");
    for customer in customers {
        if customer.contact.is_empty() {
            println!("  [{}] {}", customer.id, customer.name);
        } else {
            println!("  [{}] {} <{}>", customer.id, customer.name, customer.contact);
        }
    }
}

fn print_bookings(bookings: &[Booking]) {
    if bookings.is_empty() {
        println!("No bookings registered");
        return;
    }
    println!("Bookings:");
    for booking in bookings {
        println!(
            "  [{}] customer {} at facility {} since {}",
            booking.id, booking.customer_id, booking.facility_id, booking.created_at
        );
    }
}
