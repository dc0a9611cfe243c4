//! LodgeDB CLI
//!
//! Command-line front end for a LodgeDB database directory.
//!
//! # Commands
//!
//! - `add-facility` - Register a lodging facility
//! - `add-customer` - Register a customer
//! - `list` - Print a collection
//! - `book` - Book a room for a customer
//! - `cancel` - Cancel a booking

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// LodgeDB command-line booking tools.
#[derive(Parser)]
#[command(name = "lodgedb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database directory
    #[arg(global = true, short, long, default_value = "./lodgedb_data")]
    data_dir: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a lodging facility
    AddFacility {
        /// Facility display name
        #[arg(short, long)]
        name: String,

        /// Total room count
        #[arg(short, long)]
        capacity: u32,
    },

    /// Register a customer
    AddCustomer {
        /// Customer display name
        #[arg(short, long)]
        name: String,

        /// Contact details
        #[arg(short, long, default_value = "")]
        contact: String,
    },

    /// Print a collection
    List {
        /// Collection to print (facilities, customers, bookings)
        collection: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Book a room for a customer
    Book {
        /// Customer id
        #[arg(short, long)]
        customer: u64,

        /// Facility id
        #[arg(short, long)]
        facility: u64,
    },

    /// Cancel a booking
    Cancel {
        /// Booking id
        #[arg(short, long)]
        booking: u64,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::AddFacility { name, capacity } => {
            commands::add_facility::run(&cli.data_dir, &name, capacity)?;
        }
        Commands::AddCustomer { name, contact } => {
            commands::add_customer::run(&cli.data_dir, &name, &contact)?;
        }
        Commands::List { collection, format } => {
            commands::list::run(&cli.data_dir, &collection, &format)?;
        }
        Commands::Book { customer, facility } => {
            commands::book::run(&cli.data_dir, customer, facility)?;
        }
        Commands::Cancel { booking } => {
            commands::cancel::run(&cli.data_dir, booking)?;
        }
        Commands::Version => {
            println!("LodgeDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("LodgeDB Core v{}", lodgedb_core::VERSION);
        }
    }

    Ok(())
}
