//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rental_domain::{VehicleKind, VehicleStatus};
use rental_types::OutputFormat;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rental-tracker")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Vehicle rental tracker with flat-file history")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding vehicles.txt, customers.txt and rental_records.txt.
    /// Uses config value if not specified.
    #[arg(long, short = 'd', global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Vehicle type as given on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VehicleType {
    Car,
    Minibus,
    PickupTruck,
}

/// Status filter for the vehicle listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Available,
    Rented,
}

impl From<StatusFilter> for VehicleStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Available => VehicleStatus::Available,
            StatusFilter::Rented => VehicleStatus::Rented,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a vehicle
    AddVehicle {
        /// Vehicle type
        #[arg(value_enum)]
        kind: VehicleType,

        /// License plate (unique, case-insensitive)
        plate: String,

        make: String,

        model: String,

        year: i32,

        /// Number of seats (car)
        #[arg(long, default_value = "0")]
        seats: u32,

        /// Wheelchair accessible (minibus)
        #[arg(long)]
        accessible: bool,

        /// Cargo bed size in cubic metres (pickup truck)
        #[arg(long, default_value = "0")]
        cargo_size: f64,

        /// Has a trailer (pickup truck)
        #[arg(long)]
        has_trailer: bool,
    },

    /// Register a customer
    AddCustomer {
        /// Customer ID (unique)
        #[arg(allow_negative_numbers = true)]
        id: i32,

        name: String,
    },

    /// Rent an available vehicle to a customer
    Rent {
        /// License plate
        plate: String,

        /// Customer ID
        #[arg(allow_negative_numbers = true)]
        customer: i32,

        /// Rental amount
        #[arg(long, short = 'a')]
        amount: Decimal,

        /// Rental date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Return a rented vehicle
    Return {
        /// License plate
        plate: String,

        /// Customer ID
        #[arg(allow_negative_numbers = true)]
        customer: i32,

        /// Extra fees charged on return
        #[arg(long, default_value = "0")]
        fees: Decimal,

        /// Return date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List vehicles
    Vehicles {
        /// Show only vehicles with this status
        #[arg(long, short = 's')]
        status: Option<StatusFilter>,
    },

    /// List customers
    Customers,

    /// Show rental history
    History,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

impl VehicleType {
    /// Build the vehicle kind, taking only the options that apply to this type
    pub fn into_kind(self, seats: u32, accessible: bool, cargo_size: f64, has_trailer: bool) -> VehicleKind {
        match self {
            VehicleType::Car => VehicleKind::Car { seats },
            VehicleType::Minibus => VehicleKind::Minibus { accessible },
            VehicleType::PickupTruck => VehicleKind::PickupTruck {
                cargo_size,
                has_trailer,
            },
        }
    }
}
