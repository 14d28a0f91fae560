//! Repository trait definitions for data persistence
//!
//! Each entity type lives in its own append-only log. Loading returns every
//! line that parsed, and a count of the ones that did not.

use crate::model::{Customer, RentalRecord, Vehicle};
use rental_types::Error;

/// Result of reading one log from start to end
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// Entities in file order
    pub items: Vec<T>,
    /// Lines that were short or unparseable
    pub skipped: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}

/// Repository for registered vehicles
pub trait VehicleRepository {
    /// Append one vehicle to the log
    fn append_vehicle(&self, vehicle: &Vehicle) -> Result<(), Error>;

    /// Read every vehicle in the log
    fn load_vehicles(&self) -> Result<Loaded<Vehicle>, Error>;
}

/// Repository for registered customers
pub trait CustomerRepository {
    /// Append one customer to the log
    fn append_customer(&self, customer: &Customer) -> Result<(), Error>;

    /// Read every customer in the log
    fn load_customers(&self) -> Result<Loaded<Customer>, Error>;
}

/// Repository for rent/return transactions
pub trait RentalRecordRepository {
    /// Append one record to the log
    fn append_record(&self, record: &RentalRecord) -> Result<(), Error>;

    /// Read every record in the log, unresolved
    fn load_records(&self) -> Result<Loaded<RentalRecord>, Error>;
}

/// Storage backing a rental directory
pub trait RentalStorage: VehicleRepository + CustomerRepository + RentalRecordRepository {}

impl<T> RentalStorage for T where T: VehicleRepository + CustomerRepository + RentalRecordRepository {}
