//! File-based implementation of the rental repositories

use std::fs;
use std::path::{Path, PathBuf};

use rental_domain::{
    Customer, CustomerRepository, Loaded, RentalRecord, RentalRecordRepository, Vehicle,
    VehicleRepository,
};
use rental_types::{Error, Result};

use super::append_log::AppendLog;
use super::line_codec;

pub const VEHICLES_FILE: &str = "vehicles.txt";
pub const CUSTOMERS_FILE: &str = "customers.txt";
pub const RENTAL_RECORDS_FILE: &str = "rental_records.txt";

/// Three append-only logs in one data directory
#[derive(Debug, Clone)]
pub struct FileRentalStorage {
    data_dir: PathBuf,
    vehicles: AppendLog,
    customers: AppendLog,
    records: AppendLog,
}

impl FileRentalStorage {
    /// Open storage in `data_dir`, creating the directory if needed
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self::at(data_dir))
    }

    /// Point at `data_dir` without touching the filesystem
    pub fn at(data_dir: PathBuf) -> Self {
        Self {
            vehicles: AppendLog::new(data_dir.join(VEHICLES_FILE)),
            customers: AppendLog::new(data_dir.join(CUSTOMERS_FILE)),
            records: AppendLog::new(data_dir.join(RENTAL_RECORDS_FILE)),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl VehicleRepository for FileRentalStorage {
    fn append_vehicle(&self, vehicle: &Vehicle) -> std::result::Result<(), Error> {
        self.vehicles.append(line_codec::vehicle_fields(vehicle))
    }

    fn load_vehicles(&self) -> std::result::Result<Loaded<Vehicle>, Error> {
        self.vehicles.load(line_codec::parse_vehicle)
    }
}

impl CustomerRepository for FileRentalStorage {
    fn append_customer(&self, customer: &Customer) -> std::result::Result<(), Error> {
        self.customers.append(line_codec::customer_fields(customer))
    }

    fn load_customers(&self) -> std::result::Result<Loaded<Customer>, Error> {
        self.customers.load(line_codec::parse_customer)
    }
}

impl RentalRecordRepository for FileRentalStorage {
    fn append_record(&self, record: &RentalRecord) -> std::result::Result<(), Error> {
        self.records.append(line_codec::record_fields(record))
    }

    fn load_records(&self) -> std::result::Result<Loaded<RentalRecord>, Error> {
        self.records.load(line_codec::parse_record)
    }
}
