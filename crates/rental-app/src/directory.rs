//! In-memory rental directory mirrored to append-only logs
//!
//! The directory is the source of truth for the running process. Every
//! accepted mutation is appended to storage; a failed append is logged and
//! kept in a failure list but never undoes the in-memory change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use rental_domain::service::replay_statuses;
use rental_domain::{
    Customer, Loaded, RecordKind, RentalRecord, RentalStorage, Vehicle, VehicleStatus,
};
use rental_types::{EntityKind, Error, RentalError};

/// Whether a persistence failure happened while writing or reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOperation {
    Save,
    Load,
}

/// An I/O failure that was swallowed instead of failing the operation
#[derive(Debug)]
pub struct PersistenceFailure {
    pub entity: EntityKind,
    pub operation: PersistOperation,
    pub error: Error,
}

impl std::fmt::Display for PersistenceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self.operation {
            PersistOperation::Save => "saving",
            PersistOperation::Load => "loading",
        };
        write!(f, "Error {} {}: {}", action, self.entity, self.error)
    }
}

/// What happened while replaying the logs at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub vehicles: usize,
    pub customers: usize,
    pub records: usize,
    /// Malformed lines, plus vehicle/customer lines repeating a known key
    pub skipped_lines: usize,
    /// Records naming a plate or customer id that was not loaded
    pub dropped_records: usize,
}

/// A history record together with the entities it refers to
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry<'a> {
    pub record: &'a RentalRecord,
    pub vehicle: &'a Vehicle,
    pub customer: &'a Customer,
}

/// Vehicles, customers and rental history
pub struct RentalDirectory<S> {
    storage: S,
    vehicles: Vec<Vehicle>,
    customers: Vec<Customer>,
    history: Vec<RentalRecord>,
    failures: Vec<PersistenceFailure>,
    load_report: LoadReport,
}

impl<S: RentalStorage> RentalDirectory<S> {
    /// Build a directory by replaying vehicles, customers and records from storage, in that order
    pub fn open(storage: S) -> Self {
        let mut directory = Self {
            storage,
            vehicles: Vec::new(),
            customers: Vec::new(),
            history: Vec::new(),
            failures: Vec::new(),
            load_report: LoadReport::default(),
        };
        directory.load();
        directory
    }

    fn load(&mut self) {
        let vehicles = self.storage.load_vehicles();
        let vehicles = self.loaded_or_empty(EntityKind::Vehicle, vehicles);
        self.load_report.skipped_lines += vehicles.skipped;
        for vehicle in vehicles.items {
            if self.find_vehicle_by_plate(&vehicle.license_plate).is_some() {
                debug!(plate = %vehicle.license_plate, "skipping duplicate vehicle line");
                self.load_report.skipped_lines += 1;
                continue;
            }
            self.vehicles.push(vehicle);
        }

        let customers = self.storage.load_customers();
        let customers = self.loaded_or_empty(EntityKind::Customer, customers);
        self.load_report.skipped_lines += customers.skipped;
        for customer in customers.items {
            if self.find_customer_by_id(customer.id).is_some() {
                debug!(id = customer.id, "skipping duplicate customer line");
                self.load_report.skipped_lines += 1;
                continue;
            }
            self.customers.push(customer);
        }

        let records = self.storage.load_records();
        let records = self.loaded_or_empty(EntityKind::RentalRecord, records);
        self.load_report.skipped_lines += records.skipped;
        for mut record in records.items {
            let plate = self
                .find_vehicle_by_plate(&record.license_plate)
                .map(|v| v.license_plate.clone());
            let known_customer = self.find_customer_by_id(record.customer_id).is_some();

            match plate {
                Some(plate) if known_customer => {
                    record.license_plate = plate;
                    self.history.push(record);
                }
                _ => {
                    debug!(
                        plate = %record.license_plate,
                        customer_id = record.customer_id,
                        "dropping record for unknown vehicle or customer"
                    );
                    self.load_report.dropped_records += 1;
                }
            }
        }

        replay_statuses(&mut self.vehicles, &self.history);

        self.load_report.vehicles = self.vehicles.len();
        self.load_report.customers = self.customers.len();
        self.load_report.records = self.history.len();
        info!(
            vehicles = self.load_report.vehicles,
            customers = self.load_report.customers,
            records = self.load_report.records,
            skipped = self.load_report.skipped_lines,
            dropped = self.load_report.dropped_records,
            "rental data loaded"
        );
    }

    fn loaded_or_empty<T>(
        &mut self,
        entity: EntityKind,
        result: Result<Loaded<T>, Error>,
    ) -> Loaded<T> {
        match result {
            Ok(loaded) => loaded,
            Err(error) => {
                self.record_failure(entity, PersistOperation::Load, error);
                Loaded::default()
            }
        }
    }

    fn record_failure(&mut self, entity: EntityKind, operation: PersistOperation, error: Error) {
        let failure = PersistenceFailure {
            entity,
            operation,
            error,
        };
        warn!("{}", failure);
        self.failures.push(failure);
    }

    /// Register a vehicle. Rejected if the plate is already taken (case-insensitive).
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<(), RentalError> {
        if self.find_vehicle_by_plate(&vehicle.license_plate).is_some() {
            let err = RentalError::DuplicatePlate(vehicle.license_plate);
            warn!("{}", err);
            return Err(err);
        }

        if let Err(error) = self.storage.append_vehicle(&vehicle) {
            self.record_failure(EntityKind::Vehicle, PersistOperation::Save, error);
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Register a customer. Rejected if the id is already taken.
    pub fn add_customer(&mut self, customer: Customer) -> Result<(), RentalError> {
        if self.find_customer_by_id(customer.id).is_some() {
            let err = RentalError::DuplicateCustomer(customer.id);
            warn!("{}", err);
            return Err(err);
        }

        if let Err(error) = self.storage.append_customer(&customer) {
            self.record_failure(EntityKind::Customer, PersistOperation::Save, error);
        }
        self.customers.push(customer);
        Ok(())
    }

    /// Rent an Available vehicle to a customer
    pub fn rent_vehicle(
        &mut self,
        plate: &str,
        customer_id: i32,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<&RentalRecord, RentalError> {
        self.transact(RecordKind::Rent, plate, customer_id, date, amount)
    }

    /// Take back a Rented vehicle, charging `extra_fees`
    pub fn return_vehicle(
        &mut self,
        plate: &str,
        customer_id: i32,
        date: NaiveDate,
        extra_fees: Decimal,
    ) -> Result<&RentalRecord, RentalError> {
        self.transact(RecordKind::Return, plate, customer_id, date, extra_fees)
    }

    fn transact(
        &mut self,
        kind: RecordKind,
        plate: &str,
        customer_id: i32,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<&RentalRecord, RentalError> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.matches_plate(plate))
            .ok_or_else(|| RentalError::UnknownVehicle(plate.to_string()))?;
        let customer_name = self
            .find_customer_by_id(customer_id)
            .map(|c| c.name.clone())
            .ok_or(RentalError::UnknownCustomer(customer_id))?;

        let vehicle = &mut self.vehicles[index];
        if vehicle.status != kind.required_status() {
            let err = match kind {
                RecordKind::Rent => RentalError::VehicleNotAvailable(vehicle.license_plate.clone()),
                RecordKind::Return => RentalError::VehicleNotRented(vehicle.license_plate.clone()),
            };
            warn!("{}", err);
            return Err(err);
        }

        vehicle.status = kind.resulting_status();
        let record = RentalRecord::new(kind, vehicle.license_plate.clone(), customer_id, date, amount);
        match kind {
            RecordKind::Rent => info!("Vehicle {} rented to {}", record.license_plate, customer_name),
            RecordKind::Return => info!("Vehicle {} returned by {}", record.license_plate, customer_name),
        }

        if let Err(error) = self.storage.append_record(&record) {
            self.record_failure(EntityKind::RentalRecord, PersistOperation::Save, error);
        }
        let position = self.history.len();
        self.history.push(record);
        Ok(&self.history[position])
    }

    /// Find vehicle by license plate, ignoring case
    pub fn find_vehicle_by_plate(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.matches_plate(plate))
    }

    pub fn find_customer_by_id(&self, id: i32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Vehicles in registration order, optionally only those with `status`
    pub fn vehicles(&self, status: Option<VehicleStatus>) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| status.map_or(true, |s| v.status == s))
            .collect()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Records in the order they happened
    pub fn history(&self) -> &[RentalRecord] {
        &self.history
    }

    /// Records resolved to their vehicle and customer
    pub fn history_entries(&self) -> Vec<HistoryEntry<'_>> {
        self.history
            .iter()
            .filter_map(|record| {
                Some(HistoryEntry {
                    record,
                    vehicle: self.find_vehicle_by_plate(&record.license_plate)?,
                    customer: self.find_customer_by_id(record.customer_id)?,
                })
            })
            .collect()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Failures not yet taken
    pub fn persistence_failures(&self) -> &[PersistenceFailure] {
        &self.failures
    }

    /// Drain the failures recorded so far
    pub fn take_persistence_failures(&mut self) -> Vec<PersistenceFailure> {
        std::mem::take(&mut self.failures)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_domain::{CustomerRepository, RentalRecordRepository, VehicleKind, VehicleRepository};
    use std::cell::RefCell;
    use std::io;

    /// Storage double: keeps appended entities in memory, or fails on demand
    #[derive(Default)]
    struct MemoryStorage {
        vehicles: RefCell<Vec<Vehicle>>,
        customers: RefCell<Vec<Customer>>,
        records: RefCell<Vec<RentalRecord>>,
        fail_saves: bool,
        fail_loads: bool,
    }

    fn io_error(op: &str) -> Error {
        Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, op.to_string()))
    }

    impl VehicleRepository for MemoryStorage {
        fn append_vehicle(&self, vehicle: &Vehicle) -> Result<(), Error> {
            if self.fail_saves {
                return Err(io_error("append vehicle"));
            }
            self.vehicles.borrow_mut().push(vehicle.clone());
            Ok(())
        }

        fn load_vehicles(&self) -> Result<Loaded<Vehicle>, Error> {
            if self.fail_loads {
                return Err(io_error("load vehicles"));
            }
            Ok(Loaded {
                items: self.vehicles.borrow().clone(),
                skipped: 0,
            })
        }
    }

    impl CustomerRepository for MemoryStorage {
        fn append_customer(&self, customer: &Customer) -> Result<(), Error> {
            if self.fail_saves {
                return Err(io_error("append customer"));
            }
            self.customers.borrow_mut().push(customer.clone());
            Ok(())
        }

        fn load_customers(&self) -> Result<Loaded<Customer>, Error> {
            if self.fail_loads {
                return Err(io_error("load customers"));
            }
            Ok(Loaded {
                items: self.customers.borrow().clone(),
                skipped: 0,
            })
        }
    }

    impl RentalRecordRepository for MemoryStorage {
        fn append_record(&self, record: &RentalRecord) -> Result<(), Error> {
            if self.fail_saves {
                return Err(io_error("append record"));
            }
            self.records.borrow_mut().push(record.clone());
            Ok(())
        }

        fn load_records(&self) -> Result<Loaded<RentalRecord>, Error> {
            if self.fail_loads {
                return Err(io_error("load records"));
            }
            Ok(Loaded {
                items: self.records.borrow().clone(),
                skipped: 0,
            })
        }
    }

    fn car(plate: &str) -> Vehicle {
        Vehicle::new(VehicleKind::Car { seats: 5 }, plate, "Toyota", "Corolla", 2020)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn directory() -> RentalDirectory<MemoryStorage> {
        let mut directory = RentalDirectory::open(MemoryStorage::default());
        directory.add_vehicle(car("ABC123")).unwrap();
        directory.add_customer(Customer::new(1, "Alice")).unwrap();
        directory
    }

    #[test]
    fn test_duplicate_plate_rejected_case_insensitive() {
        let mut directory = directory();
        let err = directory.add_vehicle(car("abc123")).unwrap_err();
        assert_eq!(err, RentalError::DuplicatePlate("abc123".to_string()));
        assert_eq!(directory.vehicles(None).len(), 1);
        assert_eq!(directory.storage().vehicles.borrow().len(), 1);
    }

    #[test]
    fn test_duplicate_customer_rejected() {
        let mut directory = directory();
        let err = directory.add_customer(Customer::new(1, "Bob")).unwrap_err();
        assert_eq!(err, RentalError::DuplicateCustomer(1));
        assert_eq!(directory.customers().len(), 1);
        assert_eq!(directory.find_customer_by_id(1).unwrap().name, "Alice");
    }

    #[test]
    fn test_rent_then_rent_again() {
        let mut directory = directory();
        let record = directory
            .rent_vehicle("ABC123", 1, date(5), Decimal::new(5000, 2))
            .unwrap();
        assert_eq!(record.kind, RecordKind::Rent);
        assert_eq!(record.amount, Decimal::new(5000, 2));
        assert_eq!(
            directory.find_vehicle_by_plate("ABC123").unwrap().status,
            VehicleStatus::Rented
        );
        assert_eq!(directory.history().len(), 1);

        let err = directory
            .rent_vehicle("ABC123", 1, date(6), Decimal::new(5000, 2))
            .unwrap_err();
        assert_eq!(err, RentalError::VehicleNotAvailable("ABC123".to_string()));
        assert_eq!(directory.history().len(), 1);
        assert_eq!(directory.storage().records.borrow().len(), 1);
    }

    #[test]
    fn test_return_requires_rented() {
        let mut directory = directory();
        let err = directory
            .return_vehicle("ABC123", 1, date(5), Decimal::ZERO)
            .unwrap_err();
        assert_eq!(err, RentalError::VehicleNotRented("ABC123".to_string()));
        assert!(directory.history().is_empty());

        directory
            .rent_vehicle("ABC123", 1, date(5), Decimal::new(50, 0))
            .unwrap();
        let record = directory
            .return_vehicle("abc123", 1, date(9), Decimal::new(1250, 2))
            .unwrap();
        assert_eq!(record.kind, RecordKind::Return);
        assert_eq!(record.license_plate, "ABC123");
        assert_eq!(record.amount, Decimal::new(1250, 2));
        assert_eq!(
            directory.find_vehicle_by_plate("ABC123").unwrap().status,
            VehicleStatus::Available
        );
        assert_eq!(directory.history().len(), 2);
    }

    #[test]
    fn test_unknown_vehicle_or_customer() {
        let mut directory = directory();
        assert_eq!(
            directory
                .rent_vehicle("NOPE", 1, date(5), Decimal::ZERO)
                .unwrap_err(),
            RentalError::UnknownVehicle("NOPE".to_string())
        );
        assert_eq!(
            directory
                .rent_vehicle("ABC123", 42, date(5), Decimal::ZERO)
                .unwrap_err(),
            RentalError::UnknownCustomer(42)
        );
        assert_eq!(
            directory.find_vehicle_by_plate("ABC123").unwrap().status,
            VehicleStatus::Available
        );
        assert!(directory.history().is_empty());
    }

    #[test]
    fn test_status_filter() {
        let mut directory = directory();
        directory.add_vehicle(car("XYZ789")).unwrap();
        directory
            .rent_vehicle("XYZ789", 1, date(5), Decimal::ZERO)
            .unwrap();

        let rented: Vec<_> = directory
            .vehicles(Some(VehicleStatus::Rented))
            .iter()
            .map(|v| v.license_plate.as_str())
            .collect();
        let available: Vec<_> = directory
            .vehicles(Some(VehicleStatus::Available))
            .iter()
            .map(|v| v.license_plate.as_str())
            .collect();
        assert_eq!(rented, vec!["XYZ789"]);
        assert_eq!(available, vec!["ABC123"]);
        assert_eq!(directory.vehicles(None).len(), 2);
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut directory = RentalDirectory::open(MemoryStorage {
            fail_saves: true,
            ..Default::default()
        });

        assert!(directory.add_vehicle(car("ABC123")).is_ok());
        assert!(directory.add_customer(Customer::new(1, "Alice")).is_ok());
        assert!(directory
            .rent_vehicle("ABC123", 1, date(5), Decimal::ZERO)
            .is_ok());

        assert_eq!(directory.vehicles(None).len(), 1);
        assert_eq!(directory.customers().len(), 1);
        assert_eq!(directory.history().len(), 1);

        let failures = directory.take_persistence_failures();
        let entities: Vec<_> = failures.iter().map(|f| f.entity).collect();
        assert_eq!(
            entities,
            vec![EntityKind::Vehicle, EntityKind::Customer, EntityKind::RentalRecord]
        );
        assert!(failures.iter().all(|f| f.operation == PersistOperation::Save));
        assert!(directory.persistence_failures().is_empty());
    }

    #[test]
    fn test_load_failure_gives_empty_directory() {
        let directory = RentalDirectory::open(MemoryStorage {
            fail_loads: true,
            ..Default::default()
        });
        assert!(directory.vehicles(None).is_empty());
        assert_eq!(directory.persistence_failures().len(), 3);
        assert!(directory
            .persistence_failures()
            .iter()
            .all(|f| f.operation == PersistOperation::Load));
        assert!(directory.persistence_failures()[0]
            .to_string()
            .starts_with("Error loading vehicle"));
    }

    #[test]
    fn test_reopen_replays_history() {
        let mut directory = directory();
        directory.add_vehicle(car("XYZ789")).unwrap();
        directory
            .rent_vehicle("ABC123", 1, date(5), Decimal::new(5000, 2))
            .unwrap();

        let reopened = RentalDirectory::open(directory.storage);
        assert_eq!(reopened.history().len(), 1);
        assert_eq!(
            reopened.find_vehicle_by_plate("ABC123").unwrap().status,
            VehicleStatus::Rented
        );
        assert_eq!(
            reopened.find_vehicle_by_plate("XYZ789").unwrap().status,
            VehicleStatus::Available
        );

        let entries = reopened.history_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].customer.name, "Alice");
        assert_eq!(entries[0].vehicle.license_plate, "ABC123");
    }

    #[test]
    fn test_load_drops_dangling_and_duplicate_lines() {
        let storage = MemoryStorage::default();
        storage.vehicles.borrow_mut().push(car("ABC123"));
        storage.vehicles.borrow_mut().push(car("abc123"));
        storage.customers.borrow_mut().push(Customer::new(1, "Alice"));
        storage.records.borrow_mut().push(RentalRecord::new(
            RecordKind::Rent,
            "ZZZ999",
            1,
            date(5),
            Decimal::new(5000, 2),
        ));
        storage.records.borrow_mut().push(RentalRecord::new(
            RecordKind::Rent,
            "abc123",
            1,
            date(6),
            Decimal::new(5000, 2),
        ));

        let directory = RentalDirectory::open(storage);
        assert_eq!(
            directory.load_report(),
            &LoadReport {
                vehicles: 1,
                customers: 1,
                records: 1,
                skipped_lines: 1,
                dropped_records: 1,
            }
        );
        // Resolved records carry the registered spelling of the plate
        assert_eq!(directory.history()[0].license_plate, "ABC123");
    }
}
