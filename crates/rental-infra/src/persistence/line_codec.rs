//! Field layout of the three log files
//!
//! ```text
//! vehicles.txt        type,plate,make,model,year
//! customers.txt       id,name
//! rental_records.txt  kind,plate,customerId,isoDate,amount
//! ```
//!
//! Extra trailing fields are ignored so older and newer writers can share a file.

use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use rental_domain::{Customer, RecordKind, RentalRecord, Vehicle, VehicleKind};
use rental_types::LineError;

const VEHICLE_FIELDS: usize = 5;
const CUSTOMER_FIELDS: usize = 2;
const RECORD_FIELDS: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn vehicle_fields(vehicle: &Vehicle) -> [String; VEHICLE_FIELDS] {
    [
        vehicle.kind.type_name().to_string(),
        vehicle.license_plate.clone(),
        vehicle.make.clone(),
        vehicle.model.clone(),
        vehicle.year.to_string(),
    ]
}

pub fn customer_fields(customer: &Customer) -> [String; CUSTOMER_FIELDS] {
    [customer.id.to_string(), customer.name.clone()]
}

pub fn record_fields(record: &RentalRecord) -> [String; RECORD_FIELDS] {
    [
        record.kind.as_str().to_string(),
        record.license_plate.clone(),
        record.customer_id.to_string(),
        record.date.format(DATE_FORMAT).to_string(),
        format_amount(record.amount),
    ]
}

/// Amounts are written with at least two decimal places (`50.00`, `12.345`).
/// Extra digits are kept so a reload yields the same value.
pub fn format_amount(amount: Decimal) -> String {
    let mut scaled = amount;
    if scaled.scale() < 2 {
        scaled.rescale(2);
    }
    scaled.to_string()
}

/// Parse a vehicle line. The type payload is reset to its default.
pub fn parse_vehicle(record: &StringRecord) -> Result<Vehicle, LineError> {
    require_fields(record, VEHICLE_FIELDS)?;

    let type_name = field(record, 0);
    let kind = VehicleKind::from_type_name(type_name)
        .ok_or_else(|| LineError::UnknownVehicleType(type_name.to_string()))?;
    let year = parse_int::<i32>(field(record, 4), "year")?;

    Ok(Vehicle::new(
        kind,
        field(record, 1),
        field(record, 2),
        field(record, 3),
        year,
    ))
}

pub fn parse_customer(record: &StringRecord) -> Result<Customer, LineError> {
    require_fields(record, CUSTOMER_FIELDS)?;

    let id = parse_int::<i32>(field(record, 0), "id")?;
    Ok(Customer::new(id, field(record, 1)))
}

/// Parse a record line. Plate and customer id are not resolved here.
pub fn parse_record(record: &StringRecord) -> Result<RentalRecord, LineError> {
    require_fields(record, RECORD_FIELDS)?;

    let kind_name = field(record, 0);
    let kind = RecordKind::from_name(kind_name)
        .ok_or_else(|| LineError::UnknownRecordKind(kind_name.to_string()))?;
    let customer_id = parse_int::<i32>(field(record, 2), "customerId")?;
    let date = parse_date(field(record, 3))?;
    let amount = parse_amount(field(record, 4))?;

    Ok(RentalRecord::new(
        kind,
        field(record, 1),
        customer_id,
        date,
        amount,
    ))
}

fn require_fields(record: &StringRecord, expected: usize) -> Result<(), LineError> {
    if record.len() < expected {
        return Err(LineError::TooFewFields {
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn parse_int<T: FromStr>(s: &str, column: &'static str) -> Result<T, LineError> {
    s.trim().parse().map_err(|_| LineError::InvalidInteger {
        column,
        value: s.to_string(),
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, LineError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| LineError::InvalidDate(s.to_string()))
}

fn parse_amount(s: &str) -> Result<Decimal, LineError> {
    let trimmed = s.trim();
    // Older files may hold float renderings such as `1.0E7`
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LineError::InvalidDecimal(s.to_string()))
}
