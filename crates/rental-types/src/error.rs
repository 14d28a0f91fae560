//! Error types for rental-tracker

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Rejected directory operations. No state changes when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    #[error("A vehicle with license plate {0} already exists")]
    DuplicatePlate(String),

    #[error("A customer with ID {0} already exists")]
    DuplicateCustomer(i32),

    #[error("Vehicle {0} is not available for renting")]
    VehicleNotAvailable(String),

    #[error("Vehicle {0} is not rented")]
    VehicleNotRented(String),

    #[error("No vehicle with license plate {0}")]
    UnknownVehicle(String),

    #[error("No customer with ID {0}")]
    UnknownCustomer(i32),
}

/// A persisted line that cannot be turned back into an entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("Expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid integer in column {column}: {value}")]
    InvalidInteger { column: &'static str, value: String },

    #[error("Invalid amount: {0}")]
    InvalidDecimal(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown vehicle type: {0}")]
    UnknownVehicleType(String),

    #[error("Unknown record kind: {0}")]
    UnknownRecordKind(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Rental(#[from] RentalError),
}

pub type Result<T> = std::result::Result<T, Error>;
