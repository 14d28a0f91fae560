//! Domain layer for the rental tracker
//!
//! Models, repository traits, and the history replay service.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{Customer, RecordKind, RentalRecord, Vehicle, VehicleKind, VehicleStatus};
pub use repository::{
    CustomerRepository, Loaded, RentalRecordRepository, RentalStorage, VehicleRepository,
};
