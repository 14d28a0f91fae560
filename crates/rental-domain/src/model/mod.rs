//! Domain model types

pub mod customer;
pub mod rental_record;
pub mod vehicle;

pub use customer::Customer;
pub use rental_record::{RecordKind, RentalRecord};
pub use vehicle::{Vehicle, VehicleKind, VehicleStatus};
