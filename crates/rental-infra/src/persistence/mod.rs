//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod append_log;
mod file_rental_storage;
pub mod line_codec;

pub use append_log::AppendLog;
pub use file_rental_storage::{
    FileRentalStorage, CUSTOMERS_FILE, RENTAL_RECORDS_FILE, VEHICLES_FILE,
};
