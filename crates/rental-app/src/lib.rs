//! Application service layer - rental directory, config, repository setup

pub mod config;
pub mod directory;
pub mod repository;

pub use directory::{HistoryEntry, LoadReport, PersistOperation, PersistenceFailure, RentalDirectory};
