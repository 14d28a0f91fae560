//! Repository adapters for persistence layer

use std::path::PathBuf;

use rental_infra::persistence::FileRentalStorage;
use rental_types::Result;

use crate::config::Config;
use crate::directory::RentalDirectory;

/// Open the file-backed directory in the configured data directory
pub fn open_directory(config: &Config) -> Result<RentalDirectory<FileRentalStorage>> {
    open_directory_at(config.data_dir())
}

/// Open the file-backed directory at a custom data directory
pub fn open_directory_at(data_dir: PathBuf) -> Result<RentalDirectory<FileRentalStorage>> {
    let storage = FileRentalStorage::open(data_dir)?;
    Ok(RentalDirectory::open(storage))
}
