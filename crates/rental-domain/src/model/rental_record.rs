//! Rental history entries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::vehicle::VehicleStatus;

/// Transaction type in the rental history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    Rent,
    Return,
}

impl RecordKind {
    /// Name used in the record log
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Rent => "RENT",
            RecordKind::Return => "RETURN",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("RENT") {
            Some(RecordKind::Rent)
        } else if name.eq_ignore_ascii_case("RETURN") {
            Some(RecordKind::Return)
        } else {
            None
        }
    }

    /// Status the vehicle must be in before this transaction
    pub fn required_status(&self) -> VehicleStatus {
        match self {
            RecordKind::Rent => VehicleStatus::Available,
            RecordKind::Return => VehicleStatus::Rented,
        }
    }

    /// Status the vehicle is in after this transaction
    pub fn resulting_status(&self) -> VehicleStatus {
        match self {
            RecordKind::Rent => VehicleStatus::Rented,
            RecordKind::Return => VehicleStatus::Available,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One rent or return transaction
///
/// Refers to its vehicle and customer by key; the directory owns both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub kind: RecordKind,
    pub license_plate: String,
    pub customer_id: i32,
    pub date: NaiveDate,
    /// Rental fee for RENT, extra fees for RETURN
    pub amount: Decimal,
}

impl RentalRecord {
    pub fn new(
        kind: RecordKind,
        license_plate: impl Into<String>,
        customer_id: i32,
        date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            kind,
            license_plate: license_plate.into(),
            customer_id,
            date,
            amount,
        }
    }
}
