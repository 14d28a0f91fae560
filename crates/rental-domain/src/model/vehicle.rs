//! Vehicle type definitions

use serde::{Deserialize, Serialize};

/// Rental status of a vehicle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::Available => f.pad("Available"),
            VehicleStatus::Rented => f.pad("Rented"),
        }
    }
}

/// Vehicle type with its type-specific attributes
///
/// Only the type name is persisted. A reloaded vehicle gets the
/// default payload for its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VehicleKind {
    Car {
        #[serde(default)]
        seats: u32,
    },
    Minibus {
        #[serde(default)]
        accessible: bool,
    },
    PickupTruck {
        /// Cargo bed size in cubic metres
        #[serde(default)]
        cargo_size: f64,
        #[serde(default)]
        has_trailer: bool,
    },
}

impl VehicleKind {
    /// Name used in the vehicle log (`Car`, `Minibus`, `PickupTruck`)
    pub fn type_name(&self) -> &'static str {
        match self {
            VehicleKind::Car { .. } => "Car",
            VehicleKind::Minibus { .. } => "Minibus",
            VehicleKind::PickupTruck { .. } => "PickupTruck",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car { .. } => "Car",
            VehicleKind::Minibus { .. } => "Minibus",
            VehicleKind::PickupTruck { .. } => "Pickup Truck",
        }
    }

    /// Build the default variant for a persisted type name (case-insensitive)
    pub fn from_type_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("Car") {
            Some(VehicleKind::Car { seats: 0 })
        } else if name.eq_ignore_ascii_case("Minibus") {
            Some(VehicleKind::Minibus { accessible: false })
        } else if name.eq_ignore_ascii_case("PickupTruck") {
            Some(VehicleKind::PickupTruck {
                cargo_size: 0.0,
                has_trailer: false,
            })
        } else {
            None
        }
    }
}

/// A vehicle in the rental catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// License plate, unique across the catalog (case-insensitive)
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(flatten)]
    pub kind: VehicleKind,
}

impl Vehicle {
    pub fn new(
        kind: VehicleKind,
        license_plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            license_plate: license_plate.into(),
            make: make.into(),
            model: model.into(),
            year,
            status: VehicleStatus::Available,
            kind,
        }
    }

    /// Case-insensitive plate comparison
    pub fn matches_plate(&self, plate: &str) -> bool {
        plates_equal(&self.license_plate, plate)
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

/// Compare two plates ignoring case
pub fn plates_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
