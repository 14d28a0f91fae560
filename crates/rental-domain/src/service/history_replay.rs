//! Rebuild vehicle status from the rental history

use crate::model::{RentalRecord, Vehicle, VehicleStatus};

/// Set each vehicle's status from the last record that mentions it.
///
/// Vehicles with no history are left Available. Records are applied in
/// order, so the final transaction for a plate wins even when the log
/// contains two RENTs in a row.
pub fn replay_statuses(vehicles: &mut [Vehicle], records: &[RentalRecord]) {
    for vehicle in vehicles.iter_mut() {
        vehicle.status = VehicleStatus::Available;
    }

    for record in records {
        if let Some(vehicle) = vehicles
            .iter_mut()
            .find(|v| v.matches_plate(&record.license_plate))
        {
            vehicle.status = record.kind.resulting_status();
        }
    }
}
