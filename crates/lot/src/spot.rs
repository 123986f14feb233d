use serde::{Deserialize, Serialize};

use parklot_core::{Entity, SpotId, VehicleType};

/// A single parking location, typed by vehicle class, either free or occupied.
///
/// Identity is the `id` alone: equality and hashing ignore `vehicle_type`
/// and `available`. A spot whose availability flips is still the same spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub vehicle_type: VehicleType,
    pub available: bool,
}

impl ParkingSpot {
    pub fn new(id: SpotId, vehicle_type: VehicleType, available: bool) -> Self {
        Self {
            id,
            vehicle_type,
            available,
        }
    }
}

impl PartialEq for ParkingSpot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParkingSpot {}

impl core::hash::Hash for ParkingSpot {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Entity for ParkingSpot {
    type Id = SpotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
