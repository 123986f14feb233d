use std::collections::BTreeMap;
use std::sync::RwLock;

use parklot_core::{SpotId, VehicleType};
use parklot_lot::ParkingSpot;

use super::r#trait::{SpotStore, SpotStoreError};

/// In-memory spot table.
///
/// Intended for tests/dev. Spots are keyed in a `BTreeMap` so the
/// lowest-id-first allocation order falls out of iteration order.
#[derive(Debug, Default)]
pub struct InMemorySpotStore {
    spots: RwLock<BTreeMap<SpotId, ParkingSpot>>,
}

impl InMemorySpotStore {
    pub fn new(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        Self {
            spots: RwLock::new(spots.into_iter().map(|s| (s.id, s)).collect()),
        }
    }

    /// Provision a lot with `cars` car spots numbered from 1, followed by
    /// `bikes` bike spots. All spots start available.
    pub fn with_layout(cars: i32, bikes: i32) -> Self {
        let car_spots = (1..=cars).map(|n| ParkingSpot::new(SpotId::new(n), VehicleType::Car, true));
        let bike_spots = (cars + 1..=cars + bikes)
            .map(|n| ParkingSpot::new(SpotId::new(n), VehicleType::Bike, true));
        Self::new(car_spots.chain(bike_spots))
    }

    /// Availability of a single spot (test observability).
    pub fn is_available(&self, spot_id: SpotId) -> Option<bool> {
        self.spots
            .read()
            .ok()?
            .get(&spot_id)
            .map(|s| s.available)
    }
}

impl SpotStore for InMemorySpotStore {
    fn find_next_available(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, SpotStoreError> {
        let spots = self
            .spots
            .read()
            .map_err(|_| SpotStoreError::Backend("lock poisoned".to_string()))?;

        Ok(spots
            .values()
            .find(|s| s.vehicle_type == vehicle_type && s.available)
            .map(|s| s.id))
    }

    fn set_availability(&self, spot_id: SpotId, available: bool) -> Result<(), SpotStoreError> {
        let mut spots = self
            .spots
            .write()
            .map_err(|_| SpotStoreError::Backend("lock poisoned".to_string()))?;

        let spot = spots
            .get_mut(&spot_id)
            .ok_or(SpotStoreError::UnknownSpot(spot_id))?;
        spot.available = available;
        Ok(())
    }
}
