use std::sync::Arc;

use thiserror::Error;

use parklot_core::{SpotId, VehicleType};

/// Spot store operation error.
///
/// Infrastructure failures only; "no free spot" is not an error here, it is
/// the `None` case of [`SpotStore::find_next_available`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpotStoreError {
    /// The spot id no longer exists in the backing store.
    #[error("unknown spot: {0}")]
    UnknownSpot(SpotId),

    /// The backing store could not be read or updated.
    #[error("spot store backend failure: {0}")]
    Backend(String),
}

/// The lot's spot table.
///
/// ## Allocation semantics
///
/// `find_next_available` is a pure read: it returns the lowest-numbered free
/// spot of the requested class (deterministic tie-break) and mutates
/// nothing. Occupying the spot is a separate `set_availability` call, and
/// **no transactional guarantee spans the two**: two callers interleaving
/// entry events can observe the same spot as free. Deployments that process
/// entries concurrently must serialize the pair externally.
///
/// `set_availability` reports failure (unknown spot, backend error) instead
/// of assuming success; callers must check it.
pub trait SpotStore: Send + Sync {
    /// Lowest-numbered available spot of the given class, or `None` if the
    /// lot is full for that class. Does not mutate state.
    fn find_next_available(&self, vehicle_type: VehicleType)
    -> Result<Option<SpotId>, SpotStoreError>;

    /// Mark a spot occupied (`false`) or free (`true`).
    fn set_availability(&self, spot_id: SpotId, available: bool) -> Result<(), SpotStoreError>;
}

impl<S> SpotStore for Arc<S>
where
    S: SpotStore + ?Sized,
{
    fn find_next_available(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, SpotStoreError> {
        (**self).find_next_available(vehicle_type)
    }

    fn set_availability(&self, spot_id: SpotId, available: bool) -> Result<(), SpotStoreError> {
        (**self).set_availability(spot_id, available)
    }
}
