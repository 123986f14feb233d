//! Billing constants.

use parklot_core::VehicleType;

/// Hourly rate for cars.
pub const CAR_RATE_PER_HOUR: f64 = 1.5;

/// Hourly rate for bikes.
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;

/// Stays shorter than this many hours are billed zero.
pub const FREE_PARKING_THRESHOLD_HOURS: f64 = 0.5;

/// Flat reduction applied for returning vehicles.
pub const LOYALTY_DISCOUNT_RATE: f64 = 0.05;

/// Hourly rate for the given vehicle class.
pub fn rate_per_hour(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::Car => CAR_RATE_PER_HOUR,
        VehicleType::Bike => BIKE_RATE_PER_HOUR,
    }
}
