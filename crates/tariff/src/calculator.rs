use chrono::{DateTime, Utc};

use parklot_core::{DomainError, DomainResult, VehicleType};

use crate::rates;

/// Compute the fare for a parking stay.
///
/// Duration is the elapsed time in fractional hours, never rounded. Stays
/// under the free-parking threshold cost nothing regardless of class or
/// discount; otherwise the price is `duration * rate(class)`, reduced by 5%
/// when `discount` is set. The result is whatever f64 arithmetic yields;
/// callers that need a display value can pass it through [`truncate`].
///
/// A missing `out_time`, or one earlier than `in_time`, is a validation
/// error: the operation aborts with no partial result.
pub fn fare(
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
    vehicle_type: VehicleType,
    discount: bool,
) -> DomainResult<f64> {
    let out_time = out_time
        .ok_or_else(|| DomainError::validation("out time is not set"))?;
    if out_time < in_time {
        return Err(DomainError::validation(format!(
            "out time provided is incorrect: {out_time}"
        )));
    }

    let duration_hours = (out_time - in_time).num_milliseconds() as f64 / 3_600_000.0;
    if duration_hours < rates::FREE_PARKING_THRESHOLD_HOURS {
        return Ok(0.0);
    }

    let mut price = duration_hours * rates::rate_per_hour(vehicle_type);
    if discount {
        price -= rates::LOYALTY_DISCOUNT_RATE * price;
    }

    Ok(price)
}

/// Truncate `value` to the given number of decimals (no rounding).
///
/// Pure display helper; the fare itself is never truncated.
pub fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).trunc() / factor
}
