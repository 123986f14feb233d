use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parklot_core::{DomainError, DomainResult, Entity, TicketId};

use crate::spot::ParkingSpot;

/// The record of one parking stay for one vehicle, from entry to exit.
///
/// Created open (`out_time = None`, `price = 0`), closed exactly once on
/// exit, never deleted: closed tickets remain as loyalty history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    /// Snapshot of the assigned spot, valid at check-in time.
    pub spot: ParkingSpot,
    pub vehicle_reg_number: String,
    pub price: f64,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Open a new ticket for a vehicle checking in.
    ///
    /// The id is assigned later, when the ticket store persists it.
    pub fn open(spot: ParkingSpot, vehicle_reg_number: impl Into<String>, in_time: DateTime<Utc>) -> Self {
        Self {
            id: TicketId::UNASSIGNED,
            spot,
            vehicle_reg_number: vehicle_reg_number.into(),
            price: 0.0,
            in_time,
            out_time: None,
        }
    }

    /// The vehicle is currently parked on this ticket.
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    /// Record the exit: set `out_time` and the computed price together.
    ///
    /// `out_time` must not precede `in_time`; that is a hard error, never
    /// silently clamped.
    pub fn close(&mut self, out_time: DateTime<Utc>, price: f64) -> DomainResult<()> {
        if out_time < self.in_time {
            return Err(DomainError::invariant(format!(
                "out time {out_time} precedes in time {}",
                self.in_time
            )));
        }
        self.out_time = Some(out_time);
        self.price = price;
        Ok(())
    }
}

impl Entity for Ticket {
    type Id = TicketId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use parklot_core::{SpotId, VehicleType};

    fn test_spot() -> ParkingSpot {
        ParkingSpot::new(SpotId::new(1), VehicleType::Car, false)
    }

    #[test]
    fn open_ticket_has_no_out_time_and_zero_price() {
        let now = Utc::now();
        let ticket = Ticket::open(test_spot(), "ABCDEF", now);

        assert!(ticket.is_open());
        assert_eq!(ticket.vehicle_reg_number, "ABCDEF");
        assert_eq!(ticket.price, 0.0);
        assert_eq!(ticket.in_time, now);
        assert_eq!(ticket.id, TicketId::UNASSIGNED);
    }

    #[test]
    fn close_sets_out_time_and_price_together() {
        let now = Utc::now();
        let mut ticket = Ticket::open(test_spot(), "ABCDEF", now);

        ticket.close(now + Duration::hours(1), 1.5).unwrap();

        assert!(!ticket.is_open());
        assert_eq!(ticket.out_time, Some(now + Duration::hours(1)));
        assert_eq!(ticket.price, 1.5);
    }

    #[test]
    fn close_rejects_out_time_before_in_time() {
        let now = Utc::now();
        let mut ticket = Ticket::open(test_spot(), "ABCDEF", now);

        let err = ticket.close(now - Duration::minutes(1), 1.5).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(ticket.is_open());
        assert_eq!(ticket.price, 0.0);
    }
}
