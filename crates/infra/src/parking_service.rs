//! Vehicle lifecycle orchestration.
//!
//! `ParkingService` coordinates the two collaborator stores and the tariff
//! for the two lifecycle events, "vehicle enters" and "vehicle exits". The
//! service is stateless between calls: everything it needs is fetched from
//! the injected stores each time, and nothing is cached across calls.
//!
//! ## Entry flow
//!
//! 1. Ask the spot store for the next free spot of the class; none means
//!    the lot is full and nothing is mutated.
//! 2. Mark the spot occupied.
//! 3. Save an open ticket carrying a snapshot of the spot.
//!
//! Steps 1 and 2 are two separate store calls with no transaction spanning
//! them. Two entry events processed concurrently can both observe the same
//! spot as free and double-book it; callers that process entries
//! concurrently must serialize allocation externally.
//!
//! ## Exit flow
//!
//! 1. Fetch the open ticket for the registration number.
//! 2. Price the stay (loyalty discount when at least one prior closed
//!    ticket exists).
//! 3. Persist the closed ticket; only then free the spot. If the update is
//!    rejected the spot stays occupied, since billing was never durably
//!    recorded.
//!
//! Every failure on these paths is folded into [`ParkingError`] and
//! reported to the caller; nothing here is fatal to the process.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use parklot_core::{DomainError, SpotId, TicketId, VehicleType};
use parklot_lot::{ParkingSpot, Ticket};

use crate::spot_store::{SpotStore, SpotStoreError};
use crate::ticket_store::{TicketStore, TicketStoreError};

/// Caller-visible failure of an entry or exit event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// No free spot of the requested class.
    #[error("no spot available for {0}")]
    LotFull(VehicleType),

    /// Exit requested for a vehicle with no open ticket.
    #[error("no active ticket for vehicle {0}")]
    NoActiveTicket(String),

    /// The ticket store rejected the exit-time update; the spot was left
    /// occupied.
    #[error("unable to update ticket information, error occurred")]
    TicketUpdateFailed,

    /// Malformed caller input or incoherent times.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Spot store infrastructure failure.
    #[error(transparent)]
    SpotStore(#[from] SpotStoreError),

    /// Ticket store infrastructure failure (outside the update step).
    #[error(transparent)]
    TicketStore(#[from] TicketStoreError),
}

impl From<DomainError> for ParkingError {
    fn from(value: DomainError) -> Self {
        // Domain errors reaching the orchestrator are input coherence
        // failures (bad times, bad class spelling).
        Self::Validation(value.to_string())
    }
}

/// What the caller gets back when a vehicle is admitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReceipt {
    pub ticket_id: TicketId,
    pub spot_id: SpotId,
    pub vehicle_type: VehicleType,
    pub in_time: DateTime<Utc>,
}

/// What the caller gets back when a vehicle leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReceipt {
    pub out_time: DateTime<Utc>,
    pub price: f64,
    pub discount_applied: bool,
}

/// Orchestrator for vehicle entry and exit.
///
/// Generic over the injected stores so tests run against the in-memory
/// implementations and deployments can swap in persistent ones without
/// touching this logic. No global state, no singletons: the stores are
/// constructor-injected.
#[derive(Debug)]
pub struct ParkingService<S, T> {
    spots: S,
    tickets: T,
}

impl<S, T> ParkingService<S, T> {
    pub fn new(spots: S, tickets: T) -> Self {
        Self { spots, tickets }
    }

    pub fn into_parts(self) -> (S, T) {
        (self.spots, self.tickets)
    }
}

impl<S, T> ParkingService<S, T>
where
    S: SpotStore,
    T: TicketStore,
{
    /// Admit a vehicle: reserve the next free spot of its class and open a
    /// ticket for it.
    ///
    /// `now` becomes the ticket's in time; the HTTP layer passes
    /// `Utc::now()`, tests pass fixed instants.
    #[instrument(skip(self, now))]
    pub fn process_incoming_vehicle(
        &self,
        vehicle_type: VehicleType,
        reg_number: &str,
        now: DateTime<Utc>,
    ) -> Result<EntryReceipt, ParkingError> {
        let reg_number = validated_reg_number(reg_number)?;

        let spot_id = self
            .spots
            .find_next_available(vehicle_type)?
            .ok_or(ParkingError::LotFull(vehicle_type))?;

        self.spots.set_availability(spot_id, false)?;

        let spot = ParkingSpot::new(spot_id, vehicle_type, false);
        let ticket_id = self.tickets.save(Ticket::open(spot, reg_number, now))?;

        tracing::info!(%spot_id, %ticket_id, reg_number, "vehicle admitted");

        Ok(EntryReceipt {
            ticket_id,
            spot_id,
            vehicle_type,
            in_time: now,
        })
    }

    /// Check a vehicle out: price the stay, close the ticket, free the spot.
    #[instrument(skip(self, now))]
    pub fn process_exiting_vehicle(
        &self,
        reg_number: &str,
        now: DateTime<Utc>,
    ) -> Result<ExitReceipt, ParkingError> {
        let reg_number = validated_reg_number(reg_number)?;

        let mut ticket = self
            .tickets
            .get_open_ticket(reg_number)?
            .ok_or_else(|| ParkingError::NoActiveTicket(reg_number.to_string()))?;

        let discount = self.tickets.count_completed(reg_number)? > 0;
        let price = parklot_tariff::fare(ticket.in_time, Some(now), ticket.spot.vehicle_type, discount)?;
        ticket.close(now, price)?;

        if let Err(error) = self.tickets.update(&ticket) {
            tracing::warn!(%error, ticket_id = %ticket.id, "ticket update rejected; spot left occupied");
            return Err(ParkingError::TicketUpdateFailed);
        }

        self.spots.set_availability(ticket.spot.id, true)?;

        tracing::info!(spot_id = %ticket.spot.id, price, discount, reg_number, "vehicle checked out");

        Ok(ExitReceipt {
            out_time: now,
            price,
            discount_applied: discount,
        })
    }
}

fn validated_reg_number(reg_number: &str) -> Result<&str, ParkingError> {
    let trimmed = reg_number.trim();
    if trimmed.is_empty() {
        return Err(ParkingError::Validation(
            "vehicle registration number must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
