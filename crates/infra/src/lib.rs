//! `parklot-infra` — storage boundaries and the parking orchestrator.
//!
//! The domain crates stay pure; this crate owns the two collaborator
//! interfaces ([`SpotStore`], [`TicketStore`]), their in-memory and Postgres
//! implementations, and the [`ParkingService`] that drives a vehicle's entry
//! and exit against them.

pub mod parking_service;
pub mod spot_store;
pub mod ticket_store;

pub use parking_service::{EntryReceipt, ExitReceipt, ParkingError, ParkingService};
pub use spot_store::{InMemorySpotStore, SpotStore, SpotStoreError};
pub use ticket_store::{InMemoryTicketStore, TicketStore, TicketStoreError};

#[cfg(feature = "postgres")]
pub use spot_store::PostgresSpotStore;
#[cfg(feature = "postgres")]
pub use ticket_store::PostgresTicketStore;

#[cfg(test)]
mod integration_tests;
