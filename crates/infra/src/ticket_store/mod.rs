//! Ticket persistence boundary.
//!
//! Tickets are append-mostly: saved open on entry, updated exactly once on
//! exit, never deleted. Closed tickets double as the loyalty history.

pub mod in_memory;
pub mod r#trait;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryTicketStore;
pub use r#trait::{TicketStore, TicketStoreError};

#[cfg(feature = "postgres")]
pub use postgres::PostgresTicketStore;
