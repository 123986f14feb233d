use std::sync::Arc;

use thiserror::Error;

use parklot_core::TicketId;
use parklot_lot::Ticket;

/// Ticket store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketStoreError {
    /// The ticket id does not exist in the backing store.
    #[error("unknown ticket: {0}")]
    UnknownTicket(TicketId),

    /// The backing store could not be read or updated.
    #[error("ticket store backend failure: {0}")]
    Backend(String),
}

/// The lot's ticket table.
///
/// A registration number may have many tickets over time but at most one
/// open one at any moment; that is a caller-enforced invariant the store
/// does not check. `get_open_ticket` with two open tickets for the same
/// vehicle is therefore undefined beyond "returns the most recently opened".
pub trait TicketStore: Send + Sync {
    /// Persist a new open ticket; the store assigns and returns its id.
    fn save(&self, ticket: Ticket) -> Result<TicketId, TicketStoreError>;

    /// Most recently opened (highest id) ticket without an out time for the
    /// registration number, or `None`.
    fn get_open_ticket(&self, reg_number: &str) -> Result<Option<Ticket>, TicketStoreError>;

    /// Persist the mutated fields (`out_time`, `price`) of an existing
    /// ticket. Failure must leave the stored ticket untouched.
    fn update(&self, ticket: &Ticket) -> Result<(), TicketStoreError>;

    /// Number of previously *closed* tickets for the registration number;
    /// the loyalty signal.
    fn count_completed(&self, reg_number: &str) -> Result<u64, TicketStoreError>;
}

impl<T> TicketStore for Arc<T>
where
    T: TicketStore + ?Sized,
{
    fn save(&self, ticket: Ticket) -> Result<TicketId, TicketStoreError> {
        (**self).save(ticket)
    }

    fn get_open_ticket(&self, reg_number: &str) -> Result<Option<Ticket>, TicketStoreError> {
        (**self).get_open_ticket(reg_number)
    }

    fn update(&self, ticket: &Ticket) -> Result<(), TicketStoreError> {
        (**self).update(ticket)
    }

    fn count_completed(&self, reg_number: &str) -> Result<u64, TicketStoreError> {
        (**self).count_completed(reg_number)
    }
}
