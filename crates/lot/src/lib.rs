//! `parklot-lot` — parking domain model: spots and tickets.

pub mod spot;
pub mod ticket;

pub use spot::ParkingSpot;
pub use ticket::Ticket;
