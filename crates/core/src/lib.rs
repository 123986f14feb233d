//! `parklot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod vehicle;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{SpotId, TicketId};
pub use vehicle::VehicleType;
