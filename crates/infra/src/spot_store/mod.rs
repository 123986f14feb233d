//! Spot-allocation boundary.
//!
//! Abstracts how the lot's spot table is stored without making storage
//! assumptions: the orchestrator only ever asks for the next free spot of a
//! class and flips a spot's availability.

pub mod in_memory;
pub mod r#trait;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemorySpotStore;
pub use r#trait::{SpotStore, SpotStoreError};

#[cfg(feature = "postgres")]
pub use postgres::PostgresSpotStore;
