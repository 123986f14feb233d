//! `parklot-tariff` — pure fare computation.
//!
//! No IO, no state: a parking interval, a vehicle class and a discount flag
//! go in, a price comes out.

pub mod calculator;
pub mod rates;

pub use calculator::{fare, truncate};
