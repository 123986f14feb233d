//! Strongly-typed identifiers used across the domain.
//!
//! Spots and tickets are keyed by small integers (spot numbers come from the
//! physical lot layout, ticket ids are assigned serially by the store), so
//! these are `i32` newtypes rather than UUIDs.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a parking spot (the spot's number in the lot).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(i32);

/// Identifier of a parking ticket (assigned by the ticket store on save).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(i32);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> i32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i32> for $t {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let n: i32 = s
                    .parse()
                    .map_err(|e| DomainError::validation(format!("{}: {}", $name, e)))?;
                Ok(Self(n))
            }
        }
    };
}

impl_int_newtype!(SpotId, "SpotId");
impl_int_newtype!(TicketId, "TicketId");

impl TicketId {
    /// Placeholder id carried by a ticket before the store assigns one.
    pub const UNASSIGNED: TicketId = TicketId(0);
}
