//! Vehicle classes recognized by the lot.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Class of vehicle a spot can hold and a ticket is billed as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
}

impl VehicleType {
    /// Storage/wire spelling (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
        }
    }
}

impl core::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = DomainError;

    /// Case-insensitive; anything outside the closed set is rejected as an
    /// unknown parking type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(VehicleType::Car),
            "bike" => Ok(VehicleType::Bike),
            other => Err(DomainError::validation(format!(
                "unknown parking type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types_case_insensitively() {
        assert_eq!("car".parse::<VehicleType>().unwrap(), VehicleType::Car);
        assert_eq!("CAR".parse::<VehicleType>().unwrap(), VehicleType::Car);
        assert_eq!(" Bike ".parse::<VehicleType>().unwrap(), VehicleType::Bike);
    }

    #[test]
    fn rejects_unknown_type() {
        let err = "truck".parse::<VehicleType>().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("unknown parking type")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn display_matches_wire_spelling() {
        assert_eq!(VehicleType::Car.to_string(), "car");
        assert_eq!(VehicleType::Bike.to_string(), "bike");
    }
}
