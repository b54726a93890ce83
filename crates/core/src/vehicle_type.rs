//! Vehicle categories and their fee multipliers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Motorcycle,
    #[default]
    Car,
    Truck,
}

impl VehicleType {
    /// Every category, in report order.
    pub const ALL: [VehicleType; 3] = [Self::Motorcycle, Self::Car, Self::Truck];

    /// Fee multiplier applied to the hourly rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Motorcycle => 0.5,
            Self::Car => 1.0,
            Self::Truck => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motorcycle => "motorcycle",
            Self::Car => "car",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown vehicle category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "motorcycle" | "moto" => Ok(Self::Motorcycle),
            "car" => Ok(Self::Car),
            "truck" => Ok(Self::Truck),
            other => Err(UnknownVehicleType(other.to_string())),
        }
    }
}
