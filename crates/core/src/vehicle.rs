//! Vehicle identity and plate validation.
//!
//! Accepted plates:
//! - Legacy `ABC1234`
//! - Mercosul `ABC1D23`
//!
//! Input is trimmed and uppercased before matching, so `abc1234` is stored
//! as `ABC1234`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::limits::{LEGACY_PLATE_PATTERN, MERCOSUL_PLATE_PATTERN};
use crate::vehicle_type::VehicleType;

static LEGACY_PLATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LEGACY_PLATE_PATTERN).expect("invalid legacy plate pattern"));

static MERCOSUL_PLATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MERCOSUL_PLATE_PATTERN).expect("invalid Mercosul plate pattern"));

/// Plate format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateFormat {
    Legacy,
    Mercosul,
}

/// A validated, uppercase license plate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    /// Parse and validate a plate.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            return Err(Error::invalid_plate("plate is required"));
        }

        if Self::detect_format(&normalized).is_none() {
            return Err(Error::invalid_plate(format!(
                "invalid plate '{}': use ABC1234 or ABC1D23",
                normalized
            )));
        }

        Ok(Self(normalized))
    }

    /// Trim and uppercase without validating. Used for lookups.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    fn detect_format(normalized: &str) -> Option<PlateFormat> {
        if LEGACY_PLATE_REGEX.is_match(normalized) {
            Some(PlateFormat::Legacy)
        } else if MERCOSUL_PLATE_REGEX.is_match(normalized) {
            Some(PlateFormat::Mercosul)
        } else {
            None
        }
    }

    pub fn format(&self) -> PlateFormat {
        // Construction guarantees a match.
        Self::detect_format(&self.0).unwrap_or(PlateFormat::Legacy)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against raw user input.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == Self::normalize(raw)
    }
}

impl TryFrom<String> for Plate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Plate> for String {
    fn from(plate: Plate) -> Self {
        plate.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vehicle as registered at the gate.
///
/// Identity is the plate: two vehicles with the same plate are equal even if
/// model, color or type differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    plate: Plate,
    model: String,
    color: String,
    #[serde(rename = "type")]
    vehicle_type: VehicleType,
}

impl Vehicle {
    /// Creates a vehicle, validating and normalizing the plate.
    pub fn new(
        plate: &str,
        model: impl Into<String>,
        color: impl Into<String>,
        vehicle_type: VehicleType,
    ) -> Result<Self> {
        Ok(Self {
            plate: Plate::parse(plate)?,
            model: model.into(),
            color: color.into(),
            vehicle_type,
        })
    }

    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.plate == other.plate
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.plate.hash(state);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.vehicle_type, self.plate, self.model, self.color
        )
    }
}
