//! A single parking space.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vehicle::Vehicle;

/// Occupancy status of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Occupied,
}

/// A numbered parking space.
///
/// The slot is occupied exactly when it holds a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    number: usize,
    #[serde(default)]
    vip: bool,
    vehicle: Option<Vehicle>,
}

impl Slot {
    /// Creates a free, non-VIP slot.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            vip: false,
            vehicle: None,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn is_occupied(&self) -> bool {
        self.vehicle.is_some()
    }

    pub fn is_vip(&self) -> bool {
        self.vip
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn status(&self) -> SlotStatus {
        if self.is_occupied() {
            SlotStatus::Occupied
        } else {
            SlotStatus::Free
        }
    }

    /// Whether the parked vehicle has this plate (case-insensitive).
    pub fn is_occupied_by(&self, plate: &str) -> bool {
        self.vehicle
            .as_ref()
            .is_some_and(|v| v.plate().matches(plate))
    }

    /// Parks a vehicle. Returns false and leaves the slot untouched if it
    /// is already occupied.
    #[must_use]
    pub fn occupy(&mut self, vehicle: Vehicle) -> bool {
        if self.is_occupied() {
            return false;
        }
        self.vehicle = Some(vehicle);
        true
    }

    /// Frees the slot. No-op on a free slot.
    pub fn release(&mut self) -> Option<Vehicle> {
        self.vehicle.take()
    }

    /// Sets the informational VIP flag. VIP slots stay eligible for
    /// first-fit allocation.
    pub fn mark_vip(&mut self, vip: bool) {
        self.vip = vip;
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot {}", self.number)?;
        if self.vip {
            f.write_str(" [VIP]")?;
        }
        match &self.vehicle {
            Some(v) => write!(f, " [OCCUPIED] - {}", v.plate()),
            None => f.write_str(" [FREE]"),
        }
    }
}
