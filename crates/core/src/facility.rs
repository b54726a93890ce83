//! The facility: slot allocation and ticket lifecycle.
//!
//! A vehicle is either absent or parked. Parked means exactly one active
//! ticket and one occupied slot for its plate. The facility is the only
//! place that moves a vehicle between those states.
//!
//! Expected business outcomes (lot full, already parked, not found) are
//! returned as `None` / `false`. Only malformed input and lifecycle
//! violations are errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::limits::{MAX_SLOTS, MIN_SLOTS};
use crate::slot::Slot;
use crate::ticket::{Ticket, TicketId};
use crate::vehicle::{Plate, Vehicle};

/// Facility parameters as loaded from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FacilityConfig {
    /// Display name
    #[serde(default = "default_name")]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Number of slots, fixed for the facility's lifetime
    #[serde(default = "default_slot_count")]
    #[validate(range(min = 1, max = 100))]
    pub slot_count: usize,
    /// Price of one started hour for a car
    #[serde(default = "default_hourly_rate")]
    #[validate(range(min = 0.0))]
    pub hourly_rate: f64,
}

fn default_name() -> String {
    "Main Lot".to_string()
}

fn default_slot_count() -> usize {
    20
}

fn default_hourly_rate() -> f64 {
    10.0
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            slot_count: default_slot_count(),
            hourly_rate: default_hourly_rate(),
        }
    }
}

/// A single parking facility.
#[derive(Debug)]
pub struct Facility {
    pub(crate) name: String,
    pub(crate) slots: Vec<Slot>,
    pub(crate) tickets: Vec<Ticket>,
    pub(crate) hourly_rate: f64,
    pub(crate) next_ticket_id: TicketId,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Facility {
    /// Creates a facility on the system clock.
    pub fn new(name: &str, slot_count: usize, hourly_rate: f64) -> Result<Self> {
        Self::with_clock(name, slot_count, hourly_rate, Arc::new(SystemClock))
    }

    /// Creates a facility that reads time from `clock`.
    pub fn with_clock(
        name: &str,
        slot_count: usize,
        hourly_rate: f64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        validate_parameters(name, slot_count, hourly_rate)?;

        Ok(Self {
            name: name.to_string(),
            slots: (1..=slot_count).map(Slot::new).collect(),
            tickets: Vec::new(),
            hourly_rate,
            next_ticket_id: 1,
            clock,
        })
    }

    /// Creates a facility from loaded configuration.
    pub fn from_config(config: &FacilityConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::invalid_facility(format!("{}", e)))?;
        Self::with_clock(&config.name, config.slot_count, config.hourly_rate, clock)
    }

    // ========================================================================
    // Entry / exit
    // ========================================================================

    /// Parks a vehicle in the first free slot and opens a ticket.
    ///
    /// Returns `None` when the plate is already parked or the lot is full.
    pub fn register_entry(&mut self, vehicle: Vehicle) -> Option<&Ticket> {
        if self.active_ticket_index(vehicle.plate().as_str()).is_some() {
            info!(plate = %vehicle.plate(), "Vehicle already parked");
            return None;
        }

        let Some(slot) = self.slots.iter_mut().find(|s| !s.is_occupied()) else {
            info!(plate = %vehicle.plate(), "Facility full");
            return None;
        };

        if !slot.occupy(vehicle.clone()) {
            return None;
        }
        let slot_number = slot.number();

        let id = self.next_ticket_id;
        self.next_ticket_id += 1;
        let ticket = Ticket::new(id, vehicle, self.clock.now());

        debug!(
            ticket_id = id,
            plate = %ticket.vehicle().plate(),
            slot = slot_number,
            "Registered entry"
        );

        self.tickets.push(ticket);
        self.tickets.last()
    }

    /// Closes the active ticket for `plate`, bills it at the current rate
    /// and frees the slot.
    ///
    /// Returns `Ok(None)` when no active ticket matches.
    pub fn register_exit(&mut self, plate: &str) -> Result<Option<&Ticket>> {
        if plate.trim().is_empty() {
            return Ok(None);
        }

        let Some(index) = self.active_ticket_index(plate) else {
            info!(plate = %Plate::normalize(plate), "No active ticket for plate");
            return Ok(None);
        };

        let now = self.clock.now();
        let rate = self.hourly_rate;
        let ticket = &mut self.tickets[index];
        ticket.register_exit(now)?;
        let amount = ticket.calculate_amount(rate)?;

        match self.slots.iter_mut().find(|s| s.is_occupied_by(plate)) {
            Some(slot) => {
                slot.release();
            }
            None => {
                warn!(
                    plate = %Plate::normalize(plate),
                    "Exit registered but no slot held the plate"
                );
            }
        }

        let ticket = &self.tickets[index];
        debug!(
            ticket_id = ticket.id(),
            plate = %ticket.vehicle().plate(),
            amount,
            "Registered exit"
        );
        Ok(Some(ticket))
    }

    /// Applies a discount to the active ticket for `plate`.
    ///
    /// Returns `Ok(false)` when no active ticket matches.
    pub fn apply_discount(&mut self, plate: &str, percent: f64) -> Result<bool> {
        let Some(index) = self.active_ticket_index(plate) else {
            return Ok(false);
        };
        self.tickets[index].apply_discount(percent)?;
        debug!(ticket_id = self.tickets[index].id(), percent, "Applied discount");
        Ok(true)
    }

    /// Flags slot `number` as VIP. Returns false for an unknown number.
    pub fn mark_slot_vip(&mut self, number: usize) -> bool {
        if number < 1 || number > self.slots.len() {
            return false;
        }
        self.slots[number - 1].mark_vip(true);
        true
    }

    /// Changes the hourly rate. Applies to every exit billed afterwards.
    pub fn set_hourly_rate(&mut self, rate: f64) -> Result<()> {
        validate_rate(rate)?;
        self.hourly_rate = rate;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Ticket history in issue order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn next_ticket_id(&self) -> TicketId {
        self.next_ticket_id
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_occupied()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.len() - self.free_count()
    }

    pub fn vip_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_vip()).count()
    }

    pub fn vip_free_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.is_vip() && !s.is_occupied())
            .count()
    }

    /// The slot the next entry would take.
    pub fn first_free_slot(&self) -> Option<&Slot> {
        self.slots.iter().find(|s| !s.is_occupied())
    }

    /// The open ticket for `plate`, if the vehicle is parked.
    pub fn active_ticket(&self, plate: &str) -> Option<&Ticket> {
        self.active_ticket_index(plate).map(|i| &self.tickets[i])
    }

    /// The vehicle parked under `plate`.
    pub fn find_vehicle(&self, plate: &str) -> Option<&Vehicle> {
        self.slots
            .iter()
            .find(|s| s.is_occupied_by(plate))
            .and_then(Slot::vehicle)
    }

    /// Parked vehicles with their slot numbers, in slot order.
    pub fn parked_vehicles(&self) -> impl Iterator<Item = (usize, &Vehicle)> {
        self.slots
            .iter()
            .filter_map(|s| s.vehicle().map(|v| (s.number(), v)))
    }

    /// Tickets whose local entry date falls within `start..=end`.
    pub fn tickets_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Ticket> {
        let offset = self.clock.offset();
        self.tickets
            .iter()
            .filter(|t| {
                let date = t.entry_time().with_timezone(&offset).date_naive();
                date >= start && date <= end
            })
            .collect()
    }

    /// The last `n` tickets, newest first.
    pub fn recent_tickets(&self, n: usize) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().rev().take(n)
    }

    /// Sum of computed amounts. Tickets not yet billed count as zero.
    pub fn total_revenue(&self) -> f64 {
        self.tickets.iter().filter_map(Ticket::amount_due).sum()
    }

    fn active_ticket_index(&self, plate: &str) -> Option<usize> {
        self.tickets
            .iter()
            .position(|t| t.is_active() && t.vehicle().plate().matches(plate))
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Facility '{}' - slots: {} (free: {}, occupied: {}) - rate/h: {:.2}",
            self.name,
            self.slots.len(),
            self.free_count(),
            self.occupied_count(),
            self.hourly_rate
        )
    }
}

pub(crate) fn validate_parameters(name: &str, slot_count: usize, hourly_rate: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_facility("facility name is required"));
    }
    if !(MIN_SLOTS..=MAX_SLOTS).contains(&slot_count) {
        return Err(Error::invalid_facility(format!(
            "slot count must be between {} and {}, got {}",
            MIN_SLOTS, MAX_SLOTS, slot_count
        )));
    }
    validate_rate(hourly_rate)
}

fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(Error::invalid_facility(format!(
            "hourly rate must be a non-negative number, got {}",
            rate
        )));
    }
    Ok(())
}
