//! Serializable facility state.
//!
//! The snapshot is the persistence boundary: collaborators write it out and
//! read it back, and `Facility::restore` re-checks every invariant before
//! handing out a live facility. That includes the pairing of occupied slots
//! with active tickets.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::facility::{validate_parameters, Facility};
use crate::limits::MAX_DISCOUNT_PERCENT;
use crate::slot::Slot;
use crate::ticket::{Ticket, TicketId};

/// Complete facility state with raw timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitySnapshot {
    pub name: String,
    pub hourly_rate: f64,
    pub next_ticket_id: TicketId,
    pub slots: Vec<Slot>,
    pub tickets: Vec<Ticket>,
}

impl FacilitySnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn check(&self) -> Result<()> {
        validate_parameters(&self.name, self.slots.len(), self.hourly_rate)?;

        for (index, slot) in self.slots.iter().enumerate() {
            if slot.number() != index + 1 {
                return Err(Error::invalid_snapshot(format!(
                    "slot at position {} is numbered {}",
                    index + 1,
                    slot.number()
                )));
            }
        }

        let mut parked = HashSet::new();
        for slot in &self.slots {
            if let Some(vehicle) = slot.vehicle() {
                if !parked.insert(vehicle.plate().clone()) {
                    return Err(Error::invalid_snapshot(format!(
                        "plate {} occupies more than one slot",
                        vehicle.plate()
                    )));
                }
            }
        }

        let mut last_id = 0;
        let mut active = HashSet::new();
        for ticket in &self.tickets {
            if ticket.id() <= last_id {
                return Err(Error::invalid_snapshot(format!(
                    "ticket ids must increase, found #{} after #{}",
                    ticket.id(),
                    last_id
                )));
            }
            last_id = ticket.id();

            let discount = ticket.discount_percent();
            if !discount.is_finite() || !(0.0..=MAX_DISCOUNT_PERCENT).contains(&discount) {
                return Err(Error::invalid_snapshot(format!(
                    "ticket #{} has discount {} outside 0-100",
                    ticket.id(),
                    discount
                )));
            }

            if let Some(exit) = ticket.exit_time() {
                if exit < ticket.entry_time() {
                    return Err(Error::invalid_snapshot(format!(
                        "ticket #{} exits before it enters",
                        ticket.id()
                    )));
                }
            }

            if ticket.is_active() && !active.insert(ticket.vehicle().plate().clone()) {
                return Err(Error::invalid_snapshot(format!(
                    "plate {} has more than one active ticket",
                    ticket.vehicle().plate()
                )));
            }
        }

        // A parked plate has exactly one slot and one active ticket.
        if let Some(plate) = parked.difference(&active).next() {
            return Err(Error::invalid_snapshot(format!(
                "plate {} occupies a slot without an active ticket",
                plate
            )));
        }
        if let Some(plate) = active.difference(&parked).next() {
            return Err(Error::invalid_snapshot(format!(
                "plate {} has an active ticket but no slot",
                plate
            )));
        }

        if self.next_ticket_id <= last_id {
            return Err(Error::invalid_snapshot(format!(
                "next ticket id {} is not above last issued #{}",
                self.next_ticket_id, last_id
            )));
        }

        Ok(())
    }
}

impl Facility {
    /// Captures the full state.
    pub fn snapshot(&self) -> FacilitySnapshot {
        FacilitySnapshot {
            name: self.name.clone(),
            hourly_rate: self.hourly_rate,
            next_ticket_id: self.next_ticket_id,
            slots: self.slots.clone(),
            tickets: self.tickets.clone(),
        }
    }

    /// Rebuilds a facility from a snapshot after validating it.
    pub fn restore(snapshot: FacilitySnapshot, clock: Arc<dyn Clock>) -> Result<Self> {
        snapshot.check()?;

        Ok(Self {
            name: snapshot.name,
            slots: snapshot.slots,
            tickets: snapshot.tickets,
            hourly_rate: snapshot.hourly_rate,
            next_ticket_id: snapshot.next_ticket_id,
            clock,
        })
    }
}
