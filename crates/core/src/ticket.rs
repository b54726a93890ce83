//! Parking tickets and fee calculation.
//!
//! # Billing rule
//!
//! Every started hour is charged in full: the stay is measured in whole
//! minutes and rounded up to hours. A stay shorter than a minute still bills
//! one hour as long as any time elapsed at all. The hourly rate is scaled by
//! the vehicle type multiplier and then reduced by the discount percentage.

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result, StateErrorCode, ValidationErrorCode};
use crate::limits::{MAX_DISCOUNT_PERCENT, MINUTES_PER_HOUR};
use crate::vehicle::Vehicle;

/// Timestamp format used in human-readable ticket lines.
const DISPLAY_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Sequential ticket number, starting at 1.
pub type TicketId = u64;

/// A parking ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    vehicle: Vehicle,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
    #[serde(default)]
    discount_percent: f64,
    amount_due: Option<f64>,
}

impl Ticket {
    /// Opens a ticket at `entry_time` with no discount.
    pub fn new(id: TicketId, vehicle: Vehicle, entry_time: DateTime<Utc>) -> Self {
        Self {
            id,
            vehicle,
            entry_time,
            exit_time: None,
            discount_percent: 0.0,
            amount_due: None,
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    pub fn exit_time(&self) -> Option<DateTime<Utc>> {
        self.exit_time
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    /// Last computed amount, absent until `calculate_amount` runs.
    pub fn amount_due(&self) -> Option<f64> {
        self.amount_due
    }

    /// A ticket is active while the vehicle has not left.
    pub fn is_active(&self) -> bool {
        self.exit_time.is_none()
    }

    /// Sets the discount, replacing any previous one.
    ///
    /// Applies before or after exit; it does not close the ticket. An amount
    /// already computed is not recalculated.
    pub fn apply_discount(&mut self, percent: f64) -> Result<()> {
        if !percent.is_finite() || !(0.0..=MAX_DISCOUNT_PERCENT).contains(&percent) {
            return Err(Error::validation(
                ValidationErrorCode::InvalidDiscount,
                format!("discount must be between 0 and 100, got {}", percent),
            ));
        }
        self.discount_percent = percent;
        Ok(())
    }

    /// Closes the ticket at `now`. A closed ticket keeps its exit time.
    pub fn register_exit(&mut self, now: DateTime<Utc>) -> Result<()> {
        if let Some(exit) = self.exit_time {
            return Err(Error::state(
                StateErrorCode::TicketAlreadyClosed,
                format!(
                    "ticket #{} already closed at {}",
                    self.id,
                    exit.format(DISPLAY_TIME_FORMAT)
                ),
            ));
        }
        self.exit_time = Some(now);
        Ok(())
    }

    /// Hours charged for the stay.
    pub fn hours_billed(&self) -> Result<u64> {
        let exit = self.require_exit()?;
        Ok(billable_hours(exit - self.entry_time))
    }

    /// Computes, stores and returns the amount due at `hourly_rate`.
    pub fn calculate_amount(&mut self, hourly_rate: f64) -> Result<f64> {
        let hours = self.hours_billed()?;
        let base = hours as f64 * hourly_rate * self.vehicle.vehicle_type().multiplier();
        let amount = base * (1.0 - self.discount_percent / 100.0);
        self.amount_due = Some(amount);
        Ok(amount)
    }

    /// Length of the stay: up to exit when closed, up to `now` when open.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.exit_time.unwrap_or(now) - self.entry_time
    }

    /// Stay length as `"{h}h {mm}m"`.
    pub fn format_duration(&self, now: DateTime<Utc>) -> String {
        let minutes = self.elapsed(now).num_minutes().max(0);
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }

    /// Single-line summary with timestamps shown at `offset`.
    pub fn describe(&self, offset: FixedOffset) -> String {
        let local = |t: DateTime<Utc>| t.with_timezone(&offset).format(DISPLAY_TIME_FORMAT);
        let exit = match self.exit_time {
            Some(exit) => local(exit).to_string(),
            None => "open".to_string(),
        };
        let amount = match self.amount_due {
            Some(amount) => format!("{:.2}", amount),
            None => "pending".to_string(),
        };
        format!(
            "Ticket #{} | {} | in: {} | out: {} | amount: {}",
            self.id,
            self.vehicle.plate(),
            local(self.entry_time),
            exit,
            amount
        )
    }

    fn require_exit(&self) -> Result<DateTime<Utc>> {
        self.exit_time.ok_or_else(|| {
            Error::state(
                StateErrorCode::ExitNotRegistered,
                format!("ticket #{} has no exit registered", self.id),
            )
        })
    }
}

/// Whole-hour count for a stay, rounding every started hour up.
fn billable_hours(elapsed: Duration) -> u64 {
    let minutes = elapsed.num_minutes().max(0) as u64;
    let hours = minutes.div_ceil(MINUTES_PER_HOUR);
    if hours == 0 && elapsed > Duration::zero() {
        return 1;
    }
    hours
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(Utc.fix()))
    }
}
