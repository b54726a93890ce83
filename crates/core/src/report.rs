//! Read-only aggregates for report consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::facility::Facility;
use crate::limits::RECENT_TICKETS;
use crate::ticket::{Ticket, TicketId};
use crate::vehicle_type::VehicleType;

/// Ticket counts per vehicle category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleTypeCounts {
    pub motorcycle: usize,
    pub car: usize,
    pub truck: usize,
}

impl VehicleTypeCounts {
    pub fn get(&self, vehicle_type: VehicleType) -> usize {
        match vehicle_type {
            VehicleType::Motorcycle => self.motorcycle,
            VehicleType::Car => self.car,
            VehicleType::Truck => self.truck,
        }
    }

    fn record(&mut self, vehicle_type: VehicleType) {
        match vehicle_type {
            VehicleType::Motorcycle => self.motorcycle += 1,
            VehicleType::Car => self.car += 1,
            VehicleType::Truck => self.truck += 1,
        }
    }
}

/// Flattened ticket row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: TicketId,
    pub plate: String,
    pub vehicle_type: VehicleType,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub discount_percent: f64,
    pub amount_due: Option<f64>,
    pub active: bool,
}

impl From<&Ticket> for TicketSummary {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id(),
            plate: t.vehicle().plate().to_string(),
            vehicle_type: t.vehicle().vehicle_type(),
            entry_time: t.entry_time(),
            exit_time: t.exit_time(),
            discount_percent: t.discount_percent(),
            amount_due: t.amount_due(),
            active: t.is_active(),
        }
    }
}

/// Occupancy and revenue overview of a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityReport {
    pub name: String,
    pub hourly_rate: f64,
    pub total_slots: usize,
    pub free_slots: usize,
    pub occupied_slots: usize,
    pub vip_slots: usize,
    pub vip_free_slots: usize,
    pub tickets_issued: usize,
    pub open_tickets: usize,
    pub total_revenue: f64,
    /// Revenue divided by tickets issued; absent before the first ticket.
    pub average_amount: Option<f64>,
    pub tickets_by_type: VehicleTypeCounts,
    /// Newest first.
    pub recent_tickets: Vec<TicketSummary>,
}

impl Facility {
    /// Builds the occupancy and revenue overview.
    pub fn report(&self) -> FacilityReport {
        let tickets = self.tickets();
        let total_revenue = self.total_revenue();

        let mut tickets_by_type = VehicleTypeCounts::default();
        for ticket in tickets {
            tickets_by_type.record(ticket.vehicle().vehicle_type());
        }

        let average_amount = if tickets.is_empty() {
            None
        } else {
            Some(total_revenue / tickets.len() as f64)
        };

        FacilityReport {
            name: self.name().to_string(),
            hourly_rate: self.hourly_rate(),
            total_slots: self.slot_count(),
            free_slots: self.free_count(),
            occupied_slots: self.occupied_count(),
            vip_slots: self.vip_count(),
            vip_free_slots: self.vip_free_count(),
            tickets_issued: tickets.len(),
            open_tickets: tickets.iter().filter(|t| t.is_active()).count(),
            total_revenue,
            average_amount,
            tickets_by_type,
            recent_tickets: self
                .recent_tickets(RECENT_TICKETS)
                .map(TicketSummary::from)
                .collect(),
        }
    }
}
