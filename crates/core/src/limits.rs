//! Fixed limits and patterns for the parking core.
//!
//! The `#[validate]` derive on `FacilityConfig` needs literal values in its
//! attributes, so the slot bounds are duplicated there. Keep both in sync.

// === Facility Bounds ===

/// Smallest facility (slots).
pub const MIN_SLOTS: usize = 1;

/// Largest facility (slots).
pub const MAX_SLOTS: usize = 100;

// === Plates ===

/// Legacy plate: 3 letters + 4 digits (ABC1234).
pub const LEGACY_PLATE_PATTERN: &str = r"^[A-Z]{3}[0-9]{4}$";

/// Mercosul plate: 3 letters + digit + letter + 2 digits (ABC1D23).
pub const MERCOSUL_PLATE_PATTERN: &str = r"^[A-Z]{3}[0-9][A-Z][0-9]{2}$";

// === Billing ===

/// Billing granularity: every started hour is charged in full.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Upper bound for a discount percentage.
pub const MAX_DISCOUNT_PERCENT: f64 = 100.0;

// === Reporting ===

/// Number of tickets listed in the "most recent" section of a report.
pub const RECENT_TICKETS: usize = 5;
