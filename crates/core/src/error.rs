//! Unified error types for the parking core.
//!
//! Error codes:
//! - VALID_001-004: Validation errors (malformed input, never retried)
//! - STATE_001-002: Lifecycle errors (operation invoked in the wrong state)
//!
//! "Lot full" and "vehicle not found" are not errors. Facility operations
//! report them as `None` / `false`.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// VALID_001: Plate is empty or matches neither accepted format
    InvalidPlate,
    /// VALID_002: Discount outside 0-100
    InvalidDiscount,
    /// VALID_003: Facility name, slot count or hourly rate out of range
    InvalidFacility,
    /// VALID_004: Snapshot violates a facility invariant
    InvalidSnapshot,
}

impl ValidationErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPlate => "VALID_001",
            Self::InvalidDiscount => "VALID_002",
            Self::InvalidFacility => "VALID_003",
            Self::InvalidSnapshot => "VALID_004",
        }
    }
}

/// Ticket lifecycle error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateErrorCode {
    /// STATE_001: Amount requested before the exit was registered
    ExitNotRegistered,
    /// STATE_002: Exit registered on a ticket that is already closed
    TicketAlreadyClosed,
}

impl StateErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExitNotRegistered => "STATE_001",
            Self::TicketAlreadyClosed => "STATE_002",
        }
    }
}

/// Unified error type for the parking core.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input at a construction or mutation boundary.
    #[error("[{code}] {message}")]
    Validation { code: &'static str, message: String },

    /// Operation invoked in an invalid lifecycle state.
    #[error("[{code}] {message}")]
    State { code: &'static str, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error.
    pub fn validation(code: ValidationErrorCode, msg: impl Into<String>) -> Self {
        Self::Validation {
            code: code.code(),
            message: msg.into(),
        }
    }

    /// Create a lifecycle error.
    pub fn state(code: StateErrorCode, msg: impl Into<String>) -> Self {
        Self::State {
            code: code.code(),
            message: msg.into(),
        }
    }

    pub fn invalid_plate(msg: impl Into<String>) -> Self {
        Self::validation(ValidationErrorCode::InvalidPlate, msg)
    }

    pub fn invalid_facility(msg: impl Into<String>) -> Self {
        Self::validation(ValidationErrorCode::InvalidFacility, msg)
    }

    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::validation(ValidationErrorCode::InvalidSnapshot, msg)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Validation { code, .. } => Some(code),
            Self::State { code, .. } => Some(code),
            Self::Serialization(_) => None,
        }
    }
}
