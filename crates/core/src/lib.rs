//! Core domain for a single parking facility.
//!
//! Slot allocation, the ticket lifecycle and fee calculation live here.
//! Presentation, persistence and reporting collaborators call into
//! [`Facility`] and receive plain data back.

pub mod clock;
pub mod error;
pub mod facility;
pub mod limits;
pub mod report;
pub mod slot;
pub mod snapshot;
pub mod ticket;
pub mod vehicle;
pub mod vehicle_type;

pub use clock::*;
pub use error::{Error, Result};
pub use facility::*;
pub use report::*;
pub use slot::*;
pub use snapshot::*;
pub use ticket::*;
pub use vehicle::*;
pub use vehicle_type::*;
