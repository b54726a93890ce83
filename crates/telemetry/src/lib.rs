//! Logging setup for the parking facility.
//!
//! The core crate only emits `tracing` events; this crate decides where
//! they go.

pub mod tracing_setup;

pub use tracing_setup::*;
