//! Parking facility operator tool.
//!
//! Loads the saved facility (or creates one from configuration), runs one
//! command and saves the state back when the command changed it.

mod commands;
mod settings;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use commands::Command;
use parking_core::{Facility, FacilitySnapshot, SystemClock};
use telemetry::init_tracing;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = settings::load_config()?;
    init_tracing(&config.log.clone().with_env_overrides())
        .context("Failed to initialize tracing")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("help" | "-h" | "--help")) {
        println!("{}", commands::USAGE);
        return Ok(());
    }
    let command = Command::parse(&args)?;

    let state_path = Path::new(&config.state_file);
    let (mut facility, is_new) = if state_path.exists() {
        (load_state(state_path)?, false)
    } else {
        info!(
            name = %config.facility.name,
            slots = config.facility.slot_count,
            hourly_rate = config.facility.hourly_rate,
            "No saved state, creating facility from configuration"
        );
        let facility = Facility::from_config(&config.facility, Arc::new(SystemClock))
            .context("Invalid facility configuration")?;
        (facility, true)
    };

    debug!(?command, "Running command");
    let outcome = command.run(&mut facility)?;
    println!("{}", outcome.output);

    if outcome.changed || is_new {
        save_state(state_path, &facility)?;
    }

    Ok(())
}

fn load_state(path: &Path) -> Result<Facility> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    let snapshot = FacilitySnapshot::from_json(&json)
        .with_context(|| format!("Corrupt state file {}", path.display()))?;
    let facility = Facility::restore(snapshot, Arc::new(SystemClock))
        .with_context(|| format!("Inconsistent state in {}", path.display()))?;

    debug!(path = %path.display(), tickets = facility.tickets().len(), "Loaded state");
    Ok(facility)
}

fn save_state(path: &Path, facility: &Facility) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let json = facility.snapshot().to_json()?;
    // Atomic replace.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;

    info!(path = %path.display(), "Saved state");
    Ok(())
}
