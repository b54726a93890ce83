//! One-shot operator commands.
//!
//! Each invocation runs a single command against the saved facility state.
//! Soft failures (lot full, plate not parked) are reported as messages, not
//! as errors.

use anyhow::{anyhow, bail, Context, Result};
use parking_core::{Facility, Vehicle, VehicleType};

pub const USAGE: &str = "\
usage: parking-facility [command]

commands:
  status                                  print the facility report as JSON (default)
  parked                                  list parked vehicles by slot
  enter <plate> <type> [model] [color]    register an entry (type: motorcycle|car|truck)
  exit <plate>                            register an exit and bill the ticket
  discount <plate> <percent>              set the discount on an active ticket
  vip <slot>                              mark a slot as VIP
  rate <value>                            change the hourly rate";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Status,
    Parked,
    Enter {
        plate: String,
        vehicle_type: VehicleType,
        model: String,
        color: String,
    },
    Exit {
        plate: String,
    },
    Discount {
        plate: String,
        percent: f64,
    },
    Vip {
        slot: usize,
    },
    Rate {
        value: f64,
    },
}

/// What a command produced.
#[derive(Debug)]
pub struct Outcome {
    /// Text for stdout
    pub output: String,
    /// Whether facility state changed and must be saved
    pub changed: bool,
}

impl Outcome {
    fn read(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            changed: false,
        }
    }

    fn changed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            changed: true,
        }
    }
}

impl Command {
    /// Parse arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut args = args.iter().map(String::as_str);
        let command = match args.next() {
            None | Some("status") => Self::Status,
            Some("parked") => Self::Parked,
            Some("enter") => {
                let plate = required(args.next(), "plate")?;
                let vehicle_type = required(args.next(), "type")?
                    .parse::<VehicleType>()
                    .context("Invalid vehicle type")?;
                Self::Enter {
                    plate,
                    vehicle_type,
                    model: args.next().unwrap_or_default().to_string(),
                    color: args.next().unwrap_or_default().to_string(),
                }
            }
            Some("exit") => Self::Exit {
                plate: required(args.next(), "plate")?,
            },
            Some("discount") => Self::Discount {
                plate: required(args.next(), "plate")?,
                percent: required(args.next(), "percent")?
                    .parse()
                    .context("Invalid discount percent")?,
            },
            Some("vip") => Self::Vip {
                slot: required(args.next(), "slot")?
                    .parse()
                    .context("Invalid slot number")?,
            },
            Some("rate") => Self::Rate {
                value: required(args.next(), "value")?
                    .parse()
                    .context("Invalid hourly rate")?,
            },
            Some(other) => bail!("Unknown command '{}'\n{}", other, USAGE),
        };

        if let Some(extra) = args.next() {
            bail!("Unexpected argument '{}'\n{}", extra, USAGE);
        }
        Ok(command)
    }

    /// Run against `facility`.
    pub fn run(self, facility: &mut Facility) -> Result<Outcome> {
        match self {
            Self::Status => {
                let report = facility.report();
                Ok(Outcome::read(serde_json::to_string_pretty(&report)?))
            }
            Self::Parked => {
                let lines: Vec<String> = facility
                    .parked_vehicles()
                    .map(|(slot, vehicle)| format!("slot {}: {}", slot, vehicle))
                    .collect();
                if lines.is_empty() {
                    Ok(Outcome::read("No vehicles parked"))
                } else {
                    Ok(Outcome::read(lines.join("\n")))
                }
            }
            Self::Enter {
                plate,
                vehicle_type,
                model,
                color,
            } => {
                let vehicle = Vehicle::new(&plate, model, color, vehicle_type)?;
                let normalized = vehicle.plate().clone();
                if facility.active_ticket(normalized.as_str()).is_some() {
                    return Ok(Outcome::read(format!("{} is already parked", normalized)));
                }
                let offset = facility.clock().offset();
                match facility.register_entry(vehicle) {
                    Some(ticket) => Ok(Outcome::changed(ticket.describe(offset))),
                    None => Ok(Outcome::read("Facility is full")),
                }
            }
            Self::Exit { plate } => {
                let offset = facility.clock().offset();
                match facility.register_exit(&plate)? {
                    Some(ticket) => Ok(Outcome::changed(ticket.describe(offset))),
                    None => Ok(Outcome::read(format!("No active ticket for {}", plate))),
                }
            }
            Self::Discount { plate, percent } => {
                if facility.apply_discount(&plate, percent)? {
                    Ok(Outcome::changed(format!("Discount of {}% set for {}", percent, plate)))
                } else {
                    Ok(Outcome::read(format!("No active ticket for {}", plate)))
                }
            }
            Self::Vip { slot } => {
                if facility.mark_slot_vip(slot) {
                    Ok(Outcome::changed(format!("Slot {} marked as VIP", slot)))
                } else {
                    Err(anyhow!(
                        "Slot {} does not exist (1-{})",
                        slot,
                        facility.slot_count()
                    ))
                }
            }
            Self::Rate { value } => {
                facility.set_hourly_rate(value)?;
                Ok(Outcome::changed(format!("Hourly rate set to {:.2}", value)))
            }
        }
    }
}

fn required(arg: Option<&str>, name: &str) -> Result<String> {
    arg.map(str::to_string)
        .ok_or_else(|| anyhow!("Missing <{}>\n{}", name, USAGE))
}
