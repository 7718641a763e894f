/**
 * script.rs
 * Line-oriented operation scripts driven against a LotManager
 *
 * Format (one command per line; a token starting with '#' begins a
 * comment, so ids may still contain '#' after their first character):
 * ```text
 * park MH12AB1234 car
 * find MH12AB1234
 * status
 * release C1
 * ```
 *
 * Core failures do not stop a run; each one is recorded as a Rejected
 * outcome and the next command proceeds.
 */

use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{LotError, Result};
use crate::lot::{LotManager, SlotId, SlotInfo, StatusReport, Vehicle};

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Park(Vehicle),
    Release(SlotId),
    Find(String),
    Status,
}

/// Result of executing one command
#[derive(Debug)]
pub enum Outcome {
    Parked { vehicle_id: String, slot_id: SlotId },
    Released { slot_id: SlotId, vehicle_id: String },
    Found { vehicle_id: String, slot: SlotInfo },
    Status(StatusReport),
    Rejected { command: Command, error: LotError },
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Parked { vehicle_id, slot_id } => {
                write!(f, "Vehicle {} parked at slot {}", vehicle_id, slot_id)
            }
            Outcome::Released { slot_id, vehicle_id } => {
                write!(f, "Slot {} released from vehicle {}", slot_id, vehicle_id)
            }
            Outcome::Found { vehicle_id, slot } => write!(
                f,
                "Vehicle {} is parked at slot {} ({})",
                vehicle_id, slot.slot_id, slot.slot_type
            ),
            Outcome::Status(report) => write!(f, "{}", report),
            Outcome::Rejected { command, error } => match (command, error) {
                (
                    Command::Park(vehicle),
                    LotError::NoAvailableSlot(_) | LotError::UnsupportedVehicleCategory(_),
                ) => write!(f, "No available slot for {}", vehicle.category),
                (_, LotError::SlotNotFound(_) | LotError::SlotNotOccupied(_)) => {
                    write!(f, "Slot not found or already free.")
                }
                (_, LotError::NotFound(_)) => write!(f, "Vehicle not found."),
                (_, error) => write!(f, "{}", error),
            },
        }
    }
}

/// Parse script text into commands
///
/// # Errors
/// `ParseError` naming the 1-based line of the first malformed command
pub fn parse_script(content: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();

    for (n, raw) in content.lines().enumerate() {
        let tokens: Vec<&str> = raw
            .split_whitespace()
            .take_while(|token| !token.starts_with('#'))
            .collect();
        if tokens.is_empty() {
            continue;
        }

        let keyword = tokens[0].to_ascii_lowercase();

        let command = match (keyword.as_str(), &tokens[1..]) {
            ("park", [vehicle_id, category]) => {
                Command::Park(Vehicle::new(*vehicle_id, *category))
            }
            ("release", [slot_id]) => Command::Release(SlotId::new(*slot_id)),
            ("find", [vehicle_id]) => Command::Find(vehicle_id.to_string()),
            ("status", []) => Command::Status,
            ("park" | "release" | "find" | "status", _) => {
                return Err(LotError::ParseError(format!(
                    "line {}: wrong number of arguments for '{}'",
                    n + 1,
                    keyword
                )))
            }
            _ => {
                return Err(LotError::ParseError(format!(
                    "line {}: unknown command '{}'",
                    n + 1,
                    tokens[0]
                )))
            }
        };

        commands.push(command);
    }

    Ok(commands)
}

/// Read and parse a script file
pub fn parse_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LotError::FileNotFound(path.to_string_lossy().to_string()));
    }

    parse_script(&fs::read_to_string(path)?)
}

/// Execute one command
pub fn execute(lot: &mut LotManager, command: &Command) -> Outcome {
    let result = match command {
        Command::Park(vehicle) => lot.allocate(vehicle).map(|slot_id| Outcome::Parked {
            vehicle_id: vehicle.id.clone(),
            slot_id,
        }),
        Command::Release(slot_id) => lot.release(slot_id.as_str()).map(|vehicle_id| {
            Outcome::Released {
                slot_id: slot_id.clone(),
                vehicle_id,
            }
        }),
        Command::Find(vehicle_id) => lot.find(vehicle_id).map(|slot| Outcome::Found {
            vehicle_id: vehicle_id.clone(),
            slot,
        }),
        Command::Status => Ok(Outcome::Status(lot.status())),
    };

    result.unwrap_or_else(|error| {
        debug!(command = ?command, %error, "command rejected");
        Outcome::Rejected {
            command: command.clone(),
            error,
        }
    })
}

/// Execute commands in order
pub fn run(lot: &mut LotManager, commands: &[Command]) -> Vec<Outcome> {
    commands.iter().map(|command| execute(lot, command)).collect()
}
