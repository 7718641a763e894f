//! Error types for the lot registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LotError {
    #[error("Duplicate slot id: {0}")]
    DuplicateSlotId(String),

    #[error("Unknown slot type: {0}")]
    UnknownSlotType(String),

    #[error("Unsupported vehicle category: {0}")]
    UnsupportedVehicleCategory(String),

    #[error("No available slot of type {0}")]
    NoAvailableSlot(String),

    #[error("Vehicle {vehicle_id} already parked at slot {slot_id}")]
    VehicleAlreadyParked { vehicle_id: String, slot_id: String },

    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    #[error("Slot not occupied: {0}")]
    SlotNotOccupied(String),

    #[error("Vehicle not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Regex error: {0}")]
    RegexError(String),

    #[error("Lot lock poisoned")]
    LockPoisoned,
}

impl From<regex::Error> for LotError {
    fn from(err: regex::Error) -> Self {
        LotError::RegexError(err.to_string())
    }
}

impl LotError {
    /// True for a full-capacity condition, as opposed to a caller or
    /// configuration mistake.
    pub fn is_capacity(&self) -> bool {
        matches!(self, LotError::NoAvailableSlot(_))
    }

    /// True for mismatches between the category map and the value supplied.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LotError::UnknownSlotType(_) | LotError::UnsupportedVehicleCategory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LotError>;
