//! # Lot Core - Typed Parking Slot Registry
//!
//! Tracks a finite pool of typed parking slots, assigns them to typed
//! vehicles on request, releases them on demand and answers point-in-time
//! occupancy and lookup queries.
//!
//! ## Core Principle
//!
//! **One owner, many views**: the [`LotManager`] owns every slot record.
//! Free queues and the occupied index only hold positions in that table,
//! so the "available", "occupied" and "by vehicle number" views cannot
//! drift apart.
//!
//! ## Key Features
//!
//! - Configurable vehicle category -> slot type mapping
//! - FIFO allocation within each slot type (longest idle slot first)
//! - All-or-nothing operations with explicit, inspectable errors
//! - [`SharedLot`] handle serializing access across threads
//! - YAML lot definitions and a line-oriented operation script runner
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │   lotctl     │   │ tests / host │
//! │ (CLI, script)│   │   service    │
//! └──────┬───────┘   └──────┬───────┘
//!        │                  │
//!        ▼                  ▼
//! ┌─────────────────────────────────┐
//! │           LotManager            │
//! │ slots │ free queues │ occupied  │
//! └─────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use lot_core::{LotManager, Slot, SlotType, Vehicle};
//!
//! let mut lot = LotManager::with_default_categories();
//! lot.register_slot(Slot::new("C1", SlotType::compact()))?;
//!
//! let slot_id = lot.allocate(&Vehicle::new("MH12AB1234", "car"))?;
//! assert_eq!(slot_id.as_str(), "C1");
//! assert_eq!(lot.release("C1")?, "MH12AB1234");
//! # Ok::<(), lot_core::LotError>(())
//! ```

pub mod config;
pub mod errors;
pub mod lot;
pub mod script;

pub use config::{LotConfig, SlotEntry, LOT_FILE};
pub use errors::{LotError, Result};
pub use lot::{
    CategoryMap, LotManager, Occupancy, Occupant, SharedLot, Slot, SlotId, SlotInfo, SlotType,
    StatusReport, Vehicle, VehicleCategory,
};
pub use script::{Command, Outcome};

/// Version of the lot definition format
pub const VERSION: &str = "0.3.2";
