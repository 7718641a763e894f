/**
 * config module
 * lot.yaml lot definitions
 */

pub mod lot_config;

pub use lot_config::{LotConfig, LotSpec, Metadata, SlotEntry, LOT_FILE, MAX_SLOT_RUN};
