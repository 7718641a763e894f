/**
 * lot module
 * Typed slot registry: allocation, release and occupancy queries
 */

pub mod category_map;
pub mod manager;
pub mod shared;
pub mod types;

pub use category_map::CategoryMap;
pub use manager::LotManager;
pub use shared::SharedLot;
pub use types::{
    Occupancy, Occupant, Slot, SlotId, SlotInfo, SlotType, StatusReport, Vehicle, VehicleCategory,
};
