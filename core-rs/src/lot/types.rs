/**
 * types.rs
 * Value types shared by the lot registry and its callers
 *
 * Vehicle categories and slot types are open label sets. Which labels are
 * recognized is decided by the CategoryMap a LotManager is built with.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(label: impl Into<String>) -> Self {
                Self(label.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self(label.to_string())
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self(label)
            }
        }
    };
}

label_type!(
    /// Stable identifier of a registered slot
    SlotId
);

label_type!(
    /// Request-side label (car, bike, truck, ...)
    VehicleCategory
);

label_type!(
    /// Allocation pool label (compact, large, bike, ...)
    SlotType
);

impl VehicleCategory {
    pub fn car() -> Self {
        Self::new("car")
    }

    pub fn bike() -> Self {
        Self::new("bike")
    }

    pub fn truck() -> Self {
        Self::new("truck")
    }
}

impl SlotType {
    pub fn compact() -> Self {
        Self::new("compact")
    }

    pub fn large() -> Self {
        Self::new("large")
    }

    pub fn bike() -> Self {
        Self::new("bike")
    }
}

/// A parking request subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub category: VehicleCategory,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, category: impl Into<VehicleCategory>) -> Self {
        Vehicle {
            id: id.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vehicle Number: {}, Type: {}", self.id, self.category)
    }
}

/// What the registry remembers about the vehicle in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub vehicle_id: String,
    pub category: VehicleCategory,
}

impl From<&Vehicle> for Occupant {
    fn from(vehicle: &Vehicle) -> Self {
        Occupant {
            vehicle_id: vehicle.id.clone(),
            category: vehicle.category.clone(),
        }
    }
}

/// A unit of allocatable capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub slot_type: SlotType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<Occupant>,
}

impl Slot {
    /// Create a free slot
    pub fn new(id: impl Into<SlotId>, slot_type: impl Into<SlotType>) -> Self {
        Slot {
            id: id.into(),
            slot_type: slot_type.into(),
            occupant: None,
        }
    }

    /// Create a slot that is already holding a vehicle
    pub fn occupied_by(
        id: impl Into<SlotId>,
        slot_type: impl Into<SlotType>,
        vehicle: &Vehicle,
    ) -> Self {
        Slot {
            id: id.into(),
            slot_type: slot_type.into(),
            occupant: Some(Occupant::from(vehicle)),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn info(&self) -> SlotInfo {
        SlotInfo {
            slot_id: self.id.clone(),
            slot_type: self.slot_type.clone(),
        }
    }
}

/// Answer to a vehicle lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub slot_id: SlotId,
    pub slot_type: SlotType,
}

impl fmt::Display for SlotInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.slot_id, self.slot_type)
    }
}

/// Occupied/available counts for one slot type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub occupied: usize,
    pub available: usize,
}

impl Occupancy {
    pub fn total(&self) -> usize {
        self.occupied + self.available
    }
}

/// Point-in-time occupancy per slot type, ordered by type label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusReport(BTreeMap<SlotType, Occupancy>);

impl StatusReport {
    pub fn new(entries: BTreeMap<SlotType, Occupancy>) -> Self {
        StatusReport(entries)
    }

    pub fn get(&self, slot_type: &SlotType) -> Option<&Occupancy> {
        self.0.get(slot_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotType, &Occupancy)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over every slot type
    pub fn totals(&self) -> Occupancy {
        self.0.values().fold(Occupancy::default(), |acc, o| Occupancy {
            occupied: acc.occupied + o.occupied,
            available: acc.available + o.available,
        })
    }
}

impl StatusReport {
    /// Render the occupancy table, letting the caller decorate the
    /// already padded AVAILABLE cell of each row
    pub fn table_with<F>(&self, mut paint_available: F) -> String
    where
        F: FnMut(&Occupancy, String) -> String,
    {
        let mut out = format!(
            "{:<12} {:>9} {:>10} {:>6}\n",
            "TYPE", "OCCUPIED", "AVAILABLE", "TOTAL"
        );
        for (slot_type, occupancy) in &self.0 {
            let available = paint_available(occupancy, format!("{:>10}", occupancy.available));
            out.push_str(&format!(
                "{:<12} {:>9} {} {:>6}\n",
                slot_type.as_str(),
                occupancy.occupied,
                available,
                occupancy.total()
            ));
        }
        out
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table_with(|_, cell| cell))
    }
}
