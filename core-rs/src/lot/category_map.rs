/**
 * category_map.rs
 * Vehicle category -> slot type resolution
 *
 * Default table:
 * - car   -> compact
 * - bike  -> bike
 * - truck -> large
 *
 * The set of slot types a lot recognizes is exactly the set of values in
 * this table. A LotManager takes the map by value, so it cannot change
 * after construction.
 */

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::types::{SlotType, VehicleCategory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap {
    mappings: BTreeMap<VehicleCategory, SlotType>,
}

impl CategoryMap {
    /// Build a map from explicit (category, slot type) pairs
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (VehicleCategory, SlotType)>,
    {
        CategoryMap {
            mappings: pairs.into_iter().collect(),
        }
    }

    /// Map with no categories; every allocation is unsupported
    pub fn empty() -> Self {
        CategoryMap {
            mappings: BTreeMap::new(),
        }
    }

    /// Add or replace one mapping
    ///
    /// # Example
    /// ```
    /// use lot_core::{CategoryMap, SlotType, VehicleCategory};
    ///
    /// let map = CategoryMap::default()
    ///     .with_mapping(VehicleCategory::new("van"), SlotType::large());
    /// assert_eq!(map.resolve(&VehicleCategory::new("van")), Some(&SlotType::large()));
    /// ```
    pub fn with_mapping(mut self, category: VehicleCategory, slot_type: SlotType) -> Self {
        self.mappings.insert(category, slot_type);
        self
    }

    pub fn resolve(&self, category: &VehicleCategory) -> Option<&SlotType> {
        self.mappings.get(category)
    }

    /// Whether some category maps onto this slot type
    pub fn recognizes(&self, slot_type: &SlotType) -> bool {
        self.mappings.values().any(|t| t == slot_type)
    }

    /// Distinct slot types, sorted by label
    pub fn slot_types(&self) -> Vec<SlotType> {
        self.mappings
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VehicleCategory, &SlotType)> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        CategoryMap::new([
            (VehicleCategory::car(), SlotType::compact()),
            (VehicleCategory::bike(), SlotType::bike()),
            (VehicleCategory::truck(), SlotType::large()),
        ])
    }
}
