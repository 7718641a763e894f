/**
 * manager.rs
 * Slot allocation and release for a single lot
 *
 * The manager owns every Slot record in `slots`. All other views hold
 * indices into that table:
 * - `free`:     per slot type, FIFO queue of unoccupied slot indices
 * - `occupied`: vehicle id -> index of the slot it occupies
 * - `index`:    slot id -> index
 *
 * Allocation strategy:
 * - Resolve vehicle category to a slot type through the CategoryMap
 * - Take the head of that type's free queue (longest idle slot)
 * - Released slots go to the tail of their queue
 *
 * Every operation validates before it mutates, so a failed call leaves
 * the registry exactly as it was.
 */

use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::{debug, trace};

use super::category_map::CategoryMap;
use super::types::{Occupancy, Occupant, Slot, SlotId, SlotInfo, SlotType, StatusReport, Vehicle};
use crate::errors::{LotError, Result};

/// Lot Manager - sole owner of slot state for one lot
#[derive(Debug, Clone)]
pub struct LotManager {
    categories: CategoryMap,
    slots: Vec<Slot>,
    index: HashMap<SlotId, usize>,
    free: HashMap<SlotType, VecDeque<usize>>,
    occupied: HashMap<String, usize>,
    totals: HashMap<SlotType, usize>,
}

impl LotManager {
    /// Create an empty lot using the given category map
    ///
    /// # Example
    /// ```
    /// use lot_core::{CategoryMap, LotManager};
    ///
    /// let lot = LotManager::new(CategoryMap::default());
    /// assert!(lot.is_empty());
    /// ```
    pub fn new(categories: CategoryMap) -> Self {
        let free = categories
            .slot_types()
            .into_iter()
            .map(|t| (t, VecDeque::new()))
            .collect();

        LotManager {
            categories,
            slots: Vec::new(),
            index: HashMap::new(),
            free,
            occupied: HashMap::new(),
            totals: HashMap::new(),
        }
    }

    /// Create an empty lot with car/bike/truck mappings
    pub fn with_default_categories() -> Self {
        Self::new(CategoryMap::default())
    }

    pub fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    /// Register a slot
    ///
    /// A free slot joins the tail of its type's free queue. A slot that
    /// arrives with an occupant goes straight into the occupied index.
    ///
    /// # Errors
    /// - `DuplicateSlotId` if the id is already registered
    /// - `UnknownSlotType` if no category maps to the slot's type
    /// - `VehicleAlreadyParked` if the occupant is parked elsewhere
    /// - `UnsupportedVehicleCategory` if the occupant's category does not
    ///   map to this slot's type
    pub fn register_slot(&mut self, slot: Slot) -> Result<()> {
        if self.index.contains_key(&slot.id) {
            return Err(LotError::DuplicateSlotId(slot.id.to_string()));
        }

        if !self.categories.recognizes(&slot.slot_type) {
            return Err(LotError::UnknownSlotType(slot.slot_type.to_string()));
        }

        if let Some(occupant) = &slot.occupant {
            if let Some(&existing) = self.occupied.get(&occupant.vehicle_id) {
                return Err(LotError::VehicleAlreadyParked {
                    vehicle_id: occupant.vehicle_id.clone(),
                    slot_id: self.slots[existing].id.to_string(),
                });
            }

            if self.categories.resolve(&occupant.category) != Some(&slot.slot_type) {
                return Err(LotError::UnsupportedVehicleCategory(
                    occupant.category.to_string(),
                ));
            }
        }

        let idx = self.slots.len();
        self.index.insert(slot.id.clone(), idx);
        *self.totals.entry(slot.slot_type.clone()).or_insert(0) += 1;

        match &slot.occupant {
            Some(occupant) => {
                self.occupied.insert(occupant.vehicle_id.clone(), idx);
            }
            None => {
                self.free
                    .entry(slot.slot_type.clone())
                    .or_default()
                    .push_back(idx);
            }
        }

        debug!(
            slot_id = %slot.id,
            slot_type = %slot.slot_type,
            occupied = slot.is_occupied(),
            "slot registered"
        );
        self.slots.push(slot);

        Ok(())
    }

    /// Allocate a slot for a vehicle
    ///
    /// # Returns
    /// Id of the slot now holding the vehicle
    ///
    /// # Errors
    /// - `UnsupportedVehicleCategory` if the category has no mapping
    /// - `VehicleAlreadyParked` if the vehicle id already holds a slot
    /// - `NoAvailableSlot` if the mapped type has no free slot
    pub fn allocate(&mut self, vehicle: &Vehicle) -> Result<SlotId> {
        let slot_type = self
            .categories
            .resolve(&vehicle.category)
            .ok_or_else(|| LotError::UnsupportedVehicleCategory(vehicle.category.to_string()))?
            .clone();

        if let Some(&existing) = self.occupied.get(&vehicle.id) {
            trace!(vehicle_id = %vehicle.id, "allocate rejected: already parked");
            return Err(LotError::VehicleAlreadyParked {
                vehicle_id: vehicle.id.clone(),
                slot_id: self.slots[existing].id.to_string(),
            });
        }

        let idx = self
            .free
            .get_mut(&slot_type)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| LotError::NoAvailableSlot(slot_type.to_string()))?;

        let slot = &mut self.slots[idx];
        slot.occupant = Some(Occupant::from(vehicle));
        self.occupied.insert(vehicle.id.clone(), idx);

        debug!(
            vehicle_id = %vehicle.id,
            category = %vehicle.category,
            slot_id = %slot.id,
            "vehicle parked"
        );

        Ok(slot.id.clone())
    }

    /// Release an occupied slot
    ///
    /// # Returns
    /// Id of the vehicle that was holding the slot
    ///
    /// # Errors
    /// - `SlotNotFound` if no slot has this id
    /// - `SlotNotOccupied` if the slot is already free
    pub fn release(&mut self, slot_id: &str) -> Result<String> {
        let idx = *self
            .index
            .get(slot_id)
            .ok_or_else(|| LotError::SlotNotFound(slot_id.to_string()))?;

        let slot = &mut self.slots[idx];
        let occupant = slot
            .occupant
            .take()
            .ok_or_else(|| LotError::SlotNotOccupied(slot_id.to_string()))?;

        self.occupied.remove(&occupant.vehicle_id);
        self.free
            .entry(slot.slot_type.clone())
            .or_default()
            .push_back(idx);

        debug!(
            vehicle_id = %occupant.vehicle_id,
            slot_id = %slot.id,
            "slot released"
        );

        Ok(occupant.vehicle_id)
    }

    /// Occupied vs available counts for every recognized slot type
    pub fn status(&self) -> StatusReport {
        let entries: BTreeMap<SlotType, Occupancy> = self
            .categories
            .slot_types()
            .into_iter()
            .map(|slot_type| {
                let total = self.totals.get(&slot_type).copied().unwrap_or(0);
                let available = self.free.get(&slot_type).map_or(0, VecDeque::len);
                let occupancy = Occupancy {
                    occupied: total - available,
                    available,
                };
                (slot_type, occupancy)
            })
            .collect();

        StatusReport::new(entries)
    }

    /// Look up the slot a vehicle occupies
    pub fn find(&self, vehicle_id: &str) -> Result<SlotInfo> {
        self.occupied
            .get(vehicle_id)
            .map(|&idx| self.slots[idx].info())
            .ok_or_else(|| LotError::NotFound(vehicle_id.to_string()))
    }

    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.index.get(slot_id).map(|&idx| &self.slots[idx])
    }

    /// All slots in registration order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Free slots of one type, next to be allocated first
    pub fn free_slots(&self, slot_type: &SlotType) -> Vec<&SlotId> {
        self.free
            .get(slot_type)
            .map(|queue| queue.iter().map(|&idx| &self.slots[idx].id).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Verify the registry's structural invariants
    ///
    /// Checks that every slot sits in exactly one place (its own type's
    /// free queue or the occupied index), that occupied entries agree with
    /// the slot records, and that per-type totals match the slot table.
    ///
    /// # Errors
    /// `ValidationError` describing the first violation found
    pub fn check_invariants(&self) -> Result<()> {
        let mut placements = vec![0usize; self.slots.len()];

        for (slot_type, queue) in &self.free {
            for &idx in queue {
                let slot = self.slots.get(idx).ok_or_else(|| {
                    LotError::ValidationError(format!("free queue {} holds bad index {}", slot_type, idx))
                })?;
                if &slot.slot_type != slot_type {
                    return Err(LotError::ValidationError(format!(
                        "slot {} of type {} queued as {}",
                        slot.id, slot.slot_type, slot_type
                    )));
                }
                if slot.is_occupied() {
                    return Err(LotError::ValidationError(format!(
                        "occupied slot {} is in the free queue",
                        slot.id
                    )));
                }
                placements[idx] += 1;
            }
        }

        for (vehicle_id, &idx) in &self.occupied {
            let slot = self.slots.get(idx).ok_or_else(|| {
                LotError::ValidationError(format!("vehicle {} maps to bad index {}", vehicle_id, idx))
            })?;
            match &slot.occupant {
                Some(occupant) if &occupant.vehicle_id == vehicle_id => {}
                _ => {
                    return Err(LotError::ValidationError(format!(
                        "vehicle {} indexed at slot {} which does not hold it",
                        vehicle_id, slot.id
                    )))
                }
            }
            placements[idx] += 1;
        }

        if let Some(idx) = placements.iter().position(|&count| count != 1) {
            return Err(LotError::ValidationError(format!(
                "slot {} appears {} times across free queues and occupied index",
                self.slots[idx].id, placements[idx]
            )));
        }

        for (slot_type, &total) in &self.totals {
            let counted = self.slots.iter().filter(|s| &s.slot_type == slot_type).count();
            if counted != total {
                return Err(LotError::ValidationError(format!(
                    "type {} records {} slots but table has {}",
                    slot_type, total, counted
                )));
            }
        }

        Ok(())
    }
}

impl Default for LotManager {
    fn default() -> Self {
        Self::with_default_categories()
    }
}
