/**
 * shared.rs
 * Thread-safe handle to a LotManager
 *
 * Free queues and the occupied index change together on allocate and
 * release, so every operation runs under one mutex.
 */

use std::sync::{Arc, Mutex, MutexGuard};

use super::manager::LotManager;
use super::types::{Slot, SlotId, SlotInfo, StatusReport, Vehicle};
use crate::errors::{LotError, Result};

/// Clone-able handle; all clones see the same lot
#[derive(Debug, Clone)]
pub struct SharedLot {
    inner: Arc<Mutex<LotManager>>,
}

impl SharedLot {
    pub fn new(manager: LotManager) -> Self {
        SharedLot {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LotManager>> {
        self.inner.lock().map_err(|_| LotError::LockPoisoned)
    }

    pub fn register_slot(&self, slot: Slot) -> Result<()> {
        self.lock()?.register_slot(slot)
    }

    pub fn allocate(&self, vehicle: &Vehicle) -> Result<SlotId> {
        self.lock()?.allocate(vehicle)
    }

    pub fn release(&self, slot_id: &str) -> Result<String> {
        self.lock()?.release(slot_id)
    }

    pub fn status(&self) -> Result<StatusReport> {
        Ok(self.lock()?.status())
    }

    pub fn find(&self, vehicle_id: &str) -> Result<SlotInfo> {
        self.lock()?.find(vehicle_id)
    }

    /// Run a read-only closure against a consistent view of the lot
    pub fn with<R>(&self, f: impl FnOnce(&LotManager) -> R) -> Result<R> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }
}

impl From<LotManager> for SharedLot {
    fn from(manager: LotManager) -> Self {
        SharedLot::new(manager)
    }
}
