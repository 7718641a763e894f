// Release Contract Tests
//
// These tests pin the release rules of the lot registry: explicit
// rejection of unknown and already-free slots, and exact restoration of
// the free queue on a successful release.

use lot_core::{LotError, LotManager, Slot, SlotType, Vehicle};

fn compact_lot(ids: &[&str]) -> LotManager {
    let mut lot = LotManager::with_default_categories();
    for id in ids {
        lot.register_slot(Slot::new(*id, SlotType::compact())).unwrap();
    }
    lot
}

fn compact_queue(lot: &LotManager) -> Vec<String> {
    lot.free_slots(&SlotType::compact())
        .into_iter()
        .map(|id| id.to_string())
        .collect()
}

/// RULE: Releasing a free slot is an error, not a no-op
/// BREAKS: A double release would enqueue the slot twice and later hand
///         it to two vehicles
#[test]
fn releasing_free_slot_is_rejected() {
    let mut lot = compact_lot(&["C1", "C2"]);
    let before = compact_queue(&lot);

    let err = lot.release("C1").unwrap_err();
    assert!(matches!(err, LotError::SlotNotOccupied(ref id) if id == "C1"));

    assert_eq!(compact_queue(&lot), before);
}

/// RULE: Second release of the same slot fails and leaves one queue entry
/// BREAKS: Invariant 1 (each slot in exactly one place)
#[test]
fn double_release_is_rejected() {
    let mut lot = compact_lot(&["C1", "C2"]);
    lot.allocate(&Vehicle::new("V1", "car")).unwrap();

    assert_eq!(lot.release("C1").unwrap(), "V1");
    assert!(matches!(lot.release("C1"), Err(LotError::SlotNotOccupied(_))));

    assert_eq!(compact_queue(&lot), vec!["C2", "C1"]);
    lot.check_invariants().unwrap();
}

/// RULE: Unknown slot ids are reported as such
/// BREAKS: Callers cannot tell a typo from an already-free slot
#[test]
fn releasing_unknown_slot_is_not_found() {
    let mut lot = compact_lot(&["C1"]);

    assert!(matches!(lot.release("C9"), Err(LotError::SlotNotFound(ref id)) if id == "C9"));
    assert!(matches!(lot.release(""), Err(LotError::SlotNotFound(_))));
}

/// RULE: Release hands back the vehicle id and clears its lookup entry
/// BREAKS: Round trip allocate -> find -> release -> find
#[test]
fn release_clears_vehicle_lookup() {
    let mut lot = compact_lot(&["C1"]);
    let slot_id = lot.allocate(&Vehicle::new("V1", "car")).unwrap();

    assert_eq!(lot.release(slot_id.as_str()).unwrap(), "V1");
    assert!(matches!(lot.find("V1"), Err(LotError::NotFound(_))));

    // The vehicle may park again once released
    assert_eq!(lot.allocate(&Vehicle::new("V1", "car")).unwrap(), slot_id);
}

/// RULE: A slot's type is fixed at registration
/// BREAKS: Released slots would migrate between pools
#[test]
fn released_slot_returns_to_its_own_pool() {
    let mut lot = LotManager::with_default_categories();
    lot.register_slot(Slot::new("C1", "compact")).unwrap();
    lot.register_slot(Slot::new("L1", "large")).unwrap();

    lot.allocate(&Vehicle::new("T1", "truck")).unwrap();
    lot.release("L1").unwrap();

    assert_eq!(lot.slot("L1").unwrap().slot_type, SlotType::large());
    assert_eq!(lot.free_slots(&SlotType::large()).len(), 1);
    assert_eq!(lot.free_slots(&SlotType::compact()).len(), 1);
}
