//! Integration tests for a complete lot session
//!
//! Tests the full flow a caller drives through the public API:
//! - Registration from a lot definition
//! - Allocation across vehicle categories
//! - Lookup, status and release
//! - Script execution against the same lot

use lot_core::script::{self, Outcome};
use lot_core::{
    LotConfig, LotError, LotManager, Occupancy, SharedLot, Slot, SlotType, Vehicle,
};

fn demo_lot() -> LotManager {
    let mut lot = LotManager::with_default_categories();
    for id in ["C1", "C2", "C3"] {
        lot.register_slot(Slot::new(id, SlotType::compact())).unwrap();
    }
    for id in ["B1", "B2"] {
        lot.register_slot(Slot::new(id, SlotType::bike())).unwrap();
    }
    lot.register_slot(Slot::new("L1", SlotType::large())).unwrap();
    lot
}

#[test]
fn test_reference_scenario() {
    let mut lot = demo_lot();

    // 1. Park one vehicle of each category
    assert_eq!(lot.allocate(&Vehicle::new("X1", "car")).unwrap().as_str(), "C1");
    assert_eq!(lot.allocate(&Vehicle::new("X2", "bike")).unwrap().as_str(), "B1");
    assert_eq!(lot.allocate(&Vehicle::new("X3", "truck")).unwrap().as_str(), "L1");

    // 2. Status per slot type
    let status = lot.status();
    assert_eq!(
        status.get(&SlotType::compact()),
        Some(&Occupancy { occupied: 1, available: 2 })
    );
    assert_eq!(
        status.get(&SlotType::bike()),
        Some(&Occupancy { occupied: 1, available: 1 })
    );
    assert_eq!(
        status.get(&SlotType::large()),
        Some(&Occupancy { occupied: 1, available: 0 })
    );

    // 3. Release C1 and re-check compact
    assert_eq!(lot.release("C1").unwrap(), "X1");
    assert_eq!(
        lot.status().get(&SlotType::compact()),
        Some(&Occupancy { occupied: 0, available: 3 })
    );

    lot.check_invariants().unwrap();
}

#[test]
fn test_sample_config_matches_handbuilt_lot() {
    let from_config = LotConfig::sample().build().unwrap();
    let by_hand = demo_lot();

    let config_ids: Vec<_> = from_config.slots().map(|s| s.id.clone()).collect();
    let hand_ids: Vec<_> = by_hand.slots().map(|s| s.id.clone()).collect();

    assert_eq!(config_ids, hand_ids);
    assert_eq!(from_config.status(), by_hand.status());
}

#[test]
fn test_round_trip_allocate_find_release() {
    let mut lot = demo_lot();
    let vehicle = Vehicle::new("MH12AB1234", "car");

    let slot_id = lot.allocate(&vehicle).unwrap();
    assert_eq!(lot.find(&vehicle.id).unwrap().slot_id, slot_id);

    lot.release(slot_id.as_str()).unwrap();
    assert!(matches!(lot.find(&vehicle.id), Err(LotError::NotFound(_))));
}

#[test]
fn test_fill_drain_refill() {
    let mut lot = demo_lot();

    // Fill every compact slot
    for n in 1..=3 {
        lot.allocate(&Vehicle::new(format!("CAR{}", n), "car")).unwrap();
    }
    assert!(lot.allocate(&Vehicle::new("CAR4", "car")).unwrap_err().is_capacity());

    // Drain in reverse order
    for id in ["C3", "C2", "C1"] {
        lot.release(id).unwrap();
    }

    // Refill follows release order
    let refill: Vec<String> = (5..=7)
        .map(|n| lot.allocate(&Vehicle::new(format!("CAR{}", n), "car")).unwrap().to_string())
        .collect();
    assert_eq!(refill, vec!["C3", "C2", "C1"]);

    lot.check_invariants().unwrap();
}

#[test]
fn test_script_session_matches_direct_calls() {
    let mut lot = LotConfig::sample().build().unwrap();
    let commands = script::parse_script(
        r#"
park MH12AB1234 car
park MH12XY4321 bike
park MH14TR1111 truck
find MH12XY4321
status
release C1
status
"#,
    )
    .unwrap();

    let outcomes = script::run(&mut lot, &commands);

    assert_eq!(outcomes.len(), 7);
    assert!(outcomes.iter().all(|o| !o.is_rejected()));
    assert_eq!(
        outcomes[3].to_string(),
        "Vehicle MH12XY4321 is parked at slot B1 (bike)"
    );
    assert_eq!(
        outcomes[5].to_string(),
        "Slot C1 released from vehicle MH12AB1234"
    );

    match &outcomes[6] {
        Outcome::Status(report) => {
            assert_eq!(
                report.get(&SlotType::compact()),
                Some(&Occupancy { occupied: 0, available: 3 })
            );
            assert_eq!(report.totals(), Occupancy { occupied: 2, available: 4 });
        }
        other => panic!("Expected status outcome, got {:?}", other),
    }
}

#[test]
fn test_shared_lot_serves_many_threads() {
    let lot = SharedLot::new(demo_lot());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let lot = lot.clone();
            std::thread::spawn(move || {
                let vehicle = Vehicle::new(format!("BIKE{}", n), "bike");
                match lot.allocate(&vehicle) {
                    Ok(slot_id) => {
                        lot.release(slot_id.as_str()).unwrap();
                        true
                    }
                    Err(e) => {
                        assert!(e.is_capacity());
                        false
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let status = lot.status().unwrap();
    assert_eq!(
        status.get(&SlotType::bike()),
        Some(&Occupancy { occupied: 0, available: 2 })
    );
    lot.with(|m| m.check_invariants()).unwrap().unwrap();
}
