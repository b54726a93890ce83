//! Snapshot save / restore.

use std::sync::Arc;

use integration_tests::{fixtures, setup::TestContext};
use parking_core::{Error, Facility, FacilitySnapshot, ManualClock};

fn populated() -> TestContext {
    let mut ctx = TestContext::new(4, 8.0);
    ctx.facility.mark_slot_vip(4);
    ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    ctx.facility.register_entry(fixtures::truck("BBB2B22")).unwrap();
    ctx.facility.apply_discount("BBB2B22", 25.0).unwrap();
    ctx.advance_minutes(75);
    ctx.facility.register_exit("AAA1111").unwrap();
    ctx
}

#[test]
fn test_snapshot_json_round_trip() {
    let ctx = populated();
    let json = ctx.facility.snapshot().to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Lot");
    assert_eq!(value["next_ticket_id"], 3);
    assert_eq!(value["slots"].as_array().unwrap().len(), 4);
    assert_eq!(value["tickets"][1]["vehicle"]["type"], "truck");

    let clock = Arc::new(ManualClock::new(fixtures::opening_time()));
    let restored = Facility::restore(FacilitySnapshot::from_json(&json).unwrap(), clock).unwrap();

    assert_eq!(restored.report(), ctx.facility.report());
    assert_eq!(restored.next_ticket_id(), 3);
}

/// A restored facility keeps issuing tickets from where it stopped.
#[test]
fn test_restored_facility_keeps_operating() {
    let ctx = populated();
    let snapshot = ctx.facility.snapshot();
    let clock = ctx.clock.clone();

    let mut restored = Facility::restore(snapshot, clock.clone()).unwrap();
    clock.advance(chrono::Duration::minutes(45));

    // Truck entered at 08:00, leaves at 10:00: 2h * 8.0 * 2.0 * 0.75.
    let ticket = restored.register_exit("BBB2B22").unwrap().unwrap();
    assert_eq!(ticket.amount_due(), Some(24.0));

    let next = restored.register_entry(fixtures::car("CCC3333")).unwrap();
    assert_eq!(next.id(), 3);
}

#[test]
fn test_corrupt_json_is_serialization_error() {
    let err = FacilitySnapshot::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[test]
fn test_snapshot_with_reused_ticket_id_is_rejected() {
    let ctx = populated();
    let json = ctx
        .facility
        .snapshot()
        .to_json()
        .unwrap()
        .replace("\"id\": 2", "\"id\": 1");
    let snapshot = FacilitySnapshot::from_json(&json).unwrap();

    let clock = Arc::new(ManualClock::new(fixtures::opening_time()));
    let err = Facility::restore(snapshot, clock).unwrap_err();
    assert_eq!(err.error_code(), Some("VALID_004"));
}

#[test]
fn test_snapshot_with_too_many_slots_is_rejected() {
    let ctx = populated();
    let mut snapshot = ctx.facility.snapshot();
    let template = snapshot.slots[0].clone();
    while snapshot.slots.len() <= 100 {
        snapshot.slots.push(template.clone());
    }

    let clock = Arc::new(ManualClock::new(fixtures::opening_time()));
    assert!(Facility::restore(snapshot, clock).unwrap_err().is_validation());
}
