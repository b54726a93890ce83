//! Entry / exit scenarios against a facility with a manual clock.

use integration_tests::{fixtures, setup::TestContext};
use parking_core::{Facility, Slot, Vehicle, VehicleType};

/// Lot of 2: A and B park, C is turned away, A leaves, C parks.
#[test]
fn test_full_lot_then_release() {
    let mut ctx = TestContext::new(2, 10.0);

    assert!(ctx.facility.register_entry(fixtures::car("AAA1111")).is_some());
    assert!(ctx.facility.register_entry(fixtures::car("BBB2222")).is_some());
    assert!(
        ctx.facility.register_entry(fixtures::car("CCC3333")).is_none(),
        "Expected lot full"
    );

    ctx.advance_minutes(20);
    assert!(ctx.facility.register_exit("AAA1111").unwrap().is_some());
    assert_eq!(ctx.facility.free_count(), 1);

    let ticket = ctx.facility.register_entry(fixtures::car("CCC3333")).unwrap();
    assert_eq!(ticket.id(), 3);
    assert!(ctx.facility.slots()[0].is_occupied_by("CCC3333"));
}

/// Filling the lot and trying once more changes nothing.
#[test]
fn test_full_lot_rejection_leaves_state_untouched() {
    for slots in [1, 5, 37, 100] {
        let mut ctx = TestContext::new(slots, 5.0);
        for vehicle in fixtures::cars(slots) {
            assert!(ctx.facility.register_entry(vehicle).is_some());
        }
        assert_eq!(ctx.facility.free_count(), 0);
        assert_eq!(ctx.facility.occupied_count(), slots);

        let tickets_before: Vec<String> =
            ctx.facility.tickets().iter().map(|t| t.to_string()).collect();
        let slots_before: Vec<String> = ctx.facility.slots().iter().map(Slot::to_string).collect();

        assert!(ctx.facility.register_entry(fixtures::car("ZZZ9999")).is_none());

        let tickets_after: Vec<String> =
            ctx.facility.tickets().iter().map(|t| t.to_string()).collect();
        let slots_after: Vec<String> = ctx.facility.slots().iter().map(Slot::to_string).collect();
        assert_eq!(tickets_before, tickets_after);
        assert_eq!(slots_before, slots_after);
        assert_eq!(ctx.facility.next_ticket_id() as usize, slots + 1);
    }
}

/// A parked plate cannot enter again, whatever the spelling or vehicle data.
#[test]
fn test_already_parked_plate_is_rejected() {
    let mut ctx = TestContext::new(5, 10.0);
    ctx.facility.register_entry(fixtures::car("ABC1D23")).unwrap();

    let same_plate = Vehicle::new("abc1d23", "Other", "green", VehicleType::Truck).unwrap();
    assert!(ctx.facility.register_entry(same_plate).is_none());
    assert_eq!(ctx.facility.tickets().len(), 1);
    assert_eq!(ctx.facility.occupied_count(), 1);
}

/// After leaving, the same vehicle can come back with a new ticket.
#[test]
fn test_reentry_after_exit() {
    let mut ctx = TestContext::new(3, 10.0);
    ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    ctx.advance_minutes(5);
    ctx.facility.register_exit("AAA1111").unwrap().unwrap();

    let ticket = ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    assert_eq!(ticket.id(), 2);
    assert!(ticket.is_active());
    assert_eq!(ctx.facility.tickets().len(), 2);
}

/// Entry then exit: exit not before entry, positive amount, slot reusable.
#[test]
fn test_round_trip() {
    let mut ctx = TestContext::new(1, 12.5);
    let vehicle = fixtures::motorcycle("MOT0001");
    let plate = vehicle.plate().to_string();

    ctx.facility.register_entry(vehicle).unwrap();
    ctx.advance_minutes(1);
    let ticket = ctx.facility.register_exit(&plate).unwrap().unwrap();

    let exit = ticket.exit_time().unwrap();
    assert!(exit >= ticket.entry_time());
    assert!(ticket.amount_due().unwrap() > 0.0);

    assert!(ctx.facility.register_entry(fixtures::car("NEW0001")).is_some());
}

/// Exit of a plate that never entered is a soft failure.
#[test]
fn test_exit_of_unknown_plate() {
    let mut ctx = TestContext::new(2, 10.0);
    ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    assert!(ctx.facility.register_exit("ZZZ9999").unwrap().is_none());
    assert_eq!(ctx.facility.occupied_count(), 1);
}

/// A plate that already left cannot leave again.
#[test]
fn test_double_exit_is_soft_failure() {
    let mut ctx = TestContext::new(2, 10.0);
    ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    ctx.advance_minutes(30);
    ctx.facility.register_exit("AAA1111").unwrap().unwrap();

    ctx.advance_minutes(30);
    assert!(ctx.facility.register_exit("AAA1111").unwrap().is_none());
    assert_eq!(ctx.facility.total_revenue(), 10.0);
}

/// Lookups accept any casing and surrounding spaces.
#[test]
fn test_find_vehicle() {
    let mut ctx = TestContext::new(3, 10.0);
    ctx.facility.register_entry(fixtures::truck("TRK1A23")).unwrap();

    let found = ctx.facility.find_vehicle(" trk1a23 ").unwrap();
    assert_eq!(found.vehicle_type(), VehicleType::Truck);
    assert!(ctx.facility.find_vehicle("TRK1A24").is_none());
}

/// VIP marking is informational only; allocation stays first-fit.
#[test]
fn test_vip_slots_are_allocated_first_fit() {
    let mut ctx = TestContext::new(3, 10.0);
    assert!(ctx.facility.mark_slot_vip(1));
    assert!(!ctx.facility.mark_slot_vip(4));

    ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    let first = &ctx.facility.slots()[0];
    assert!(first.is_vip());
    assert!(first.is_occupied_by("AAA1111"));
}

/// Tickets are found by entry date, both bounds inclusive.
#[test]
fn test_tickets_in_range_by_entry_date() {
    let mut ctx = TestContext::new(5, 10.0);
    ctx.facility.register_entry(fixtures::car("AAA1111")).unwrap();
    ctx.advance_minutes(24 * 60);
    ctx.facility.register_entry(fixtures::car("BBB2222")).unwrap();
    ctx.advance_minutes(24 * 60);
    // Entered on the 1st, leaves on the 3rd: still counted on the 1st.
    ctx.facility.register_exit("AAA1111").unwrap();

    let first = ctx
        .facility
        .tickets_in_range(fixtures::march(1), fixtures::march(1));
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].vehicle().plate().as_str(), "AAA1111");

    let both = ctx
        .facility
        .tickets_in_range(fixtures::march(1), fixtures::march(3));
    assert_eq!(both.len(), 2);

    assert!(ctx
        .facility
        .tickets_in_range(fixtures::march(3), fixtures::march(3))
        .is_empty());
}

#[test]
fn test_invalid_facility_parameters() {
    assert!(Facility::new("", 10, 10.0).unwrap_err().is_validation());
    assert!(Facility::new("Lot", 0, 10.0).unwrap_err().is_validation());
    assert!(Facility::new("Lot", 101, 10.0).unwrap_err().is_validation());
    assert!(Facility::new("Lot", 10, -1.0).unwrap_err().is_validation());
}
