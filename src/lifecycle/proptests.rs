//! Property-based tests for the venue status machine
//!
//! Invariants checked over arbitrary event sequences:
//! - The status after a sequence depends only on the last event
//! - An empty sequence leaves the status untouched
//! - A purchase sells the venue whatever its prior status

use super::{transition, VenueEvent, VenueStatus};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = VenueStatus> {
    prop_oneof![
        Just(VenueStatus::Available),
        Just(VenueStatus::Rented),
        Just(VenueStatus::Sold),
    ]
}

fn arb_event() -> impl Strategy<Value = VenueEvent> {
    prop_oneof![
        Just(VenueEvent::BookingCreated),
        Just(VenueEvent::BookingCancelled),
        Just(VenueEvent::Purchased),
    ]
}

fn apply_all(start: VenueStatus, events: &[VenueEvent]) -> VenueStatus {
    events.iter().fold(start, |status, event| transition(status, *event))
}

fn expected_after(event: VenueEvent) -> VenueStatus {
    match event {
        VenueEvent::BookingCreated => VenueStatus::Rented,
        VenueEvent::BookingCancelled => VenueStatus::Available,
        VenueEvent::Purchased => VenueStatus::Sold,
    }
}

proptest! {
    #[test]
    fn prop_last_event_decides_status(
        start in arb_status(),
        events in proptest::collection::vec(arb_event(), 1..20),
    ) {
        let last = *events.last().unwrap();
        prop_assert_eq!(apply_all(start, &events), expected_after(last));
    }

    #[test]
    fn prop_no_events_keeps_status(start in arb_status()) {
        prop_assert_eq!(apply_all(start, &[]), start);
    }

    #[test]
    fn prop_purchase_always_sells(start in arb_status()) {
        prop_assert_eq!(transition(start, VenueEvent::Purchased), VenueStatus::Sold);
    }
}
