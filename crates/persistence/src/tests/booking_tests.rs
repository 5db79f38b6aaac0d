// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking creation: the happy path, passenger reuse, and rollback of every
//! failure mode.

use airops_domain::{BaggageStatus, Booking, BookingStatus, DomainError, Passenger, Role};

use super::{
    available_seats, create_test_booking, create_test_booking_with_baggage, execute_raw,
    seed_flight, seed_user,
};
use crate::{BookingReceipt, BookingView, Persistence, PersistenceError};

fn setup() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    seed_flight(&mut persistence, "AZ100", 6);
    seed_user(&mut persistence, "agent", Role::Generic);
    persistence
}

/// Asserts that nothing from a failed booking attempt was persisted.
fn assert_untouched(persistence: &mut Persistence, ticket: &str, seat_free: bool) {
    assert!(persistence.get_booking(ticket).unwrap().is_none());
    assert_eq!(available_seats(persistence, "AZ100"), 6);
    let occupied: u32 = persistence.count_occupied_seats("AZ100").unwrap();
    assert_eq!(occupied, u32::from(!seat_free));
}

#[test]
fn test_create_booking_persists_every_part() {
    let mut persistence = setup();
    let booking: Booking = create_test_booking_with_baggage(
        "TK-1",
        "AZ100",
        "1A",
        "agent",
        "DOC00001",
        &["BAG-1", "BAG-2"],
    );

    let receipt: BookingReceipt = persistence.create_booking(&booking).unwrap();

    assert_eq!(receipt.ticket_number, "TK-1");
    assert_eq!(available_seats(&mut persistence, "AZ100"), 5);
    assert_eq!(persistence.count_occupied_seats("AZ100").unwrap(), 1);

    let view: BookingView = persistence.get_booking("TK-1").unwrap().unwrap();
    assert_eq!(view.booking_id, receipt.booking_id);
    assert_eq!(view.booking.status, BookingStatus::Pending);
    assert_eq!(view.booking.seat_label.to_string(), "1A");
    assert_eq!(view.booking.owner_login, "agent");
    assert_eq!(
        view.booking.passenger.passenger_id,
        Some(receipt.passenger_id)
    );
    assert_eq!(view.booking.baggage.len(), 2);
    assert!(
        view.booking
            .baggage
            .iter()
            .all(|item| item.status == BaggageStatus::Processing)
    );
    assert_eq!(view.flight.available_seats, 5);

    let bag = persistence.get_baggage("BAG-1").unwrap().unwrap();
    assert_eq!(bag.booking_id, Some(receipt.booking_id));
}

#[test]
fn test_create_confirmed_booking() {
    let mut persistence = setup();
    let mut booking: Booking = create_test_booking("TK-1", "AZ100", "1A", "agent", "DOC00001");
    booking.status = BookingStatus::Confirmed;

    persistence.create_booking(&booking).unwrap();

    let view: BookingView = persistence.get_booking("TK-1").unwrap().unwrap();
    assert_eq!(view.booking.status, BookingStatus::Confirmed);
}

#[test]
fn test_create_cancelled_booking_is_rejected() {
    let mut persistence = setup();
    let mut booking: Booking = create_test_booking("TK-1", "AZ100", "1A", "agent", "DOC00001");
    booking.status = BookingStatus::Cancelled;

    let result = persistence.create_booking(&booking);

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidBookingStatus { .. }
        ))
    ));
    assert_untouched(&mut persistence, "TK-1", true);
    assert_eq!(persistence.count_passengers().unwrap(), 0);
}

#[test]
fn test_known_document_reuses_passenger() {
    let mut persistence = setup();
    let first: BookingReceipt = persistence
        .create_booking(&create_test_booking(
            "TK-1", "AZ100", "1A", "agent", "DOC00001",
        ))
        .unwrap();

    let mut second: Booking = create_test_booking("TK-2", "AZ100", "1B", "agent", "DOC00001");
    second.passenger = Passenger::new(
        String::from("Augusta"),
        String::from("King"),
        String::from("DOC00001"),
    );
    let second: BookingReceipt = persistence.create_booking(&second).unwrap();

    assert_eq!(first.passenger_id, second.passenger_id);
    assert_eq!(persistence.count_passengers().unwrap(), 1);

    let stored: Passenger = persistence
        .find_passenger_by_document("DOC00001")
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Ada");
}

#[test]
fn test_distinct_documents_create_distinct_passengers() {
    let mut persistence = setup();
    let first: BookingReceipt = persistence
        .create_booking(&create_test_booking(
            "TK-1", "AZ100", "1A", "agent", "DOC00001",
        ))
        .unwrap();
    let second: BookingReceipt = persistence
        .create_booking(&create_test_booking(
            "TK-2", "AZ100", "1B", "agent", "DOC00002",
        ))
        .unwrap();

    assert_ne!(first.passenger_id, second.passenger_id);
    assert_eq!(persistence.count_passengers().unwrap(), 2);
}

#[test]
fn test_occupied_seat_rolls_back_passenger_and_baggage() {
    let mut persistence = setup();
    persistence.occupy_seat("AZ100", "1A").unwrap();

    let result = persistence.create_booking(&create_test_booking_with_baggage(
        "TK-1",
        "AZ100",
        "1A",
        "agent",
        "DOC00001",
        &["BAG-1"],
    ));

    assert_eq!(
        result,
        Err(PersistenceError::SeatUnavailable {
            flight_code: String::from("AZ100"),
            seat_label: String::from("1A"),
        })
    );
    assert_untouched(&mut persistence, "TK-1", false);
    assert_eq!(persistence.count_passengers().unwrap(), 0);
    assert!(persistence.get_baggage("BAG-1").unwrap().is_none());
}

#[test]
fn test_sold_out_flight_rejects_booking() {
    let mut persistence = setup();
    execute_raw(
        &mut persistence,
        "UPDATE flights SET available_seats = 0 WHERE code = 'AZ100'",
    );

    let result = persistence.create_booking(&create_test_booking(
        "TK-1", "AZ100", "1A", "agent", "DOC00001",
    ));

    assert_eq!(result, Err(PersistenceError::FlightSoldOut(String::from("AZ100"))));
    assert!(persistence.get_booking("TK-1").unwrap().is_none());
    assert_eq!(available_seats(&mut persistence, "AZ100"), 0);
    assert_eq!(persistence.count_occupied_seats("AZ100").unwrap(), 0);
    assert_eq!(persistence.count_passengers().unwrap(), 0);
}

#[test]
fn test_full_flight_rejects_next_booking() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    seed_flight(&mut persistence, "AZ100", 2);
    seed_user(&mut persistence, "agent", Role::Generic);
    persistence
        .create_booking(&create_test_booking(
            "TK-1", "AZ100", "1A", "agent", "DOC00001",
        ))
        .unwrap();
    persistence
        .create_booking(&create_test_booking(
            "TK-2", "AZ100", "1B", "agent", "DOC00002",
        ))
        .unwrap();

    let result = persistence.create_booking(&create_test_booking(
        "TK-3", "AZ100", "1A", "agent", "DOC00003",
    ));

    assert_eq!(result, Err(PersistenceError::FlightSoldOut(String::from("AZ100"))));
    assert_eq!(available_seats(&mut persistence, "AZ100"), 0);
}

#[test]
fn test_duplicate_ticket_is_rejected() {
    let mut persistence = setup();
    persistence
        .create_booking(&create_test_booking(
            "TK-1", "AZ100", "1A", "agent", "DOC00001",
        ))
        .unwrap();

    let result = persistence.create_booking(&create_test_booking(
        "TK-1", "AZ100", "1B", "agent", "DOC00002",
    ));

    assert_eq!(result, Err(PersistenceError::DuplicateTicket(String::from("TK-1"))));
    assert_eq!(available_seats(&mut persistence, "AZ100"), 5);
    assert_eq!(persistence.count_occupied_seats("AZ100").unwrap(), 1);
    assert!(persistence.find_passenger_by_document("DOC00002").unwrap().is_none());
}

#[test]
fn test_duplicate_baggage_code_is_rejected() {
    let mut persistence = setup();
    persistence
        .create_booking(&create_test_booking_with_baggage(
            "TK-1",
            "AZ100",
            "1A",
            "agent",
            "DOC00001",
            &["BAG-1"],
        ))
        .unwrap();

    let result = persistence.create_booking(&create_test_booking_with_baggage(
        "TK-2",
        "AZ100",
        "1B",
        "agent",
        "DOC00002",
        &["BAG-2", "BAG-1"],
    ));

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateBaggageCode(String::from("BAG-1")))
    );
    assert!(persistence.get_booking("TK-2").unwrap().is_none());
    assert!(persistence.get_baggage("BAG-2").unwrap().is_none());
    assert_eq!(available_seats(&mut persistence, "AZ100"), 5);
}

#[test]
fn test_baggage_registered_without_booking_blocks_code_reuse() {
    let mut persistence = setup();
    persistence
        .register_baggage(&airops_domain::Baggage::checked_in(String::from("BAG-1")))
        .unwrap();

    let result = persistence.create_booking(&create_test_booking_with_baggage(
        "TK-1",
        "AZ100",
        "1A",
        "agent",
        "DOC00001",
        &["BAG-1"],
    ));

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateBaggageCode(String::from("BAG-1")))
    );
    assert_untouched(&mut persistence, "TK-1", true);
}

#[test]
fn test_unknown_flight_is_not_found() {
    let mut persistence = setup();

    let result = persistence.create_booking(&create_test_booking(
        "TK-1", "ZZ999", "1A", "agent", "DOC00001",
    ));

    assert_eq!(result, Err(PersistenceError::FlightNotFound(String::from("ZZ999"))));
    assert_eq!(persistence.count_passengers().unwrap(), 0);
}

#[test]
fn test_unknown_owner_is_not_found() {
    let mut persistence = setup();

    let result = persistence.create_booking(&create_test_booking(
        "TK-1", "AZ100", "1A", "ghost", "DOC00001",
    ));

    assert_eq!(result, Err(PersistenceError::UserNotFound(String::from("ghost"))));
    assert_untouched(&mut persistence, "TK-1", true);
}

#[test]
fn test_unknown_seat_is_not_found() {
    let mut persistence = setup();

    let result = persistence.create_booking(&create_test_booking(
        "TK-1", "AZ100", "7A", "agent", "DOC00001",
    ));

    assert!(matches!(result, Err(PersistenceError::SeatNotFound { .. })));
    assert_untouched(&mut persistence, "TK-1", true);
    assert_eq!(persistence.count_passengers().unwrap(), 0);
}

#[test]
fn test_failures_are_classified_as_conflicts() {
    let mut persistence = setup();
    persistence.occupy_seat("AZ100", "1A").unwrap();

    let err: PersistenceError = persistence
        .create_booking(&create_test_booking(
            "TK-1", "AZ100", "1A", "agent", "DOC00001",
        ))
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(!PersistenceError::FlightNotFound(String::from("AZ100")).is_conflict());
}
