// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_booking, create_test_flight};
use crate::{
    Baggage, Booking, DomainError, Flight, MAX_DELAY_MINUTES, MAX_SEATS, validate_booking,
    validate_delay, validate_document_number, validate_flight, validate_gate_number,
    validate_login,
};

#[test]
fn test_validate_flight_accepts_valid_flight() {
    let flight: Flight = create_test_flight(16);
    assert!(validate_flight(&flight).is_ok());
    assert_eq!(flight.code.value(), "AZ1234");
    assert_eq!(flight.available_seats, 16);
    assert_eq!(flight.occupied_seats(), 0);
}

#[test]
fn test_validate_flight_rejects_bad_capacity() {
    let flight: Flight = create_test_flight(0);
    assert!(matches!(
        validate_flight(&flight),
        Err(DomainError::InvalidSeatCount { count: 0, .. })
    ));

    let flight: Flight = create_test_flight(MAX_SEATS + 1);
    assert!(matches!(
        validate_flight(&flight),
        Err(DomainError::InvalidSeatCount { .. })
    ));
}

#[test]
fn test_validate_flight_rejects_same_origin_and_destination() {
    let mut flight: Flight = create_test_flight(6);
    flight.destination = String::from("fco");
    assert!(matches!(
        validate_flight(&flight),
        Err(DomainError::SameOriginAndDestination(_))
    ));
}

#[test]
fn test_validate_flight_rejects_empty_carrier() {
    let mut flight: Flight = create_test_flight(6);
    flight.carrier = String::from("  ");
    assert!(matches!(
        validate_flight(&flight),
        Err(DomainError::InvalidCarrier(_))
    ));
}

#[test]
fn test_validate_booking_accepts_valid_booking() {
    let booking: Booking = create_test_booking();
    assert!(validate_booking(&booking).is_ok());
}

#[test]
fn test_validate_booking_rejects_empty_passenger_name() {
    let mut booking: Booking = create_test_booking();
    booking.passenger.name = String::new();
    assert!(matches!(
        validate_booking(&booking),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_booking_rejects_duplicate_baggage_codes() {
    let mut booking: Booking = create_test_booking();
    booking.baggage.push(Baggage::checked_in(String::from("BG-1")));
    assert!(matches!(
        validate_booking(&booking),
        Err(DomainError::DuplicateBaggageCode(code)) if code == "BG-1"
    ));
}

#[test]
fn test_validate_booking_rejects_empty_ticket_and_owner() {
    let mut booking: Booking = create_test_booking();
    booking.ticket_number = String::new();
    assert!(matches!(
        validate_booking(&booking),
        Err(DomainError::InvalidTicketNumber(_))
    ));

    let mut booking: Booking = create_test_booking();
    booking.owner_login = String::from(" ");
    assert!(matches!(
        validate_booking(&booking),
        Err(DomainError::InvalidLogin(_))
    ));
}

#[test]
fn test_validate_document_number_length_and_charset() {
    assert!(validate_document_number("AB123").is_ok());
    assert!(validate_document_number("A1B2C3D4E5F6G7H8I9J0").is_ok());
    assert!(matches!(
        validate_document_number("AB12"),
        Err(DomainError::InvalidDocumentNumber { .. })
    ));
    assert!(matches!(
        validate_document_number("A1B2C3D4E5F6G7H8I9J0K"),
        Err(DomainError::InvalidDocumentNumber { .. })
    ));
    assert!(matches!(
        validate_document_number("AB 1234"),
        Err(DomainError::InvalidDocumentNumber { .. })
    ));
}

#[test]
fn test_validate_delay_bounds() {
    assert!(validate_delay(0).is_ok());
    assert!(validate_delay(MAX_DELAY_MINUTES).is_ok());
    assert_eq!(
        validate_delay(MAX_DELAY_MINUTES + 1),
        Err(DomainError::InvalidDelay {
            minutes: MAX_DELAY_MINUTES + 1
        })
    );
}

#[test]
fn test_validate_login_and_gate() {
    assert!(validate_login("agent.one").is_ok());
    assert!(matches!(validate_login(""), Err(DomainError::InvalidLogin(_))));
    assert!(matches!(
        validate_login("agent one"),
        Err(DomainError::InvalidLogin(_))
    ));
    assert!(validate_gate_number(12).is_ok());
    assert_eq!(validate_gate_number(0), Err(DomainError::InvalidGateNumber(0)));
}
