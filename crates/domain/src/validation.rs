// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input validation performed by callers before invoking the engine.
//!
//! The transaction engine assumes pre-validated input. These functions
//! are the single place where field-level rules live.

use crate::error::DomainError;
use crate::seat::MAX_SEATS;
use crate::types::{Booking, Flight, Passenger};
use std::collections::HashSet;

/// Minimum accepted document number length.
pub const MIN_DOCUMENT_LENGTH: usize = 5;

/// Maximum accepted document number length.
pub const MAX_DOCUMENT_LENGTH: usize = 20;

/// Maximum accepted delay (24 hours).
pub const MAX_DELAY_MINUTES: u32 = 24 * 60;

const MAX_CODE_LENGTH: usize = 16;

fn validate_code(value: &str, make_err: fn(String) -> DomainError) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(make_err(String::from("must not be empty")));
    }
    if value.len() > MAX_CODE_LENGTH {
        return Err(make_err(format!(
            "'{value}' exceeds {MAX_CODE_LENGTH} characters"
        )));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(make_err(format!(
            "'{value}' may only contain letters, digits, and '-'"
        )));
    }
    Ok(())
}

/// Validates a flight before insertion.
///
/// # Errors
///
/// Returns an error if any field is empty or the capacity is unsupported.
pub fn validate_flight(flight: &Flight) -> Result<(), DomainError> {
    validate_code(flight.code.value(), DomainError::InvalidFlightCode)?;

    if flight.carrier.trim().is_empty() {
        return Err(DomainError::InvalidCarrier(String::from(
            "Carrier must not be empty",
        )));
    }
    for airport in [&flight.origin, &flight.destination] {
        if airport.trim().is_empty() {
            return Err(DomainError::InvalidAirport(String::from(
                "Airport must not be empty",
            )));
        }
    }
    if flight.origin.trim().eq_ignore_ascii_case(flight.destination.trim()) {
        return Err(DomainError::SameOriginAndDestination(flight.origin.clone()));
    }
    if flight.total_seats == 0 || flight.total_seats > MAX_SEATS {
        return Err(DomainError::InvalidSeatCount {
            count: flight.total_seats,
            max: MAX_SEATS,
        });
    }
    validate_delay(flight.delay_minutes)?;
    Ok(())
}

/// Validates a delay value.
///
/// # Errors
///
/// Returns an error if the delay exceeds [`MAX_DELAY_MINUTES`].
pub const fn validate_delay(minutes: u32) -> Result<(), DomainError> {
    if minutes > MAX_DELAY_MINUTES {
        return Err(DomainError::InvalidDelay { minutes });
    }
    Ok(())
}

/// Validates a passenger's identity fields.
///
/// # Errors
///
/// Returns an error if a name is empty or the document number is not
/// `MIN_DOCUMENT_LENGTH..=MAX_DOCUMENT_LENGTH` ASCII alphanumerics.
pub fn validate_passenger(passenger: &Passenger) -> Result<(), DomainError> {
    if passenger.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Passenger name must not be empty",
        )));
    }
    if passenger.surname.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Passenger surname must not be empty",
        )));
    }
    validate_document_number(&passenger.document_number)
}

/// Validates a passenger document number.
///
/// # Errors
///
/// Returns an error if the length or character set is invalid.
pub fn validate_document_number(document_number: &str) -> Result<(), DomainError> {
    let len: usize = document_number.len();
    if !(MIN_DOCUMENT_LENGTH..=MAX_DOCUMENT_LENGTH).contains(&len) {
        return Err(DomainError::InvalidDocumentNumber {
            document_number: document_number.to_string(),
            reason: format!(
                "length must be between {MIN_DOCUMENT_LENGTH} and {MAX_DOCUMENT_LENGTH}"
            ),
        });
    }
    if !document_number.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidDocumentNumber {
            document_number: document_number.to_string(),
            reason: String::from("only letters and digits are allowed"),
        });
    }
    Ok(())
}

/// Validates a baggage code.
///
/// # Errors
///
/// Returns an error if the code is empty, too long, or has invalid characters.
pub fn validate_baggage_code(code: &str) -> Result<(), DomainError> {
    validate_code(code, DomainError::InvalidBaggageCode)
}

/// Validates a booking before it is handed to the transaction engine.
///
/// # Errors
///
/// Returns an error if any field is invalid or two baggage items share a code.
pub fn validate_booking(booking: &Booking) -> Result<(), DomainError> {
    validate_code(booking.flight_code.value(), DomainError::InvalidFlightCode)?;
    validate_code(&booking.ticket_number, DomainError::InvalidTicketNumber)?;

    if booking.owner_login.trim().is_empty() {
        return Err(DomainError::InvalidLogin(String::from(
            "Owner login must not be empty",
        )));
    }

    validate_passenger(&booking.passenger)?;

    let mut seen: HashSet<&str> = HashSet::new();
    for item in &booking.baggage {
        validate_baggage_code(&item.code)?;
        if !seen.insert(item.code.as_str()) {
            return Err(DomainError::DuplicateBaggageCode(item.code.clone()));
        }
    }
    Ok(())
}

/// Validates a user login.
///
/// # Errors
///
/// Returns an error if the login is empty or contains whitespace.
pub fn validate_login(login: &str) -> Result<(), DomainError> {
    if login.is_empty() {
        return Err(DomainError::InvalidLogin(String::from(
            "Login must not be empty",
        )));
    }
    if login.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidLogin(format!(
            "'{login}' must not contain whitespace"
        )));
    }
    Ok(())
}

/// Validates a gate number.
///
/// # Errors
///
/// Returns an error if the gate number is zero.
pub const fn validate_gate_number(number: u32) -> Result<(), DomainError> {
    if number == 0 {
        return Err(DomainError::InvalidGateNumber(number));
    }
    Ok(())
}
