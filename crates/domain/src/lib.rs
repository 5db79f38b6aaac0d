// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the airport operations backend.
//!
//! This crate holds the entity layer (flights, seats, passengers, bookings,
//! baggage, gates, users), the closed status enums with their lifecycle
//! rules, the deterministic seat layout, and field-level validation.
//! It has no knowledge of storage.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod seat;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use seat::{MAX_ROWS, MAX_SEATS, SEATS_PER_ROW, Seat, SeatLabel, generate_seat_labels, sort_seats};
pub use status::{BaggageStatus, BookingStatus, FlightStatus, TransitionPolicy};
pub use types::{
    Baggage, Booking, Flight, FlightCode, Gate, Passenger, Role, User, format_departure_time,
    format_flight_date, parse_departure_time, parse_flight_date,
};
pub use validation::{
    MAX_DELAY_MINUTES, MAX_DOCUMENT_LENGTH, MIN_DOCUMENT_LENGTH, validate_baggage_code,
    validate_booking, validate_delay, validate_document_number, validate_flight,
    validate_gate_number, validate_login, validate_passenger,
};
