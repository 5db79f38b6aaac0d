// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod baggage_tests;
mod booking_tests;
mod gate_tests;

use airops_domain::{Baggage, Booking, BookingStatus, Flight, FlightCode, Passenger, Role, User};
use diesel::prelude::*;
use time::{Date, Month, Time};

use crate::{BackendConnection, Persistence};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Returns March 14, 2026, the date every test flight departs on.
pub fn create_test_date() -> Date {
    Date::from_calendar_date(2026, Month::March, 14).expect("Valid test date")
}

/// Builds an unpersisted scheduled flight with no gate.
pub fn create_test_flight(code: &str, total_seats: u32) -> Flight {
    Flight::new(
        FlightCode::new(code),
        String::from("Airops Air"),
        String::from("FCO"),
        String::from("LIN"),
        create_test_date(),
        Time::from_hms(9, 30, 0).expect("Valid test time"),
        total_seats,
    )
}

/// Persists a scheduled flight with `total_seats` seats.
pub fn seed_flight(persistence: &mut Persistence, code: &str, total_seats: u32) {
    persistence
        .create_flight(&create_test_flight(code, total_seats))
        .expect("Failed to create test flight");
}

/// Persists a user with [`TEST_PASSWORD`].
pub fn seed_user(persistence: &mut Persistence, login: &str, role: Role) -> User {
    let user: User = User {
        login: login.to_string(),
        name: String::from("Test"),
        surname: String::from("User"),
        role,
    };
    persistence
        .create_user(&user, TEST_PASSWORD)
        .expect("Failed to create test user");
    user
}

/// Builds a pending booking with no baggage.
pub fn create_test_booking(
    ticket_number: &str,
    flight_code: &str,
    seat_label: &str,
    owner_login: &str,
    document_number: &str,
) -> Booking {
    Booking {
        ticket_number: ticket_number.to_string(),
        flight_code: FlightCode::new(flight_code),
        seat_label: seat_label.parse().expect("Valid seat label"),
        status: BookingStatus::Pending,
        owner_login: owner_login.to_string(),
        passenger: Passenger::new(
            String::from("Ada"),
            String::from("Lovelace"),
            document_number.to_string(),
        ),
        baggage: Vec::new(),
    }
}

/// Builds a pending booking carrying freshly checked-in baggage.
pub fn create_test_booking_with_baggage(
    ticket_number: &str,
    flight_code: &str,
    seat_label: &str,
    owner_login: &str,
    document_number: &str,
    baggage_codes: &[&str],
) -> Booking {
    let mut booking: Booking = create_test_booking(
        ticket_number,
        flight_code,
        seat_label,
        owner_login,
        document_number,
    );
    booking.baggage = baggage_codes
        .iter()
        .map(|code| Baggage::checked_in((*code).to_string()))
        .collect();
    booking
}

/// Returns the flight's stored available seat counter.
pub fn available_seats(persistence: &mut Persistence, flight_code: &str) -> u32 {
    persistence
        .get_flight(flight_code)
        .expect("Failed to read flight")
        .expect("Flight should exist")
        .available_seats
}

/// Runs raw SQL against the underlying connection.
pub fn execute_raw(persistence: &mut Persistence, sql: &str) -> usize {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => diesel::sql_query(sql)
            .execute(conn)
            .expect("Raw SQL failed"),
        #[cfg(feature = "mysql")]
        BackendConnection::Mysql(conn) => diesel::sql_query(sql)
            .execute(conn)
            .expect("Raw SQL failed"),
    }
}
