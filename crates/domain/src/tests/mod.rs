// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod validation;

use crate::{Baggage, Booking, BookingStatus, Flight, FlightCode, Passenger, SeatLabel};
use time::macros::{date, time};

pub fn create_test_flight(total_seats: u32) -> Flight {
    Flight::new(
        FlightCode::new("az1234"),
        String::from("Alitalia"),
        String::from("FCO"),
        String::from("LIN"),
        date!(2026-03-14),
        time!(9:30),
        total_seats,
    )
}

pub fn create_test_booking() -> Booking {
    Booking {
        ticket_number: String::from("TK-0001"),
        flight_code: FlightCode::new("AZ1234"),
        seat_label: SeatLabel::new(1, 'A').expect("valid seat"),
        status: BookingStatus::Confirmed,
        owner_login: String::from("agent"),
        passenger: Passenger::new(
            String::from("Ada"),
            String::from("Lovelace"),
            String::from("YA1234567"),
        ),
        baggage: vec![Baggage::checked_in(String::from("BG-1"))],
    }
}
