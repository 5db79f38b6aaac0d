// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use airops_domain::{Role, User};
use airops_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateBookingRequest, CreateFlightRequest, PassengerInfo, create_flight,
};

/// A password that satisfies the default credential policy.
pub const VALID_PASSWORD: &str = "Tower-Control-42";

fn seed_user(persistence: &mut Persistence, login: &str, role: Role) -> AuthenticatedActor {
    let user: User = User {
        login: login.to_string(),
        name: String::from("Test"),
        surname: String::from("User"),
        role,
    };
    persistence
        .create_user(&user, VALID_PASSWORD)
        .expect("Failed to create test user");
    AuthenticatedActor::from(&user)
}

/// Opens an in-memory store holding one Administrator (`ops`) and one
/// Generic user (`agent`).
pub fn setup() -> (Persistence, AuthenticatedActor, AuthenticatedActor) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin: AuthenticatedActor = seed_user(&mut persistence, "ops", Role::Administrator);
    let agent: AuthenticatedActor = seed_user(&mut persistence, "agent", Role::Generic);
    (persistence, admin, agent)
}

/// Adds another Generic user.
pub fn seed_agent(persistence: &mut Persistence, login: &str) -> AuthenticatedActor {
    seed_user(persistence, login, Role::Generic)
}

pub fn create_flight_request(code: &str, total_seats: u32) -> CreateFlightRequest {
    CreateFlightRequest {
        code: code.to_string(),
        carrier: String::from("Airops Air"),
        origin: String::from("FCO"),
        destination: String::from("LIN"),
        date: String::from("2026-03-14"),
        departure_time: String::from("09:30"),
        total_seats,
    }
}

/// Creates a flight through the handler as `admin`.
pub fn seed_flight(
    persistence: &mut Persistence,
    admin: &AuthenticatedActor,
    code: &str,
    total_seats: u32,
) {
    create_flight(persistence, &create_flight_request(code, total_seats), admin)
        .expect("Failed to create test flight");
}

pub fn booking_request(
    ticket_number: &str,
    flight_code: &str,
    seat_label: &str,
    document_number: &str,
    baggage_codes: &[&str],
) -> CreateBookingRequest {
    CreateBookingRequest {
        ticket_number: ticket_number.to_string(),
        flight_code: flight_code.to_string(),
        seat_label: seat_label.to_string(),
        status: None,
        passenger: PassengerInfo {
            name: String::from("Grace"),
            surname: String::from("Hopper"),
            document_number: document_number.to_string(),
        },
        baggage_codes: baggage_codes.iter().map(|code| (*code).to_string()).collect(),
    }
}
