// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gate creation and the one-active-flight-per-gate-per-date rule.

use airops_domain::{Flight, FlightStatus, Gate};
use time::Month;

use super::{create_test_flight, seed_flight};
use crate::{Persistence, PersistenceError};

fn setup() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_gate(7).unwrap();
    persistence.create_gate(8).unwrap();
    seed_flight(&mut persistence, "AZ100", 6);
    seed_flight(&mut persistence, "AZ200", 6);
    persistence
}

fn gate_of(persistence: &mut Persistence, flight_code: &str) -> Option<u32> {
    persistence.get_flight(flight_code).unwrap().unwrap().gate
}

#[test]
fn test_create_and_list_gates() {
    let mut persistence = setup();

    let gates: Vec<Gate> = persistence.list_gates().unwrap();

    assert_eq!(gates, vec![Gate { number: 7 }, Gate { number: 8 }]);
}

#[test]
fn test_duplicate_gate_is_rejected() {
    let mut persistence = setup();

    assert_eq!(
        persistence.create_gate(7),
        Err(PersistenceError::GateAlreadyExists(7))
    );
}

#[test]
fn test_assign_and_clear_gate() {
    let mut persistence = setup();

    persistence.assign_gate("AZ100", Some(7)).unwrap();
    assert_eq!(gate_of(&mut persistence, "AZ100"), Some(7));

    persistence.assign_gate("AZ100", None).unwrap();
    assert_eq!(gate_of(&mut persistence, "AZ100"), None);
}

#[test]
fn test_reassigning_same_flight_is_allowed() {
    let mut persistence = setup();
    persistence.assign_gate("AZ100", Some(7)).unwrap();

    persistence.assign_gate("AZ100", Some(7)).unwrap();

    assert_eq!(gate_of(&mut persistence, "AZ100"), Some(7));
}

#[test]
fn test_gate_held_by_active_flight_is_occupied() {
    let mut persistence = setup();
    persistence.assign_gate("AZ100", Some(7)).unwrap();

    let result = persistence.assign_gate("AZ200", Some(7));

    assert_eq!(
        result,
        Err(PersistenceError::GateOccupied {
            gate: 7,
            flight_code: String::from("AZ100"),
            date: String::from("2026-03-14"),
        })
    );
    assert_eq!(gate_of(&mut persistence, "AZ200"), None);
}

#[test]
fn test_gate_is_free_on_another_date() {
    let mut persistence = setup();
    persistence.assign_gate("AZ100", Some(7)).unwrap();
    let mut flight: Flight = create_test_flight("AZ300", 6);
    flight.date = flight.date.replace_month(Month::April).unwrap();
    flight.gate = Some(7);

    persistence.create_flight(&flight).unwrap();

    assert_eq!(gate_of(&mut persistence, "AZ300"), Some(7));
}

#[test]
fn test_departed_flight_frees_its_gate() {
    let mut persistence = setup();
    persistence.assign_gate("AZ100", Some(7)).unwrap();
    persistence
        .update_flight_status("AZ100", FlightStatus::Departed)
        .unwrap();

    persistence.assign_gate("AZ200", Some(7)).unwrap();

    assert_eq!(gate_of(&mut persistence, "AZ200"), Some(7));
}

#[test]
fn test_reactivating_flight_rechecks_its_gate() {
    let mut persistence = setup();
    persistence.assign_gate("AZ100", Some(7)).unwrap();
    persistence
        .update_flight_status("AZ100", FlightStatus::Cancelled)
        .unwrap();
    persistence.assign_gate("AZ200", Some(7)).unwrap();

    let result = persistence.update_flight_status("AZ100", FlightStatus::Scheduled);

    assert!(matches!(result, Err(PersistenceError::GateOccupied { .. })));
    let stored: Flight = persistence.get_flight("AZ100").unwrap().unwrap();
    assert_eq!(stored.status, FlightStatus::Cancelled);
}

#[test]
fn test_unknown_gate_is_not_found() {
    let mut persistence = setup();

    assert_eq!(
        persistence.assign_gate("AZ100", Some(99)),
        Err(PersistenceError::GateNotFound(99))
    );
}

#[test]
fn test_flight_created_at_occupied_gate_is_rolled_back() {
    let mut persistence = setup();
    persistence.assign_gate("AZ100", Some(7)).unwrap();
    let mut flight: Flight = create_test_flight("AZ300", 6);
    flight.gate = Some(7);

    let result = persistence.create_flight(&flight);

    assert!(matches!(result, Err(PersistenceError::GateOccupied { .. })));
    assert!(persistence.get_flight("AZ300").unwrap().is_none());
    assert!(persistence.list_seats("AZ300").unwrap().is_empty());
}

#[test]
fn test_assign_gate_to_unknown_flight_is_not_found() {
    let mut persistence = setup();

    assert_eq!(
        persistence.assign_gate("ZZ999", Some(7)),
        Err(PersistenceError::FlightNotFound(String::from("ZZ999")))
    );
}
