// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Baggage registration and status updates under both transition policies.

use airops_domain::{Baggage, BaggageStatus, DomainError, Role, TransitionPolicy};

use super::{create_test_booking_with_baggage, seed_flight, seed_user};
use crate::{BaggageRecord, Persistence, PersistenceError};

/// Two flights: `AZ100` carries `A-1`, `A-2`, `A-3`; `AZ200` carries `B-1`.
fn setup(policy: TransitionPolicy) -> Persistence {
    let mut persistence = Persistence::new_in_memory()
        .unwrap()
        .with_baggage_policy(policy);
    seed_flight(&mut persistence, "AZ100", 6);
    seed_flight(&mut persistence, "AZ200", 6);
    seed_user(&mut persistence, "agent", Role::Generic);
    persistence
        .create_booking(&create_test_booking_with_baggage(
            "TK-1",
            "AZ100",
            "1A",
            "agent",
            "DOC00001",
            &["A-1", "A-2"],
        ))
        .unwrap();
    persistence
        .create_booking(&create_test_booking_with_baggage(
            "TK-2",
            "AZ100",
            "1B",
            "agent",
            "DOC00002",
            &["A-3"],
        ))
        .unwrap();
    persistence
        .create_booking(&create_test_booking_with_baggage(
            "TK-3",
            "AZ200",
            "1A",
            "agent",
            "DOC00003",
            &["B-1"],
        ))
        .unwrap();
    persistence
}

fn status_of(persistence: &mut Persistence, code: &str) -> BaggageStatus {
    persistence
        .get_baggage(code)
        .unwrap()
        .unwrap()
        .baggage
        .status
}

#[test]
fn test_default_policy_is_unchecked() {
    let persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(persistence.baggage_policy(), TransitionPolicy::Unchecked);
}

#[test]
fn test_register_standalone_baggage() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .register_baggage(&Baggage::checked_in(String::from("LOOSE-1")))
        .unwrap();

    let record: BaggageRecord = persistence.get_baggage("LOOSE-1").unwrap().unwrap();
    assert_eq!(record.booking_id, None);
    assert_eq!(record.baggage.status, BaggageStatus::Processing);
}

#[test]
fn test_register_duplicate_code_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let item: Baggage = Baggage::checked_in(String::from("LOOSE-1"));
    persistence.register_baggage(&item).unwrap();

    let result = persistence.register_baggage(&item);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateBaggageCode(String::from(
            "LOOSE-1"
        )))
    );
}

#[test]
fn test_unchecked_policy_accepts_any_status() {
    let mut persistence = setup(TransitionPolicy::Unchecked);

    persistence
        .update_baggage_status("A-1", BaggageStatus::Collectable)
        .unwrap();
    persistence
        .update_baggage_status("A-1", BaggageStatus::Processing)
        .unwrap();

    assert_eq!(status_of(&mut persistence, "A-1"), BaggageStatus::Processing);
}

#[test]
fn test_enforced_policy_follows_lifecycle() {
    let mut persistence = setup(TransitionPolicy::Enforced);

    persistence
        .update_baggage_status("A-1", BaggageStatus::Loaded)
        .unwrap();
    persistence
        .update_baggage_status("A-1", BaggageStatus::Collectable)
        .unwrap();
    persistence
        .update_baggage_status("A-1", BaggageStatus::Lost)
        .unwrap();

    assert_eq!(status_of(&mut persistence, "A-1"), BaggageStatus::Lost);
}

#[test]
fn test_enforced_policy_rejects_skipped_step() {
    let mut persistence = setup(TransitionPolicy::Enforced);

    let result = persistence.update_baggage_status("A-1", BaggageStatus::Collectable);

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
    assert_eq!(status_of(&mut persistence, "A-1"), BaggageStatus::Processing);
}

#[test]
fn test_enforced_policy_keeps_lost_baggage_lost() {
    let mut persistence = setup(TransitionPolicy::Enforced);
    persistence
        .update_baggage_status("A-1", BaggageStatus::Loaded)
        .unwrap();
    persistence
        .update_baggage_status("A-1", BaggageStatus::Lost)
        .unwrap();

    let result = persistence.update_baggage_status("A-1", BaggageStatus::Collectable);

    assert!(result.is_err());
    assert_eq!(status_of(&mut persistence, "A-1"), BaggageStatus::Lost);
}

#[test]
fn test_update_unknown_baggage_is_not_found() {
    let mut persistence = setup(TransitionPolicy::Unchecked);

    let result = persistence.update_baggage_status("NOPE", BaggageStatus::Loaded);

    assert_eq!(result, Err(PersistenceError::BaggageNotFound(String::from("NOPE"))));
}

#[test]
fn test_bulk_update_touches_only_the_flight() {
    let mut persistence = setup(TransitionPolicy::Unchecked);
    persistence
        .register_baggage(&Baggage::checked_in(String::from("LOOSE-1")))
        .unwrap();

    let updated: usize = persistence
        .update_flight_baggage_status("AZ100", BaggageStatus::Loaded)
        .unwrap();

    assert_eq!(updated, 3);
    for code in ["A-1", "A-2", "A-3"] {
        assert_eq!(status_of(&mut persistence, code), BaggageStatus::Loaded);
    }
    assert_eq!(status_of(&mut persistence, "B-1"), BaggageStatus::Processing);
    assert_eq!(
        status_of(&mut persistence, "LOOSE-1"),
        BaggageStatus::Processing
    );
}

#[test]
fn test_bulk_update_for_flight_without_bookings() {
    let mut persistence = setup(TransitionPolicy::Unchecked);
    seed_flight(&mut persistence, "AZ300", 6);

    let updated: usize = persistence
        .update_flight_baggage_status("AZ300", BaggageStatus::Loaded)
        .unwrap();

    assert_eq!(updated, 0);
}

#[test]
fn test_enforced_bulk_update_skips_items_out_of_sequence() {
    let mut persistence = setup(TransitionPolicy::Enforced);
    persistence
        .update_baggage_status("A-1", BaggageStatus::Loaded)
        .unwrap();

    let updated: usize = persistence
        .update_flight_baggage_status("AZ100", BaggageStatus::Collectable)
        .unwrap();

    assert_eq!(updated, 1);
    assert_eq!(status_of(&mut persistence, "A-1"), BaggageStatus::Collectable);
    assert_eq!(status_of(&mut persistence, "A-2"), BaggageStatus::Processing);
    assert_eq!(status_of(&mut persistence, "A-3"), BaggageStatus::Processing);
}

#[test]
fn test_enforced_bulk_update_to_processing_changes_nothing() {
    let mut persistence = setup(TransitionPolicy::Enforced);

    let updated: usize = persistence
        .update_flight_baggage_status("AZ100", BaggageStatus::Processing)
        .unwrap();

    assert_eq!(updated, 0);
}

#[test]
fn test_lost_baggage_report() {
    let mut persistence = setup(TransitionPolicy::Unchecked);
    persistence
        .update_baggage_status("B-1", BaggageStatus::Lost)
        .unwrap();
    persistence
        .update_baggage_status("A-2", BaggageStatus::Lost)
        .unwrap();

    let lost: Vec<BaggageRecord> = persistence.list_lost_baggage().unwrap();

    let codes: Vec<&str> = lost.iter().map(|record| record.baggage.code.as_str()).collect();
    assert_eq!(codes, vec!["A-2", "B-1"]);
    assert!(lost.iter().all(|record| record.booking_id.is_some()));
}
