// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::DomainError;
use airops_persistence::PersistenceError;

use crate::{ApiError, CredentialPolicyError, translate_domain_error, translate_persistence_error};

#[test]
fn test_guard_rejections_become_conflicts() {
    let errors: Vec<PersistenceError> = vec![
        PersistenceError::FlightSoldOut(String::from("AZ100")),
        PersistenceError::SeatUnavailable {
            flight_code: String::from("AZ100"),
            seat_label: String::from("1A"),
        },
        PersistenceError::DuplicateTicket(String::from("TK-1")),
        PersistenceError::BookingAlreadyCancelled(String::from("TK-1")),
        PersistenceError::GateOccupied {
            gate: 5,
            flight_code: String::from("AZ100"),
            date: String::from("2026-03-14"),
        },
    ];

    for err in errors {
        assert!(err.is_conflict(), "{err} should be a conflict");
        assert!(
            matches!(translate_persistence_error(err), ApiError::Conflict { .. }),
            "conflicts must translate to ApiError::Conflict"
        );
    }
}

#[test]
fn test_missing_rows_become_not_found() {
    let translated: ApiError =
        translate_persistence_error(PersistenceError::TicketNotFound(String::from("TK-9")));
    assert!(matches!(
        translated,
        ApiError::ResourceNotFound { resource_type, .. } if resource_type == "Booking"
    ));
}

#[test]
fn test_storage_failures_become_internal() {
    let translated: ApiError =
        translate_persistence_error(PersistenceError::QueryFailed(String::from("disk I/O")));
    assert!(matches!(translated, ApiError::Internal { .. }));

    let translated: ApiError = translate_persistence_error(
        PersistenceError::InventoryInconsistent(String::from("counter at capacity")),
    );
    assert!(matches!(translated, ApiError::Internal { .. }));
}

#[test]
fn test_domain_violation_inside_persistence_error_is_unwrapped() {
    let translated: ApiError = translate_persistence_error(PersistenceError::DomainViolation(
        DomainError::InvalidDelay { minutes: 9000 },
    ));
    assert!(matches!(
        translated,
        ApiError::InvalidInput { field, .. } if field == "delay_minutes"
    ));
}

#[test]
fn test_status_transition_is_rule_violation() {
    let translated: ApiError = translate_domain_error(DomainError::InvalidStatusTransition {
        from: String::from("lost"),
        to: String::from("loaded"),
        reason: String::from("lost baggage cannot change status"),
    });
    assert_eq!(
        translated.to_string(),
        "Domain rule violation (status_transition): Cannot move from 'lost' to 'loaded': lost baggage cannot change status"
    );
}

#[test]
fn test_credential_policy_error_converts() {
    let err: ApiError = CredentialPolicyError::TooShort { min_length: 12 }.into();
    assert_eq!(
        err,
        ApiError::CredentialPolicyViolation {
            message: String::from("Password must be at least 12 characters long")
        }
    );
}
