// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use airops_domain::DomainError;
use airops_persistence::PersistenceError;

use crate::credential_policy::CredentialPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The request lost against the current state of the store.
    Conflict {
        /// The guard that rejected the request.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Credential policy violation.
    CredentialPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Conflict { rule, message } => write!(f, "Conflict ({rule}): {message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::CredentialPolicyViolation { message } => {
                write!(f, "Credential policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CredentialPolicyError> for ApiError {
    fn from(err: CredentialPolicyError) -> Self {
        Self::CredentialPolicyViolation {
            message: err.to_string(),
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFlightCode(msg) => invalid("flight_code", msg),
        DomainError::InvalidCarrier(msg) => invalid("carrier", msg),
        DomainError::InvalidAirport(msg) => invalid("airport", msg),
        DomainError::SameOriginAndDestination(airport) => ApiError::DomainRuleViolation {
            rule: String::from("distinct_endpoints"),
            message: format!("Origin and destination are both '{airport}'"),
        },
        DomainError::InvalidSeatCount { count, max } => invalid(
            "total_seats",
            format!("Invalid seat count: {count}. Must be between 1 and {max}"),
        ),
        DomainError::InvalidSeatLabel(label) => {
            invalid("seat_label", format!("Invalid seat label: '{label}'"))
        }
        DomainError::InvalidName(msg) => invalid("name", msg),
        DomainError::InvalidDocumentNumber {
            document_number,
            reason,
        } => invalid(
            "document_number",
            format!("'{document_number}' rejected: {reason}"),
        ),
        DomainError::InvalidTicketNumber(msg) => invalid("ticket_number", msg),
        DomainError::InvalidBaggageCode(msg) => invalid("baggage_code", msg),
        DomainError::DuplicateBaggageCode(code) => ApiError::DomainRuleViolation {
            rule: String::from("unique_baggage_code"),
            message: format!("Baggage code '{code}' appears more than once"),
        },
        DomainError::InvalidLogin(msg) => invalid("login", msg),
        DomainError::InvalidGateNumber(number) => {
            invalid("gate_number", format!("Invalid gate number: {number}"))
        }
        DomainError::InvalidDelay { minutes } => {
            invalid("delay_minutes", format!("Invalid delay: {minutes} minutes"))
        }
        DomainError::InvalidFlightStatus { status } => {
            invalid("status", format!("Unknown flight status '{status}'"))
        }
        DomainError::InvalidBookingStatus { status } => invalid(
            "status",
            format!("Booking status '{status}' is not allowed here"),
        ),
        DomainError::InvalidBaggageStatus { status } => {
            invalid("status", format!("Unknown baggage status '{status}'"))
        }
        DomainError::InvalidRole(role) => invalid(
            "role",
            format!("Invalid role: {role}. Must be 'Administrator' or 'Generic'"),
        ),
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_transition"),
                message: format!("Cannot move from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::DateParseError { input, error } => {
            invalid("date", format!("Failed to parse '{input}': {error}"))
        }
    }
}

fn conflict(rule: &str, err: &PersistenceError) -> ApiError {
    ApiError::Conflict {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

fn not_found(resource_type: &str, err: &PersistenceError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Guard rejections become conflicts, missing rows become not-found errors,
/// and everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match &err {
        PersistenceError::DomainViolation(domain_err) => {
            translate_domain_error(domain_err.clone())
        }
        PersistenceError::FlightSoldOut(_) => conflict("seat_available", &err),
        PersistenceError::SeatUnavailable { .. } => conflict("seat_free", &err),
        PersistenceError::DuplicateTicket(_) => conflict("unique_ticket", &err),
        PersistenceError::BookingAlreadyCancelled(_) => conflict("booking_live", &err),
        PersistenceError::DuplicateBaggageCode(_) => conflict("unique_baggage_code", &err),
        PersistenceError::GateOccupied { .. } => conflict("gate_free", &err),
        PersistenceError::FlightAlreadyExists(_) => conflict("unique_flight", &err),
        PersistenceError::GateAlreadyExists(_) => conflict("unique_gate", &err),
        PersistenceError::UserAlreadyExists(_) => conflict("unique_login", &err),
        PersistenceError::ConstraintViolation(_) => conflict("constraint", &err),
        PersistenceError::FlightNotFound(_) => not_found("Flight", &err),
        PersistenceError::SeatNotFound { .. } => not_found("Seat", &err),
        PersistenceError::TicketNotFound(_) => not_found("Booking", &err),
        PersistenceError::BaggageNotFound(_) => not_found("Baggage", &err),
        PersistenceError::GateNotFound(_) => not_found("Gate", &err),
        PersistenceError::UserNotFound(_) => not_found("User", &err),
        PersistenceError::NotFound(_) => not_found("Resource", &err),
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::InventoryInconsistent(_)
        | PersistenceError::Other(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
