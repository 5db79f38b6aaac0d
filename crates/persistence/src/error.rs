// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::DomainError;
use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A unique, foreign key, or check constraint rejected the statement.
    ConstraintViolation(String),
    /// A domain rule rejected the operation or a stored value.
    DomainViolation(DomainError),
    /// The requested flight does not exist.
    FlightNotFound(String),
    /// A flight with this code already exists.
    FlightAlreadyExists(String),
    /// The flight has no available seats.
    FlightSoldOut(String),
    /// The requested seat does not exist on the flight.
    SeatNotFound {
        flight_code: String,
        seat_label: String,
    },
    /// The requested seat is already occupied.
    SeatUnavailable {
        flight_code: String,
        seat_label: String,
    },
    /// No booking carries this ticket number.
    TicketNotFound(String),
    /// A booking with this ticket number already exists.
    DuplicateTicket(String),
    /// The booking is already cancelled.
    BookingAlreadyCancelled(String),
    /// Flight counters disagree with the booking being cancelled.
    InventoryInconsistent(String),
    /// The requested baggage item does not exist.
    BaggageNotFound(String),
    /// A baggage item with this code already exists.
    DuplicateBaggageCode(String),
    /// The requested gate does not exist.
    GateNotFound(u32),
    /// A gate with this number already exists.
    GateAlreadyExists(u32),
    /// The gate is held by another active flight on the same date.
    GateOccupied {
        gate: u32,
        flight_code: String,
        date: String,
    },
    /// The requested user does not exist.
    UserNotFound(String),
    /// A user with this login already exists.
    UserAlreadyExists(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl PersistenceError {
    /// Returns true for errors caused by competing or stale requests rather
    /// than by the store itself.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::FlightSoldOut(_)
                | Self::SeatUnavailable { .. }
                | Self::TicketNotFound(_)
                | Self::DuplicateTicket(_)
                | Self::BookingAlreadyCancelled(_)
                | Self::DuplicateBaggageCode(_)
                | Self::GateOccupied { .. }
                | Self::FlightAlreadyExists(_)
                | Self::GateAlreadyExists(_)
                | Self::UserAlreadyExists(_)
                | Self::ConstraintViolation(_)
        )
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::DomainViolation(err) => write!(f, "Domain rule violated: {err}"),
            Self::FlightNotFound(code) => write!(f, "Flight not found: {code}"),
            Self::FlightAlreadyExists(code) => write!(f, "Flight already exists: {code}"),
            Self::FlightSoldOut(code) => write!(f, "Flight {code} is sold out"),
            Self::SeatNotFound {
                flight_code,
                seat_label,
            } => write!(f, "Seat {seat_label} not found on flight {flight_code}"),
            Self::SeatUnavailable {
                flight_code,
                seat_label,
            } => write!(
                f,
                "Seat {seat_label} on flight {flight_code} is already occupied"
            ),
            Self::TicketNotFound(ticket) => write!(f, "Ticket not found: {ticket}"),
            Self::DuplicateTicket(ticket) => write!(f, "Ticket already exists: {ticket}"),
            Self::BookingAlreadyCancelled(ticket) => {
                write!(f, "Booking {ticket} is already cancelled")
            }
            Self::InventoryInconsistent(msg) => write!(f, "Seat inventory inconsistent: {msg}"),
            Self::BaggageNotFound(code) => write!(f, "Baggage not found: {code}"),
            Self::DuplicateBaggageCode(code) => write!(f, "Baggage already exists: {code}"),
            Self::GateNotFound(gate) => write!(f, "Gate not found: {gate}"),
            Self::GateAlreadyExists(gate) => write!(f, "Gate already exists: {gate}"),
            Self::GateOccupied {
                gate,
                flight_code,
                date,
            } => write!(
                f,
                "Gate {gate} is already assigned to flight {flight_code} on {date}"
            ),
            Self::UserNotFound(login) => write!(f, "User not found: {login}"),
            Self::UserAlreadyExists(login) => write!(f, "User already exists: {login}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
