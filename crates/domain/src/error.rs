// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Flight code is empty or malformed.
    InvalidFlightCode(String),
    /// Carrier name is empty.
    InvalidCarrier(String),
    /// Origin or destination airport is empty or invalid.
    InvalidAirport(String),
    /// Origin and destination are the same airport.
    SameOriginAndDestination(String),
    /// Seat capacity is outside the supported range.
    InvalidSeatCount {
        /// The rejected capacity.
        count: u32,
        /// The largest supported capacity.
        max: u32,
    },
    /// Seat label cannot be parsed.
    InvalidSeatLabel(String),
    /// Passenger name or surname is empty.
    InvalidName(String),
    /// Passenger document number is malformed.
    InvalidDocumentNumber {
        /// The rejected document number.
        document_number: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Ticket number is empty or malformed.
    InvalidTicketNumber(String),
    /// Baggage code is empty or malformed.
    InvalidBaggageCode(String),
    /// Two baggage items in one booking share a code.
    DuplicateBaggageCode(String),
    /// User login is empty or malformed.
    InvalidLogin(String),
    /// Gate number is zero.
    InvalidGateNumber(u32),
    /// Delay is outside the accepted range.
    InvalidDelay {
        /// The rejected delay in minutes.
        minutes: u32,
    },
    /// A flight status string is not recognized.
    InvalidFlightStatus {
        /// The unrecognized value.
        status: String,
    },
    /// A booking status string is not recognized.
    InvalidBookingStatus {
        /// The unrecognized value.
        status: String,
    },
    /// A baggage status string is not recognized.
    InvalidBaggageStatus {
        /// The unrecognized value.
        status: String,
    },
    /// A role string is not recognized.
    InvalidRole(String),
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Failed to parse a date or time string.
    DateParseError {
        /// The invalid input.
        input: String,
        /// The parser error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlightCode(msg) => write!(f, "Invalid flight code: {msg}"),
            Self::InvalidCarrier(msg) => write!(f, "Invalid carrier: {msg}"),
            Self::InvalidAirport(msg) => write!(f, "Invalid airport: {msg}"),
            Self::SameOriginAndDestination(airport) => {
                write!(f, "Origin and destination are both '{airport}'")
            }
            Self::InvalidSeatCount { count, max } => {
                write!(f, "Invalid seat count: {count}. Must be between 1 and {max}")
            }
            Self::InvalidSeatLabel(label) => write!(f, "Invalid seat label: '{label}'"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidDocumentNumber {
                document_number,
                reason,
            } => {
                write!(f, "Invalid document number '{document_number}': {reason}")
            }
            Self::InvalidTicketNumber(msg) => write!(f, "Invalid ticket number: {msg}"),
            Self::InvalidBaggageCode(msg) => write!(f, "Invalid baggage code: {msg}"),
            Self::DuplicateBaggageCode(code) => {
                write!(f, "Baggage code '{code}' appears more than once")
            }
            Self::InvalidLogin(msg) => write!(f, "Invalid login: {msg}"),
            Self::InvalidGateNumber(number) => write!(f, "Invalid gate number: {number}"),
            Self::InvalidDelay { minutes } => {
                write!(f, "Invalid delay: {minutes} minutes")
            }
            Self::InvalidFlightStatus { status } => {
                write!(f, "Invalid flight status: '{status}'")
            }
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: '{status}'")
            }
            Self::InvalidBaggageStatus { status } => {
                write!(f, "Invalid baggage status: '{status}'")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::DateParseError { input, error } => {
                write!(f, "Failed to parse '{input}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
