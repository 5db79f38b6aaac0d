// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::seat::SeatLabel;
use crate::status::{BaggageStatus, BookingStatus, FlightStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Time};

/// Represents a flight code such as `AZ1234`.
///
/// Codes are normalized to uppercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlightCode {
    value: String,
}

impl FlightCode {
    /// Creates a new flight code, normalized to uppercase.
    ///
    /// # Arguments
    ///
    /// * `value` - The flight code
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for FlightCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A scheduled flight leg with a fixed seat capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight code.
    pub code: FlightCode,
    /// Operating carrier.
    pub carrier: String,
    /// Origin airport.
    pub origin: String,
    /// Destination airport.
    pub destination: String,
    /// Scheduled departure date.
    pub date: Date,
    /// Scheduled departure time.
    pub departure_time: Time,
    /// Operational status.
    pub status: FlightStatus,
    /// Accumulated delay in minutes.
    pub delay_minutes: u32,
    /// Seat capacity.
    pub total_seats: u32,
    /// Seats not held by a live booking.
    pub available_seats: u32,
    /// Assigned gate, if any.
    pub gate: Option<u32>,
}

impl Flight {
    /// Creates a new scheduled flight with every seat available.
    #[must_use]
    pub fn new(
        code: FlightCode,
        carrier: String,
        origin: String,
        destination: String,
        date: Date,
        departure_time: Time,
        total_seats: u32,
    ) -> Self {
        Self {
            code,
            carrier,
            origin,
            destination,
            date,
            departure_time,
            status: FlightStatus::Scheduled,
            delay_minutes: 0,
            total_seats,
            available_seats: total_seats,
            gate: None,
        }
    }

    /// Returns the number of seats held by live bookings.
    #[must_use]
    pub const fn occupied_seats(&self) -> u32 {
        self.total_seats.saturating_sub(self.available_seats)
    }

    /// Returns true if no seats remain.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }
}

/// Formats a flight date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_flight_date(date: Date) -> Result<String, DomainError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| DomainError::DateParseError {
            input: date.to_string(),
            error: e.to_string(),
        })
}

/// Parses a flight date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the input is not a valid date.
pub fn parse_flight_date(input: &str) -> Result<Date, DomainError> {
    Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            input: input.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a departure time as `HH:MM`.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_departure_time(time: Time) -> Result<String, DomainError> {
    time.format(format_description!("[hour]:[minute]"))
        .map_err(|e| DomainError::DateParseError {
            input: time.to_string(),
            error: e.to_string(),
        })
}

/// Parses a departure time in `HH:MM` form.
///
/// # Errors
///
/// Returns an error if the input is not a valid time.
pub fn parse_departure_time(input: &str) -> Result<Time, DomainError> {
    Time::parse(input, format_description!("[hour]:[minute]")).map_err(|e| {
        DomainError::DateParseError {
            input: input.to_string(),
            error: e.to_string(),
        }
    })
}

/// A boarding gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    /// Gate number.
    pub number: u32,
}

/// A traveller, identified by their document number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Store-assigned identifier, `None` until persisted.
    pub passenger_id: Option<i64>,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Identity document number; the natural key.
    pub document_number: String,
}

impl Passenger {
    /// Creates a passenger that has not been persisted yet.
    #[must_use]
    pub const fn new(name: String, surname: String, document_number: String) -> Self {
        Self {
            passenger_id: None,
            name,
            surname,
            document_number,
        }
    }
}

/// A trackable baggage item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baggage {
    /// Unique tag code.
    pub code: String,
    /// Handling status.
    pub status: BaggageStatus,
}

impl Baggage {
    /// Creates a baggage item in the `Processing` state.
    #[must_use]
    pub const fn checked_in(code: String) -> Self {
        Self {
            code,
            status: BaggageStatus::Processing,
        }
    }
}

/// A passenger's claim on one seat of one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique ticket number.
    pub ticket_number: String,
    /// Flight being booked.
    pub flight_code: FlightCode,
    /// Seat being claimed.
    pub seat_label: SeatLabel,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Login of the user who owns the booking.
    pub owner_login: String,
    /// The travelling passenger.
    pub passenger: Passenger,
    /// Baggage checked with this booking.
    pub baggage: Vec<Baggage>,
}

/// User roles.
///
/// Capabilities are derived from the role instead of from distinct user
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Operations staff: manage flights, gates, baggage, and any booking.
    Administrator,
    /// Booking agent: create bookings and manage their own.
    Generic,
}

impl Role {
    /// Returns the persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Generic => "Generic",
        }
    }

    /// Returns true if this role may manage flights, gates, and baggage.
    #[must_use]
    pub const fn can_manage_operations(&self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Returns true if this role may act on bookings owned by others.
    #[must_use]
    pub const fn can_manage_any_booking(&self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Self::Administrator),
            "Generic" => Ok(Self::Generic),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A system user. Credentials live in the persistence layer only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique login.
    pub login: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Role.
    pub role: Role,
}
