// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and the conversions between stored rows and domain types.
//!
//! Booleans are stored as `0`/`1` integers and counters as signed integers,
//! so every conversion here is checked.

use airops_domain::{
    Baggage, BaggageStatus, Booking, BookingStatus, Flight, FlightCode, FlightStatus, Passenger,
    Role, Seat, SeatLabel, User, format_departure_time, format_flight_date, parse_departure_time,
    parse_flight_date,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{baggage, bookings, flights, passengers, seats, users};
use crate::error::PersistenceError;

/// Narrows a domain count into an integer column.
pub(crate) fn to_int_column(value: u32, column: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::Other(format!("Value {value} does not fit column '{column}'"))
    })
}

/// Widens an integer column into a domain count.
pub(crate) fn from_int_column(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::Other(format!("Column '{column}' holds negative value {value}"))
    })
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = flights)]
pub(crate) struct FlightRow {
    pub code: String,
    pub carrier: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub status: String,
    pub flight_date: String,
    pub delay_minutes: i32,
    pub total_seats: i32,
    pub available_seats: i32,
    pub gate_number: Option<i32>,
}

impl FlightRow {
    pub fn from_flight(flight: &Flight) -> Result<Self, PersistenceError> {
        Ok(Self {
            code: flight.code.value().to_string(),
            carrier: flight.carrier.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_time: format_departure_time(flight.departure_time)?,
            status: flight.status.as_str().to_string(),
            flight_date: format_flight_date(flight.date)?,
            delay_minutes: to_int_column(flight.delay_minutes, "delay_minutes")?,
            total_seats: to_int_column(flight.total_seats, "total_seats")?,
            available_seats: to_int_column(flight.available_seats, "available_seats")?,
            gate_number: flight
                .gate
                .map(|gate| to_int_column(gate, "gate_number"))
                .transpose()?,
        })
    }

    pub fn into_flight(self) -> Result<Flight, PersistenceError> {
        Ok(Flight {
            code: FlightCode::new(&self.code),
            carrier: self.carrier,
            origin: self.origin,
            destination: self.destination,
            date: parse_flight_date(&self.flight_date)?,
            departure_time: parse_departure_time(&self.departure_time)?,
            status: self.status.parse::<FlightStatus>()?,
            delay_minutes: from_int_column(self.delay_minutes, "delay_minutes")?,
            total_seats: from_int_column(self.total_seats, "total_seats")?,
            available_seats: from_int_column(self.available_seats, "available_seats")?,
            gate: self
                .gate_number
                .map(|gate| from_int_column(gate, "gate_number"))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = seats)]
pub(crate) struct SeatRow {
    pub flight_code: String,
    pub seat_label: String,
    pub occupied: i32,
}

impl SeatRow {
    pub fn into_seat(self) -> Result<Seat, PersistenceError> {
        Ok(Seat {
            label: self.seat_label.parse::<SeatLabel>()?,
            flight_code: self.flight_code,
            occupied: self.occupied != 0,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = seats)]
pub(crate) struct NewSeat<'a> {
    pub flight_code: &'a str,
    pub seat_label: String,
    pub occupied: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = passengers)]
pub(crate) struct PassengerRow {
    pub passenger_id: i64,
    pub name: String,
    pub surname: String,
    pub document_number: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Self {
            passenger_id: Some(row.passenger_id),
            name: row.name,
            surname: row.surname,
            document_number: row.document_number,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingRow {
    pub booking_id: i64,
    pub flight_code: String,
    pub ticket_number: String,
    pub seat_label: String,
    pub status: String,
    pub owner_login: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = baggage)]
pub(crate) struct BaggageRow {
    pub code: String,
    pub status: String,
    pub booking_id: Option<i64>,
}

impl BaggageRow {
    pub fn into_record(self) -> Result<BaggageRecord, PersistenceError> {
        Ok(BaggageRecord {
            baggage: Baggage {
                code: self.code,
                status: self.status.parse::<BaggageStatus>()?,
            },
            booking_id: self.booking_id,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = baggage)]
pub(crate) struct NewBaggage<'a> {
    pub code: &'a str,
    pub status: &'a str,
    pub booking_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub role: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User, PersistenceError> {
        Ok(User {
            login: self.login,
            name: self.name,
            surname: self.surname,
            role: self.role.parse::<Role>()?,
        })
    }
}

/// Identifiers assigned by a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// Generated booking identifier.
    pub booking_id: i64,
    /// Passenger identifier, reused when the document number was known.
    pub passenger_id: i64,
    /// Ticket number of the booking.
    pub ticket_number: String,
}

/// A booking joined with its flight, passenger, and baggage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    /// Generated booking identifier.
    pub booking_id: i64,
    /// The booking, including passenger and baggage.
    pub booking: Booking,
    /// The booked flight.
    pub flight: Flight,
}

impl BookingView {
    pub(crate) fn from_rows(
        booking: BookingRow,
        flight: FlightRow,
        passenger: PassengerRow,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            booking_id: booking.booking_id,
            booking: Booking {
                ticket_number: booking.ticket_number,
                flight_code: FlightCode::new(&booking.flight_code),
                seat_label: booking.seat_label.parse::<SeatLabel>()?,
                status: booking.status.parse::<BookingStatus>()?,
                owner_login: booking.owner_login,
                passenger: Passenger::from(passenger),
                baggage: Vec::new(),
            },
            flight: flight.into_flight()?,
        })
    }
}

/// A baggage item together with the booking that owns it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggageRecord {
    /// The baggage item.
    pub baggage: Baggage,
    /// Owning booking, `None` for independently registered baggage.
    pub booking_id: Option<i64>,
}
