// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API contract.
//! Statuses, dates, and times travel as strings and are parsed by the
//! handlers.

use serde::{Deserialize, Serialize};

/// API request to create a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Unique login.
    pub login: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// `Administrator` or `Generic`.
    pub role: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
}

/// API response for a successful user creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    /// The created login.
    pub login: String,
    /// The assigned role.
    pub role: String,
    /// A success message.
    pub message: String,
}

/// API request to create a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGateRequest {
    /// Gate number, greater than zero.
    pub gate_number: u32,
}

/// API response for a successful gate creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGateResponse {
    /// The created gate number.
    pub gate_number: u32,
    /// A success message.
    pub message: String,
}

/// API request to create a flight and its seat layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFlightRequest {
    /// Flight code.
    pub code: String,
    /// Operating carrier.
    pub carrier: String,
    /// Origin airport.
    pub origin: String,
    /// Destination airport.
    pub destination: String,
    /// Departure date (`YYYY-MM-DD`).
    pub date: String,
    /// Scheduled departure time (`HH:MM`).
    pub departure_time: String,
    /// Seat capacity.
    pub total_seats: u32,
}

/// API request to change a flight's status and, optionally, its delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFlightStatusRequest {
    /// New status.
    pub status: String,
    /// Accumulated delay in minutes.
    #[serde(default)]
    pub delay_minutes: Option<u32>,
}

/// API request to assign a gate to a flight, or clear it with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignGateRequest {
    /// Gate number to hold, or `None` to release the current gate.
    #[serde(default)]
    pub gate_number: Option<u32>,
}

/// Flight information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightInfo {
    /// Flight code.
    pub code: String,
    /// Operating carrier.
    pub carrier: String,
    /// Origin airport.
    pub origin: String,
    /// Destination airport.
    pub destination: String,
    /// Departure date (`YYYY-MM-DD`).
    pub date: String,
    /// Scheduled departure time (`HH:MM`).
    pub departure_time: String,
    /// Operational status.
    pub status: String,
    /// Accumulated delay in minutes.
    pub delay_minutes: u32,
    /// Seat capacity.
    pub total_seats: u32,
    /// Seats not held by a live booking.
    pub available_seats: u32,
    /// Assigned gate.
    pub gate: Option<u32>,
}

/// API response carrying a single flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightResponse {
    /// The flight after the operation.
    pub flight: FlightInfo,
    /// A success message.
    pub message: String,
}

/// A seat in a seat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    /// Seat label, e.g. `12C`.
    pub label: String,
    /// Whether a live booking holds the seat.
    pub occupied: bool,
}

/// API response for a flight's seat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMapResponse {
    /// Flight code.
    pub flight_code: String,
    /// Number of free seats in the map.
    pub free_seats: usize,
    /// Seats ordered by row, then letter.
    pub seats: Vec<SeatInfo>,
}

/// Passenger identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerInfo {
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Identity document number.
    pub document_number: String,
}

/// API request to create a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Ticket number, unique across bookings.
    pub ticket_number: String,
    /// Flight to book.
    pub flight_code: String,
    /// Seat to hold.
    pub seat_label: String,
    /// Initial status; `pending` when absent.
    #[serde(default)]
    pub status: Option<String>,
    /// The travelling passenger.
    pub passenger: PassengerInfo,
    /// Baggage codes checked in with the booking.
    #[serde(default)]
    pub baggage_codes: Vec<String>,
}

/// API response for a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    /// Generated booking identifier.
    pub booking_id: i64,
    /// Passenger identifier, reused for known document numbers.
    pub passenger_id: i64,
    /// Ticket number of the booking.
    pub ticket_number: String,
    /// A success message.
    pub message: String,
}

/// API request to change a booking's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    /// New status.
    pub status: String,
}

/// API response for a booking status change or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatusResponse {
    /// Ticket number of the booking.
    pub ticket_number: String,
    /// Status after the change.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// A baggage item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggageInfo {
    /// Baggage code.
    pub code: String,
    /// Lifecycle status.
    pub status: String,
}

/// A booking with its flight, passenger, and baggage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// Generated booking identifier.
    pub booking_id: i64,
    /// Ticket number.
    pub ticket_number: String,
    /// Booking status.
    pub status: String,
    /// Held seat.
    pub seat_label: String,
    /// Login of the user who created the booking.
    pub owner_login: String,
    /// The travelling passenger.
    pub passenger: PassengerInfo,
    /// Baggage ordered by code.
    pub baggage: Vec<BaggageInfo>,
    /// The booked flight.
    pub flight: FlightInfo,
}

/// API response for a booking listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    /// Bookings ordered by ticket number.
    pub bookings: Vec<BookingInfo>,
}

/// API request to register baggage outside a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBaggageRequest {
    /// Baggage code.
    pub code: String,
}

/// API request to set a baggage status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBaggageStatusRequest {
    /// New status.
    pub status: String,
}

/// API response carrying a single baggage item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggageResponse {
    /// The item after the operation.
    pub baggage: BaggageInfo,
    /// A success message.
    pub message: String,
}

/// API response for a bulk baggage status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkBaggageStatusResponse {
    /// Flight whose baggage was updated.
    pub flight_code: String,
    /// Status written.
    pub status: String,
    /// Number of items that changed.
    pub updated: usize,
}

/// A lost baggage item with its owning booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostBaggageItem {
    /// Baggage code.
    pub code: String,
    /// Owning booking, absent for independently registered baggage.
    pub booking_id: Option<i64>,
}

/// API response for the lost baggage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostBaggageResponse {
    /// Lost items ordered by code.
    pub items: Vec<LostBaggageItem>,
}
