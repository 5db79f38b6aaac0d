// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the airport operations backend.
//!
//! Requests arrive as DTOs, are validated against the domain rules,
//! authorized against the actor's role, and only then handed to the
//! persistence layer. Domain and persistence errors are translated into
//! [`ApiError`] and never leak through.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod credential_policy;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use credential_policy::{CredentialPolicy, CredentialPolicyError};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    assign_gate, bootstrap_administrator, cancel_booking, create_booking, create_flight,
    create_gate, create_user, get_seat_map, list_flight_bookings, list_lost_baggage,
    list_user_bookings, register_baggage, update_baggage_status, update_booking_status,
    update_flight_baggage_status, update_flight_status,
};
pub use request_response::{
    AssignGateRequest, BaggageInfo, BaggageResponse, BookingInfo, BookingStatusResponse,
    BulkBaggageStatusResponse, CreateBookingRequest, CreateBookingResponse, CreateFlightRequest,
    CreateGateRequest, CreateGateResponse, CreateUserRequest, CreateUserResponse, FlightInfo,
    FlightResponse, ListBookingsResponse, LostBaggageItem, LostBaggageResponse, PassengerInfo,
    RegisterBaggageRequest, SeatInfo, SeatMapResponse, UpdateBaggageStatusRequest,
    UpdateBookingStatusRequest, UpdateFlightStatusRequest,
};

/// How read handlers react to storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Failures are reported to the caller.
    #[default]
    Strict,
    /// Failures are logged and an empty result is returned.
    Lenient,
}

/// Runtime options for the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApiConfig {
    /// Behaviour of read handlers on storage failure.
    pub read_mode: ReadMode,
}
