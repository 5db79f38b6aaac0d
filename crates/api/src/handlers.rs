// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler validates its request against the domain rules, checks the
//! actor's role, and then calls into the persistence layer. Nothing reaches
//! the transaction engine before validation passes.

use airops_domain::{
    Baggage, BaggageStatus, Booking, BookingStatus, DomainError, Flight, FlightCode, FlightStatus,
    Passenger, Role, Seat, SeatLabel, User, format_departure_time, format_flight_date,
    parse_departure_time, parse_flight_date, sort_seats, validate_baggage_code,
    validate_booking, validate_delay, validate_flight, validate_gate_number, validate_login,
};
use airops_persistence::{BaggageRecord, BookingReceipt, BookingView, Persistence};
use time::{Date, Time};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::credential_policy::CredentialPolicy;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AssignGateRequest, BaggageInfo, BaggageResponse, BookingInfo, BookingStatusResponse,
    BulkBaggageStatusResponse, CreateBookingRequest, CreateBookingResponse, CreateFlightRequest,
    CreateGateRequest, CreateGateResponse, CreateUserRequest, CreateUserResponse, FlightInfo,
    FlightResponse, ListBookingsResponse, LostBaggageItem, LostBaggageResponse, PassengerInfo,
    RegisterBaggageRequest, SeatInfo, SeatMapResponse, UpdateBaggageStatusRequest,
    UpdateBookingStatusRequest, UpdateFlightStatusRequest,
};
use crate::{ApiConfig, ReadMode};

fn to_flight_info(flight: &Flight) -> Result<FlightInfo, ApiError> {
    Ok(FlightInfo {
        code: flight.code.value().to_string(),
        carrier: flight.carrier.clone(),
        origin: flight.origin.clone(),
        destination: flight.destination.clone(),
        date: format_flight_date(flight.date).map_err(translate_domain_error)?,
        departure_time: format_departure_time(flight.departure_time)
            .map_err(translate_domain_error)?,
        status: flight.status.as_str().to_string(),
        delay_minutes: flight.delay_minutes,
        total_seats: flight.total_seats,
        available_seats: flight.available_seats,
        gate: flight.gate,
    })
}

fn to_baggage_info(item: &Baggage) -> BaggageInfo {
    BaggageInfo {
        code: item.code.clone(),
        status: item.status.as_str().to_string(),
    }
}

fn to_booking_info(view: &BookingView) -> Result<BookingInfo, ApiError> {
    let booking: &Booking = &view.booking;
    Ok(BookingInfo {
        booking_id: view.booking_id,
        ticket_number: booking.ticket_number.clone(),
        status: booking.status.as_str().to_string(),
        seat_label: booking.seat_label.to_string(),
        owner_login: booking.owner_login.clone(),
        passenger: PassengerInfo {
            name: booking.passenger.name.clone(),
            surname: booking.passenger.surname.clone(),
            document_number: booking.passenger.document_number.clone(),
        },
        baggage: booking.baggage.iter().map(to_baggage_info).collect(),
        flight: to_flight_info(&view.flight)?,
    })
}

fn to_booking_list(views: &[BookingView]) -> Result<ListBookingsResponse, ApiError> {
    let bookings: Vec<BookingInfo> = views
        .iter()
        .map(to_booking_info)
        .collect::<Result<_, _>>()?;
    Ok(ListBookingsResponse { bookings })
}

fn load_flight(persistence: &mut Persistence, flight_code: &str) -> Result<Flight, ApiError> {
    persistence
        .get_flight(flight_code)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Flight"),
            message: format!("Flight '{flight_code}' does not exist"),
        })
}

fn load_booking(persistence: &mut Persistence, ticket_number: &str) -> Result<BookingView, ApiError> {
    persistence
        .get_booking(ticket_number)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Ticket '{ticket_number}' does not exist"),
        })
}

fn load_baggage(persistence: &mut Persistence, code: &str) -> Result<BaggageRecord, ApiError> {
    persistence
        .get_baggage(code)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Baggage"),
            message: format!("Baggage '{code}' does not exist"),
        })
}

/// Creates a user.
///
/// Only Administrators may create users. The password must satisfy the
/// default [`CredentialPolicy`].
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, a field is
/// invalid, the password violates the policy, or the login is taken.
pub fn create_user(
    persistence: &mut Persistence,
    request: &CreateUserRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateUserResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(authenticated_actor, "create_user")?;

    let user: User = build_user(request)?;
    persistence
        .create_user(&user, &request.password)
        .map_err(translate_persistence_error)?;

    info!(
        login = %user.login,
        role = user.role.as_str(),
        actor = %authenticated_actor.login,
        "Created user"
    );

    Ok(CreateUserResponse {
        login: user.login,
        role: user.role.as_str().to_string(),
        message: String::from("User created"),
    })
}

fn build_user(request: &CreateUserRequest) -> Result<User, ApiError> {
    validate_login(&request.login).map_err(translate_domain_error)?;
    for (field, value) in [("name", &request.name), ("surname", &request.surname)] {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("{field} must not be empty"),
            });
        }
    }
    let role: Role = request.role.parse().map_err(translate_domain_error)?;

    CredentialPolicy::default().validate(
        &request.password,
        &request.login,
        &request.name,
        &request.surname,
    )?;

    Ok(User {
        login: request.login.clone(),
        name: request.name.clone(),
        surname: request.surname.clone(),
        role,
    })
}

/// Creates the first Administrator when the store holds no users.
///
/// Returns `true` when the user was created and `false` when users already
/// exist.
///
/// # Errors
///
/// Returns an error if the login or password is invalid or the store fails.
pub fn bootstrap_administrator(
    persistence: &mut Persistence,
    login: &str,
    password: &str,
) -> Result<bool, ApiError> {
    let existing: i64 = persistence
        .count_users()
        .map_err(translate_persistence_error)?;
    if existing > 0 {
        info!(existing, "Users present, skipping administrator bootstrap");
        return Ok(false);
    }

    let request: CreateUserRequest = CreateUserRequest {
        login: login.to_string(),
        name: String::from("Operations"),
        surname: String::from("Administrator"),
        role: Role::Administrator.as_str().to_string(),
        password: password.to_string(),
    };
    let user: User = build_user(&request)?;
    persistence
        .create_user(&user, password)
        .map_err(translate_persistence_error)?;

    info!(login, "Bootstrapped administrator");
    Ok(true)
}

/// Creates a gate.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the number is
/// zero, or the gate exists.
pub fn create_gate(
    persistence: &mut Persistence,
    request: &CreateGateRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateGateResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(authenticated_actor, "create_gate")?;
    validate_gate_number(request.gate_number).map_err(translate_domain_error)?;

    persistence
        .create_gate(request.gate_number)
        .map_err(translate_persistence_error)?;

    Ok(CreateGateResponse {
        gate_number: request.gate_number,
        message: format!("Gate {} created", request.gate_number),
    })
}

/// Creates a flight together with its seat layout.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, a field is
/// invalid, or the flight code is taken.
pub fn create_flight(
    persistence: &mut Persistence,
    request: &CreateFlightRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<FlightResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(authenticated_actor, "create_flight")?;

    let date: Date = parse_flight_date(&request.date).map_err(translate_domain_error)?;
    let departure_time: Time =
        parse_departure_time(&request.departure_time).map_err(translate_domain_error)?;

    let flight: Flight = Flight::new(
        FlightCode::new(&request.code),
        request.carrier.clone(),
        request.origin.clone(),
        request.destination.clone(),
        date,
        departure_time,
        request.total_seats,
    );
    validate_flight(&flight).map_err(translate_domain_error)?;

    persistence
        .create_flight(&flight)
        .map_err(translate_persistence_error)?;

    info!(
        flight_code = %request.code,
        total_seats = request.total_seats,
        actor = %authenticated_actor.login,
        "Created flight"
    );

    Ok(FlightResponse {
        flight: to_flight_info(&flight)?,
        message: format!("Flight '{}' created", request.code),
    })
}

/// Sets a flight's status and, when given, its delay.
///
/// Both values are validated before either is written.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the status or
/// delay is invalid, the flight is unknown, or reactivating the flight
/// would double-book its gate.
pub fn update_flight_status(
    persistence: &mut Persistence,
    flight_code: &str,
    request: &UpdateFlightStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<FlightResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(
        authenticated_actor,
        "update_flight_status",
    )?;

    let status: FlightStatus = request.status.parse().map_err(translate_domain_error)?;
    if let Some(delay) = request.delay_minutes {
        validate_delay(delay).map_err(translate_domain_error)?;
    }

    persistence
        .update_flight_status(flight_code, status)
        .map_err(translate_persistence_error)?;
    if let Some(delay) = request.delay_minutes {
        persistence
            .update_flight_delay(flight_code, delay)
            .map_err(translate_persistence_error)?;
    }

    let flight: Flight = load_flight(persistence, flight_code)?;
    Ok(FlightResponse {
        flight: to_flight_info(&flight)?,
        message: format!("Flight '{flight_code}' is now {status}"),
    })
}

/// Assigns a gate to a flight or clears the assignment.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the flight or
/// gate is unknown, or the gate is held by another active flight that day.
pub fn assign_gate(
    persistence: &mut Persistence,
    flight_code: &str,
    request: &AssignGateRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<FlightResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(authenticated_actor, "assign_gate")?;
    if let Some(number) = request.gate_number {
        validate_gate_number(number).map_err(translate_domain_error)?;
    }

    persistence
        .assign_gate(flight_code, request.gate_number)
        .map_err(translate_persistence_error)?;

    let flight: Flight = load_flight(persistence, flight_code)?;
    let message: String = match request.gate_number {
        Some(number) => format!("Flight '{flight_code}' assigned to gate {number}"),
        None => format!("Flight '{flight_code}' released its gate"),
    };
    Ok(FlightResponse {
        flight: to_flight_info(&flight)?,
        message,
    })
}

/// Returns a flight's seat map ordered by row, then letter.
///
/// Under [`ReadMode::Lenient`] a failed read yields an empty map.
///
/// # Errors
///
/// Under [`ReadMode::Strict`], returns an error if the flight is unknown or
/// the read fails.
pub fn get_seat_map(
    persistence: &mut Persistence,
    config: &ApiConfig,
    flight_code: &str,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<SeatMapResponse, ApiError> {
    let mut seats: Vec<Seat> = match config.read_mode {
        ReadMode::Strict => {
            load_flight(persistence, flight_code)?;
            persistence
                .list_seats(flight_code)
                .map_err(translate_persistence_error)?
        }
        ReadMode::Lenient => persistence.list_seats_or_empty(flight_code),
    };
    sort_seats(&mut seats);

    let free_seats: usize = seats.iter().filter(|seat| !seat.occupied).count();
    Ok(SeatMapResponse {
        flight_code: flight_code.to_string(),
        free_seats,
        seats: seats
            .iter()
            .map(|seat| SeatInfo {
                label: seat.label.to_string(),
                occupied: seat.occupied,
            })
            .collect(),
    })
}

/// Creates a booking owned by the acting user.
///
/// # Errors
///
/// Returns an error if a field is invalid, or if the engine rejects the
/// booking: unknown flight or seat, sold out, seat taken, duplicate ticket,
/// or duplicate baggage code. A rejected booking leaves no trace.
pub fn create_booking(
    persistence: &mut Persistence,
    request: &CreateBookingRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateBookingResponse, ApiError> {
    let seat_label: SeatLabel = request
        .seat_label
        .parse()
        .map_err(translate_domain_error)?;
    let status: BookingStatus = match &request.status {
        Some(raw) => raw.parse().map_err(translate_domain_error)?,
        None => BookingStatus::Pending,
    };
    if !status.holds_seat() {
        return Err(translate_domain_error(DomainError::InvalidBookingStatus {
            status: status.as_str().to_string(),
        }));
    }

    let booking: Booking = Booking {
        ticket_number: request.ticket_number.clone(),
        flight_code: FlightCode::new(&request.flight_code),
        seat_label,
        status,
        owner_login: authenticated_actor.login.clone(),
        passenger: Passenger::new(
            request.passenger.name.clone(),
            request.passenger.surname.clone(),
            request.passenger.document_number.clone(),
        ),
        baggage: request
            .baggage_codes
            .iter()
            .cloned()
            .map(Baggage::checked_in)
            .collect(),
    };
    validate_booking(&booking).map_err(translate_domain_error)?;

    let receipt: BookingReceipt = persistence.create_booking(&booking).map_err(|e| {
        warn!(
            ticket_number = %request.ticket_number,
            flight_code = %request.flight_code,
            error = %e,
            "Booking rejected"
        );
        translate_persistence_error(e)
    })?;

    Ok(CreateBookingResponse {
        booking_id: receipt.booking_id,
        passenger_id: receipt.passenger_id,
        ticket_number: receipt.ticket_number,
        message: format!(
            "Seat {} on '{}' booked",
            request.seat_label, request.flight_code
        ),
    })
}

/// Cancels a booking, releasing its seat.
///
/// # Errors
///
/// Returns an error if the ticket is unknown, the actor neither owns the
/// booking nor is an Administrator, or the booking is already cancelled.
pub fn cancel_booking(
    persistence: &mut Persistence,
    ticket_number: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BookingStatusResponse, ApiError> {
    let view: BookingView = load_booking(persistence, ticket_number)?;
    AuthorizationService::authorize_booking_access(
        authenticated_actor,
        &view.booking.owner_login,
        "cancel_booking",
    )?;

    persistence
        .cancel_booking(ticket_number)
        .map_err(translate_persistence_error)?;

    Ok(BookingStatusResponse {
        ticket_number: ticket_number.to_string(),
        status: BookingStatus::Cancelled.as_str().to_string(),
        message: format!("Booking '{ticket_number}' cancelled"),
    })
}

/// Sets a booking's status. `cancelled` behaves like [`cancel_booking`].
///
/// # Errors
///
/// Returns an error if the status is unknown, the ticket is unknown, the
/// actor may not act on the booking, or the booking is already cancelled.
pub fn update_booking_status(
    persistence: &mut Persistence,
    ticket_number: &str,
    request: &UpdateBookingStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BookingStatusResponse, ApiError> {
    let status: BookingStatus = request.status.parse().map_err(translate_domain_error)?;
    let view: BookingView = load_booking(persistence, ticket_number)?;
    AuthorizationService::authorize_booking_access(
        authenticated_actor,
        &view.booking.owner_login,
        "update_booking_status",
    )?;

    persistence
        .update_booking_status(status, ticket_number)
        .map_err(translate_persistence_error)?;

    Ok(BookingStatusResponse {
        ticket_number: ticket_number.to_string(),
        status: status.as_str().to_string(),
        message: format!("Booking '{ticket_number}' is now {status}"),
    })
}

/// Lists the bookings owned by `login`.
///
/// # Errors
///
/// Returns an error if the actor is neither `login` nor an Administrator,
/// or, under [`ReadMode::Strict`], if the read fails.
pub fn list_user_bookings(
    persistence: &mut Persistence,
    config: &ApiConfig,
    login: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListBookingsResponse, ApiError> {
    AuthorizationService::authorize_view_user_bookings(authenticated_actor, login)?;

    let views: Vec<BookingView> = match config.read_mode {
        ReadMode::Strict => persistence
            .list_bookings_for_user(login)
            .map_err(translate_persistence_error)?,
        ReadMode::Lenient => persistence.list_bookings_for_user_or_empty(login),
    };
    to_booking_list(&views)
}

/// Lists every booking on a flight, including cancelled ones.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, or, under
/// [`ReadMode::Strict`], if the read fails.
pub fn list_flight_bookings(
    persistence: &mut Persistence,
    config: &ApiConfig,
    flight_code: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListBookingsResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(
        authenticated_actor,
        "list_flight_bookings",
    )?;

    let views: Vec<BookingView> = match config.read_mode {
        ReadMode::Strict => persistence
            .list_bookings_for_flight(flight_code)
            .map_err(translate_persistence_error)?,
        ReadMode::Lenient => persistence.list_bookings_for_flight_or_empty(flight_code),
    };
    to_booking_list(&views)
}

/// Registers a baggage item that belongs to no booking.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the code is
/// invalid, or the code is taken.
pub fn register_baggage(
    persistence: &mut Persistence,
    request: &RegisterBaggageRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BaggageResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(authenticated_actor, "register_baggage")?;
    validate_baggage_code(&request.code).map_err(translate_domain_error)?;

    let item: Baggage = Baggage::checked_in(request.code.clone());
    persistence
        .register_baggage(&item)
        .map_err(translate_persistence_error)?;

    Ok(BaggageResponse {
        baggage: to_baggage_info(&item),
        message: format!("Baggage '{}' registered", request.code),
    })
}

/// Sets one baggage item's status under the configured transition policy.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the status or
/// code is unknown, or the enforced policy rejects the transition.
pub fn update_baggage_status(
    persistence: &mut Persistence,
    code: &str,
    request: &UpdateBaggageStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BaggageResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(
        authenticated_actor,
        "update_baggage_status",
    )?;
    let status: BaggageStatus = request.status.parse().map_err(translate_domain_error)?;

    persistence
        .update_baggage_status(code, status)
        .map_err(translate_persistence_error)?;

    let record: BaggageRecord = load_baggage(persistence, code)?;
    Ok(BaggageResponse {
        baggage: to_baggage_info(&record.baggage),
        message: format!("Baggage '{code}' is now {status}"),
    })
}

/// Sets the status of every baggage item booked on a flight.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the status is
/// unknown, or the update fails.
pub fn update_flight_baggage_status(
    persistence: &mut Persistence,
    flight_code: &str,
    request: &UpdateBaggageStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BulkBaggageStatusResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(
        authenticated_actor,
        "update_flight_baggage_status",
    )?;
    let status: BaggageStatus = request.status.parse().map_err(translate_domain_error)?;

    let updated: usize = persistence
        .update_flight_baggage_status(flight_code, status)
        .map_err(translate_persistence_error)?;

    Ok(BulkBaggageStatusResponse {
        flight_code: flight_code.to_string(),
        status: status.as_str().to_string(),
        updated,
    })
}

/// Lists every lost baggage item.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, or, under
/// [`ReadMode::Strict`], if the read fails.
pub fn list_lost_baggage(
    persistence: &mut Persistence,
    config: &ApiConfig,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LostBaggageResponse, ApiError> {
    AuthorizationService::authorize_manage_operations(authenticated_actor, "list_lost_baggage")?;

    let records: Vec<BaggageRecord> = match config.read_mode {
        ReadMode::Strict => persistence
            .list_lost_baggage()
            .map_err(translate_persistence_error)?,
        ReadMode::Lenient => persistence.list_lost_baggage_or_empty(),
    };

    Ok(LostBaggageResponse {
        items: records
            .into_iter()
            .map(|record| LostBaggageItem {
                code: record.baggage.code,
                booking_id: record.booking_id,
            })
            .collect(),
    })
}
