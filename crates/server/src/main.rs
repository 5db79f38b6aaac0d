// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod credentials;

#[cfg(test)]
mod tests;

use airops_api::{
    ApiConfig, ApiError, AssignGateRequest, BaggageResponse, BookingStatusResponse,
    BulkBaggageStatusResponse, CreateBookingRequest, CreateBookingResponse, CreateFlightRequest,
    CreateGateRequest, CreateGateResponse, CreateUserRequest, CreateUserResponse, FlightResponse,
    ListBookingsResponse, LostBaggageResponse, ReadMode, RegisterBaggageRequest, SeatMapResponse,
    UpdateBaggageStatusRequest, UpdateBookingStatusRequest, UpdateFlightStatusRequest,
};
use airops_domain::TransitionPolicy;
use airops_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::credentials::Caller;

/// Airops Server - HTTP server for the airport operations backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// How long a write waits for a competing transaction, in milliseconds
    #[arg(long, default_value_t = 5000)]
    lock_timeout_ms: u64,

    /// Reject baggage status updates that skip or reverse a lifecycle step
    #[arg(long)]
    enforce_baggage_transitions: bool,

    /// Return empty results instead of errors when a read fails
    #[arg(long)]
    lenient_reads: bool,

    /// Login of the Administrator to create when the store has no users
    #[arg(long, requires = "bootstrap_password")]
    bootstrap_admin: Option<String>,

    /// Password for `--bootstrap-admin`
    #[arg(long, requires = "bootstrap_admin")]
    bootstrap_password: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a single async mutex, so requests are
/// serialized at this boundary.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Runtime options for the API layer.
    config: ApiConfig,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } | ApiError::CredentialPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/users`.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, HttpError> {
    info!(actor = %actor.login, login = %req.login, "Handling create_user request");
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateUserResponse = airops_api::create_user(&mut persistence, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/gates`.
async fn handle_create_gate(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<CreateGateRequest>,
) -> Result<Json<CreateGateResponse>, HttpError> {
    info!(actor = %actor.login, gate = req.gate_number, "Handling create_gate request");
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateGateResponse = airops_api::create_gate(&mut persistence, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/flights`.
async fn handle_create_flight(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<CreateFlightRequest>,
) -> Result<Json<FlightResponse>, HttpError> {
    info!(actor = %actor.login, flight_code = %req.code, "Handling create_flight request");
    let mut persistence = app_state.persistence.lock().await;
    let response: FlightResponse = airops_api::create_flight(&mut persistence, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/flights/{code}/status`.
async fn handle_update_flight_status(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(flight_code): Path<String>,
    Json(req): Json<UpdateFlightStatusRequest>,
) -> Result<Json<FlightResponse>, HttpError> {
    info!(
        actor = %actor.login,
        flight_code = %flight_code,
        status = %req.status,
        "Handling update_flight_status request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: FlightResponse =
        airops_api::update_flight_status(&mut persistence, &flight_code, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/flights/{code}/gate`.
async fn handle_assign_gate(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(flight_code): Path<String>,
    Json(req): Json<AssignGateRequest>,
) -> Result<Json<FlightResponse>, HttpError> {
    info!(
        actor = %actor.login,
        flight_code = %flight_code,
        gate = ?req.gate_number,
        "Handling assign_gate request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: FlightResponse =
        airops_api::assign_gate(&mut persistence, &flight_code, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/flights/{code}/seats`.
async fn handle_get_seat_map(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(flight_code): Path<String>,
) -> Result<Json<SeatMapResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SeatMapResponse =
        airops_api::get_seat_map(&mut persistence, &app_state.config, &flight_code, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/flights/{code}/bookings`.
async fn handle_list_flight_bookings(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(flight_code): Path<String>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListBookingsResponse = airops_api::list_flight_bookings(
        &mut persistence,
        &app_state.config,
        &flight_code,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/flights/{code}/baggage/status`.
async fn handle_update_flight_baggage_status(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(flight_code): Path<String>,
    Json(req): Json<UpdateBaggageStatusRequest>,
) -> Result<Json<BulkBaggageStatusResponse>, HttpError> {
    info!(
        actor = %actor.login,
        flight_code = %flight_code,
        status = %req.status,
        "Handling bulk baggage status request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: BulkBaggageStatusResponse =
        airops_api::update_flight_baggage_status(&mut persistence, &flight_code, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings`.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, HttpError> {
    info!(
        actor = %actor.login,
        ticket = %req.ticket_number,
        flight_code = %req.flight_code,
        seat = %req.seat_label,
        "Handling create_booking request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateBookingResponse =
        airops_api::create_booking(&mut persistence, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{ticket}/cancel`.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(ticket_number): Path<String>,
) -> Result<Json<BookingStatusResponse>, HttpError> {
    info!(actor = %actor.login, ticket = %ticket_number, "Handling cancel_booking request");
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingStatusResponse =
        airops_api::cancel_booking(&mut persistence, &ticket_number, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{ticket}/status`.
async fn handle_update_booking_status(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(ticket_number): Path<String>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingStatusResponse>, HttpError> {
    info!(
        actor = %actor.login,
        ticket = %ticket_number,
        status = %req.status,
        "Handling update_booking_status request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingStatusResponse =
        airops_api::update_booking_status(&mut persistence, &ticket_number, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/users/{login}/bookings`.
async fn handle_list_user_bookings(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(login): Path<String>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListBookingsResponse =
        airops_api::list_user_bookings(&mut persistence, &app_state.config, &login, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/baggage`.
async fn handle_register_baggage(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<RegisterBaggageRequest>,
) -> Result<Json<BaggageResponse>, HttpError> {
    info!(actor = %actor.login, code = %req.code, "Handling register_baggage request");
    let mut persistence = app_state.persistence.lock().await;
    let response: BaggageResponse = airops_api::register_baggage(&mut persistence, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/baggage/{code}/status`.
async fn handle_update_baggage_status(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(code): Path<String>,
    Json(req): Json<UpdateBaggageStatusRequest>,
) -> Result<Json<BaggageResponse>, HttpError> {
    info!(
        actor = %actor.login,
        code = %code,
        status = %req.status,
        "Handling update_baggage_status request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: BaggageResponse =
        airops_api::update_baggage_status(&mut persistence, &code, &req, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/baggage/lost`.
async fn handle_list_lost_baggage(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
) -> Result<Json<LostBaggageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LostBaggageResponse =
        airops_api::list_lost_baggage(&mut persistence, &app_state.config, &actor)?;
    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(handle_create_user))
        .route("/users/{login}/bookings", get(handle_list_user_bookings))
        .route("/gates", post(handle_create_gate))
        .route("/flights", post(handle_create_flight))
        .route("/flights/{code}/status", post(handle_update_flight_status))
        .route("/flights/{code}/gate", post(handle_assign_gate))
        .route("/flights/{code}/seats", get(handle_get_seat_map))
        .route("/flights/{code}/bookings", get(handle_list_flight_bookings))
        .route(
            "/flights/{code}/baggage/status",
            post(handle_update_flight_baggage_status),
        )
        .route("/bookings", post(handle_create_booking))
        .route("/bookings/{ticket}/cancel", post(handle_cancel_booking))
        .route("/bookings/{ticket}/status", post(handle_update_booking_status))
        .route("/baggage", post(handle_register_baggage))
        .route("/baggage/lost", get(handle_list_lost_baggage))
        .route("/baggage/{code}/status", post(handle_update_baggage_status))
        .with_state(app_state)
}

/// Opens the store selected on the command line.
fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    #[cfg(feature = "mysql")]
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        return Ok(Persistence::new_with_mysql(url)?);
    }

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Airops Server");

    let baggage_policy: TransitionPolicy = if args.enforce_baggage_transitions {
        TransitionPolicy::Enforced
    } else {
        TransitionPolicy::Unchecked
    };
    let mut persistence: Persistence = open_persistence(&args)?
        .with_lock_timeout(Duration::from_millis(args.lock_timeout_ms))?
        .with_baggage_policy(baggage_policy);
    info!(
        lock_timeout_ms = args.lock_timeout_ms,
        baggage_policy = ?baggage_policy,
        "Persistence configured"
    );

    if let (Some(login), Some(password)) = (&args.bootstrap_admin, &args.bootstrap_password) {
        airops_api::bootstrap_administrator(&mut persistence, login, password)?;
    }

    let config: ApiConfig = ApiConfig {
        read_mode: if args.lenient_reads {
            ReadMode::Lenient
        } else {
            ReadMode::Strict
        },
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
