// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight administration: creation with seat layout, status, delay, and
//! gate assignment.

use airops_domain::{Flight, FlightStatus, validate_delay};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{FlightRow, from_int_column, to_int_column};
use crate::diesel_schema::flights;
use crate::error::PersistenceError;
#[cfg(feature = "mysql")]
use crate::mutations::gates::ensure_gate_free_mysql;
use crate::mutations::gates::ensure_gate_free_sqlite;
#[cfg(feature = "mysql")]
use crate::mutations::seats::generate_seats_mysql;
use crate::mutations::seats::generate_seats_sqlite;

/// Gate and date of a flight, as stored.
type GateSlot = (Option<i32>, String);

backend_fn! {
/// Inserts a flight and materializes its seats in one transaction.
///
/// The flight starts with every seat available regardless of the
/// `available_seats` value passed in.
///
/// # Errors
///
/// Returns `FlightAlreadyExists` for a duplicate code, `GateNotFound` or
/// `GateOccupied` if a gate is requested and unavailable, or a database
/// error. Nothing is persisted on failure.
pub fn create_flight(conn: &mut _, flight: &Flight) -> Result<(), PersistenceError>
where calls [generate_seats, ensure_gate_free]
{
    let mut row: FlightRow = FlightRow::from_flight(flight)?;
    row.available_seats = row.total_seats;

    conn.write_transaction(|conn| {
        if let Some(gate) = flight.gate {
            ensure_gate_free(conn, gate, &row.flight_date, &row.code)?;
        }

        diesel::insert_into(flights::table)
            .values(&row)
            .execute(conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    PersistenceError::FlightAlreadyExists(row.code.clone())
                }
                other => PersistenceError::from(other),
            })?;

        generate_seats(conn, &row.code, flight.total_seats)?;
        Ok(())
    })?;

    info!(
        flight_code = %row.code,
        total_seats = flight.total_seats,
        "Flight created"
    );
    Ok(())
}
}

backend_fn! {
/// Sets a flight's operational status.
///
/// Moving a gated flight back into a gate-holding status re-checks the gate
/// so that reactivation cannot produce a double assignment.
///
/// # Errors
///
/// Returns `FlightNotFound`, `GateOccupied`, or a database error.
pub fn update_flight_status(
    conn: &mut _,
    flight_code: &str,
    status: FlightStatus,
) -> Result<(), PersistenceError>
where calls [ensure_gate_free]
{
    conn.write_transaction(|conn| {
        let (gate, flight_date): GateSlot = flights::table
            .filter(flights::code.eq(flight_code))
            .select((flights::gate_number, flights::flight_date))
            .first::<GateSlot>(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::FlightNotFound(flight_code.to_string()))?;

        if let Some(gate) = gate.filter(|_| status.holds_gate()) {
            let gate: u32 = from_int_column(gate, "gate_number")?;
            ensure_gate_free(conn, gate, &flight_date, flight_code)?;
        }

        diesel::update(flights::table)
            .filter(flights::code.eq(flight_code))
            .set(flights::status.eq(status.as_str()))
            .execute(conn)?;
        Ok(())
    })?;

    info!(flight_code, status = %status, "Flight status updated");
    Ok(())
}
}

backend_fn! {
/// Records a flight's accumulated delay.
///
/// # Errors
///
/// Returns `FlightNotFound`, a domain error for an out-of-range delay, or a
/// database error.
pub fn update_flight_delay(
    conn: &mut _,
    flight_code: &str,
    delay_minutes: u32,
) -> Result<(), PersistenceError> {
    validate_delay(delay_minutes)?;
    let column: i32 = to_int_column(delay_minutes, "delay_minutes")?;

    let updated: usize = diesel::update(flights::table)
        .filter(flights::code.eq(flight_code))
        .set(flights::delay_minutes.eq(column))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::FlightNotFound(flight_code.to_string()));
    }

    info!(flight_code, delay_minutes, "Flight delay updated");
    Ok(())
}
}

backend_fn! {
/// Assigns a gate to a flight, or clears the assignment with `None`.
///
/// # Errors
///
/// Returns `FlightNotFound`, `GateNotFound`, `GateOccupied`, or a database
/// error.
pub fn assign_gate(
    conn: &mut _,
    flight_code: &str,
    gate_number: Option<u32>,
) -> Result<(), PersistenceError>
where calls [ensure_gate_free]
{
    let column: Option<i32> = gate_number
        .map(|gate| to_int_column(gate, "gate_number"))
        .transpose()?;

    conn.write_transaction(|conn| {
        let flight_date: String = flights::table
            .filter(flights::code.eq(flight_code))
            .select(flights::flight_date)
            .first::<String>(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::FlightNotFound(flight_code.to_string()))?;

        if let Some(gate) = gate_number {
            ensure_gate_free(conn, gate, &flight_date, flight_code)?;
        }

        diesel::update(flights::table)
            .filter(flights::code.eq(flight_code))
            .set(flights::gate_number.eq(column))
            .execute(conn)?;
        Ok(())
    })?;

    info!(flight_code, gate = ?gate_number, "Gate assignment updated");
    Ok(())
}
}
