// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::{Flight, Gate};
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{FlightRow, from_int_column};
use crate::diesel_schema::{flights, gates};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a flight by code.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the flight is
/// not found.
pub fn get_flight(conn: &mut _, flight_code: &str) -> Result<Option<Flight>, PersistenceError> {
    debug!(flight_code, "Looking up flight");

    let row: Option<FlightRow> = flights::table
        .filter(flights::code.eq(flight_code))
        .select(FlightRow::as_select())
        .first(conn)
        .optional()?;

    row.map(FlightRow::into_flight).transpose()
}
}

backend_fn! {
/// Lists every flight, ordered by date, departure time, then code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_flights(conn: &mut _) -> Result<Vec<Flight>, PersistenceError> {
    let rows: Vec<FlightRow> = flights::table
        .order((
            flights::flight_date.asc(),
            flights::departure_time.asc(),
            flights::code.asc(),
        ))
        .select(FlightRow::as_select())
        .load(conn)?;

    rows.into_iter().map(FlightRow::into_flight).collect()
}
}

backend_fn! {
/// Lists every gate in ascending order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_gates(conn: &mut _) -> Result<Vec<Gate>, PersistenceError> {
    let numbers: Vec<i32> = gates::table
        .order(gates::gate_number.asc())
        .select(gates::gate_number)
        .load(conn)?;

    numbers
        .into_iter()
        .map(|number| {
            Ok(Gate {
                number: from_int_column(number, "gate_number")?,
            })
        })
        .collect()
}
}
