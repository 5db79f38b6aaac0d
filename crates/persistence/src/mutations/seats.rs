// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seat inventory mutations.
//!
//! Seat occupancy is only ever changed through guarded single-statement
//! updates so that two writers can never both claim the same seat.

use airops_domain::{SeatLabel, generate_seat_labels};
use diesel::prelude::*;
use tracing::{debug, info, warn};

use crate::data_models::NewSeat;
use crate::diesel_schema::seats;
use crate::error::PersistenceError;

backend_fn! {
/// Materializes the seat layout for a freshly inserted flight.
///
/// Must run in the same transaction as the flight insert so that a failure
/// here leaves no seatless flight behind.
///
/// # Errors
///
/// Returns an error if the capacity is unsupported or the insert fails.
pub fn generate_seats(
    conn: &mut _,
    flight_code: &str,
    total_seats: u32,
) -> Result<usize, PersistenceError> {
    let labels: Vec<SeatLabel> = generate_seat_labels(total_seats)?;

    let rows: Vec<NewSeat<'_>> = labels
        .iter()
        .map(|label| NewSeat {
            flight_code,
            seat_label: label.to_string(),
            occupied: 0,
        })
        .collect();

    let inserted: usize = diesel::insert_into(seats::table)
        .values(&rows)
        .execute(conn)?;

    info!(flight_code, seats = inserted, "Generated seat layout");
    Ok(inserted)
}
}

backend_fn! {
/// Marks a seat occupied if and only if it is currently free.
///
/// # Errors
///
/// Returns `SeatUnavailable` if the seat is already occupied and
/// `SeatNotFound` if the flight has no such seat.
pub fn occupy_seat(
    conn: &mut _,
    flight_code: &str,
    seat_label: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(seats::table)
        .filter(seats::flight_code.eq(flight_code))
        .filter(seats::seat_label.eq(seat_label))
        .filter(seats::occupied.eq(0))
        .set(seats::occupied.eq(1))
        .execute(conn)?;

    if updated == 1 {
        debug!(flight_code, seat_label, "Seat occupied");
        return Ok(());
    }

    let exists: bool = diesel::select(diesel::dsl::exists(
        seats::table
            .filter(seats::flight_code.eq(flight_code))
            .filter(seats::seat_label.eq(seat_label)),
    ))
    .get_result(conn)?;

    if exists {
        Err(PersistenceError::SeatUnavailable {
            flight_code: flight_code.to_string(),
            seat_label: seat_label.to_string(),
        })
    } else {
        Err(PersistenceError::SeatNotFound {
            flight_code: flight_code.to_string(),
            seat_label: seat_label.to_string(),
        })
    }
}
}

backend_fn! {
/// Marks a seat free.
///
/// Returns whether a row changed. Releasing a seat that is already free is
/// logged but never fails, so a cancellation is not blocked by it.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn release_seat(
    conn: &mut _,
    flight_code: &str,
    seat_label: &str,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(seats::table)
        .filter(seats::flight_code.eq(flight_code))
        .filter(seats::seat_label.eq(seat_label))
        .filter(seats::occupied.eq(1))
        .set(seats::occupied.eq(0))
        .execute(conn)?;

    if updated == 0 {
        warn!(flight_code, seat_label, "Release matched no occupied seat");
        return Ok(false);
    }

    debug!(flight_code, seat_label, "Seat released");
    Ok(true)
}
}
