// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::Seat;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::data_models::SeatRow;
use crate::diesel_schema::seats;
use crate::error::PersistenceError;

backend_fn! {
/// Lists a flight's seats in storage order.
///
/// Storage order is unspecified; sort with `sort_seats` before display.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_seats(conn: &mut _, flight_code: &str) -> Result<Vec<Seat>, PersistenceError> {
    let rows: Vec<SeatRow> = seats::table
        .filter(seats::flight_code.eq(flight_code))
        .select(SeatRow::as_select())
        .load(conn)?;

    rows.into_iter().map(SeatRow::into_seat).collect()
}
}

backend_fn! {
/// Counts a flight's occupied seats.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_occupied_seats(conn: &mut _, flight_code: &str) -> Result<u32, PersistenceError> {
    let count: i64 = seats::table
        .filter(seats::flight_code.eq(flight_code))
        .filter(seats::occupied.eq(1))
        .count()
        .get_result(conn)?;

    count
        .to_u32()
        .ok_or_else(|| PersistenceError::Other(format!("Occupied seat count {count} out of range")))
}
}
