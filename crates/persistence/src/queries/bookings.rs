// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Denormalized booking reads.
//!
//! Each query joins bookings with their flight and passenger and left-joins
//! baggage. The baggage join fans out to one row per item, so rows are
//! folded back into one [`BookingView`] per ticket number.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{BaggageRow, BookingRow, BookingView, FlightRow, PassengerRow};
use crate::diesel_schema::{baggage, bookings, flights, passengers};
use crate::error::PersistenceError;

/// One row of the booking join.
type JoinedBookingRow = (BookingRow, FlightRow, PassengerRow, Option<BaggageRow>);

/// Folds joined rows into one view per ticket number, ordered by ticket.
fn fold_booking_rows(rows: Vec<JoinedBookingRow>) -> Result<Vec<BookingView>, PersistenceError> {
    let mut views: BTreeMap<String, BookingView> = BTreeMap::new();

    for (booking_row, flight_row, passenger_row, baggage_row) in rows {
        let ticket: String = booking_row.ticket_number.clone();
        let view: &mut BookingView = match views.entry(ticket) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(BookingView::from_rows(booking_row, flight_row, passenger_row)?)
            }
        };
        if let Some(row) = baggage_row {
            view.booking.baggage.push(row.into_record()?.baggage);
        }
    }

    Ok(views.into_values().collect())
}

backend_fn! {
/// Lists the bookings owned by a user, with flight, passenger, and baggage.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_bookings_for_user(
    conn: &mut _,
    login: &str,
) -> Result<Vec<BookingView>, PersistenceError> {
    debug!(login, "Listing bookings for user");

    let rows: Vec<JoinedBookingRow> = bookings::table
        .inner_join(flights::table)
        .inner_join(passengers::table)
        .left_join(baggage::table)
        .filter(bookings::owner_login.eq(login))
        .order((bookings::ticket_number.asc(), baggage::code.nullable().asc()))
        .select((
            BookingRow::as_select(),
            FlightRow::as_select(),
            PassengerRow::as_select(),
            Option::<BaggageRow>::as_select(),
        ))
        .load::<JoinedBookingRow>(conn)?;

    fold_booking_rows(rows)
}
}

backend_fn! {
/// Lists the bookings on a flight, with flight, passenger, and baggage.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_bookings_for_flight(
    conn: &mut _,
    flight_code: &str,
) -> Result<Vec<BookingView>, PersistenceError> {
    debug!(flight_code, "Listing bookings for flight");

    let rows: Vec<JoinedBookingRow> = bookings::table
        .inner_join(flights::table)
        .inner_join(passengers::table)
        .left_join(baggage::table)
        .filter(bookings::flight_code.eq(flight_code))
        .order((bookings::ticket_number.asc(), baggage::code.nullable().asc()))
        .select((
            BookingRow::as_select(),
            FlightRow::as_select(),
            PassengerRow::as_select(),
            Option::<BaggageRow>::as_select(),
        ))
        .load::<JoinedBookingRow>(conn)?;

    fold_booking_rows(rows)
}
}

backend_fn! {
/// Retrieves one booking by ticket number.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if no booking
/// carries the ticket number.
pub fn get_booking(
    conn: &mut _,
    ticket_number: &str,
) -> Result<Option<BookingView>, PersistenceError> {
    let rows: Vec<JoinedBookingRow> = bookings::table
        .inner_join(flights::table)
        .inner_join(passengers::table)
        .left_join(baggage::table)
        .filter(bookings::ticket_number.eq(ticket_number))
        .order(baggage::code.nullable().asc())
        .select((
            BookingRow::as_select(),
            FlightRow::as_select(),
            PassengerRow::as_select(),
            Option::<BaggageRow>::as_select(),
        ))
        .load::<JoinedBookingRow>(conn)?;

    Ok(fold_booking_rows(rows)?.into_iter().next())
}
}
