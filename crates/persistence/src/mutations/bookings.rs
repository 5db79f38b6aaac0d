// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking transaction engine.
//!
//! Creating and cancelling a booking each touch four tables: passengers,
//! bookings, baggage, and the flight/seat inventory. Every step runs inside
//! a single write transaction on the caller's connection, so a failure at
//! any step leaves the store exactly as it was before the call.
//!
//! Contended state (the flight's `available_seats` counter and each seat's
//! `occupied` flag) is only changed through guarded single-statement
//! updates. A guard that matches zero rows is how a lost race surfaces:
//! the transaction fails with a conflict error and rolls back.

use airops_domain::{Booking, BookingStatus, DomainError};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{BookingReceipt, NewBaggage};
use crate::diesel_schema::{baggage, bookings, flights};
use crate::error::PersistenceError;
#[cfg(feature = "mysql")]
use crate::mutations::passengers::find_or_insert_passenger_mysql;
use crate::mutations::passengers::find_or_insert_passenger_sqlite;
#[cfg(feature = "mysql")]
use crate::mutations::seats::{occupy_seat_mysql, release_seat_mysql};
use crate::mutations::seats::{occupy_seat_sqlite, release_seat_sqlite};

backend_fn! {
/// Classifies a rejected booking insert.
///
/// A unique violation means the ticket number is taken. A foreign key
/// violation means either the flight or the owning user is missing.
fn explain_booking_insert_failure(
    conn: &mut _,
    booking: &Booking,
    err: DieselError,
) -> PersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateTicket(booking.ticket_number.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            let flight_exists: Result<bool, DieselError> = diesel::select(diesel::dsl::exists(
                flights::table.filter(flights::code.eq(booking.flight_code.value())),
            ))
            .get_result(conn);
            match flight_exists {
                Ok(false) => {
                    PersistenceError::FlightNotFound(booking.flight_code.value().to_string())
                }
                Ok(true) => PersistenceError::UserNotFound(booking.owner_login.clone()),
                Err(e) => PersistenceError::from(e),
            }
        }
        other => PersistenceError::from(other),
    }
}
}

backend_fn! {
/// Classifies a rejected baggage insert, naming the first code that
/// already exists.
fn explain_baggage_insert_failure(
    conn: &mut _,
    codes: &[&str],
    err: DieselError,
) -> PersistenceError {
    if !matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return PersistenceError::from(err);
    }

    let taken: Result<Option<String>, DieselError> = baggage::table
        .filter(baggage::code.eq_any(codes.to_vec()))
        .select(baggage::code)
        .order(baggage::code.asc())
        .first::<String>(conn)
        .optional();

    match taken {
        Ok(Some(code)) => PersistenceError::DuplicateBaggageCode(code),
        Ok(None) => PersistenceError::from(err),
        Err(e) => PersistenceError::from(e),
    }
}
}

backend_fn! {
/// Takes one seat off a flight's available counter, refusing to go below
/// zero.
///
/// # Errors
///
/// Returns `FlightSoldOut` when the guard rejects the update and
/// `FlightNotFound` when there is no such flight.
fn decrement_available_seats(conn: &mut _, flight_code: &str) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(flights::table)
        .filter(flights::code.eq(flight_code))
        .filter(flights::available_seats.gt(0))
        .set(flights::available_seats.eq(flights::available_seats - 1))
        .execute(conn)?;

    if updated == 1 {
        return Ok(());
    }

    let exists: bool = diesel::select(diesel::dsl::exists(
        flights::table.filter(flights::code.eq(flight_code)),
    ))
    .get_result(conn)?;

    if exists {
        Err(PersistenceError::FlightSoldOut(flight_code.to_string()))
    } else {
        Err(PersistenceError::FlightNotFound(flight_code.to_string()))
    }
}
}

backend_fn! {
/// Returns one seat to a flight's available counter, refusing to exceed
/// the flight's capacity.
///
/// # Errors
///
/// Returns `InventoryInconsistent` when the guard rejects the update.
fn increment_available_seats(conn: &mut _, flight_code: &str) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(flights::table)
        .filter(flights::code.eq(flight_code))
        .filter(flights::available_seats.lt(flights::total_seats))
        .set(flights::available_seats.eq(flights::available_seats + 1))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::InventoryInconsistent(format!(
            "flight {flight_code} already has every seat available"
        )));
    }
    Ok(())
}
}

backend_fn! {
/// Creates a booking.
///
/// Steps, all inside one write transaction:
///
/// 1. Find the passenger by document number, inserting it if unknown.
/// 2. Insert the booking row.
/// 3. Insert the booking's baggage tagged with the new booking id.
/// 4. Decrement the flight's available seats, guarded by `> 0`.
/// 5. Occupy the seat, guarded by `occupied = 0`.
///
/// The caller is expected to have validated `booking`.
///
/// # Errors
///
/// Returns `FlightSoldOut`, `SeatUnavailable`, `SeatNotFound`,
/// `FlightNotFound`, `DuplicateTicket`, `DuplicateBaggageCode`,
/// `UserNotFound`, or a database error. The store is unchanged on error,
/// including the passenger insert of step 1.
pub fn create_booking(
    conn: &mut _,
    booking: &Booking,
) -> Result<BookingReceipt, PersistenceError>
where calls [
    find_or_insert_passenger,
    explain_booking_insert_failure,
    explain_baggage_insert_failure,
    decrement_available_seats,
    occupy_seat,
]
{
    if !booking.status.holds_seat() {
        return Err(PersistenceError::DomainViolation(
            DomainError::InvalidBookingStatus {
                status: booking.status.as_str().to_string(),
            },
        ));
    }

    let flight_code: &str = booking.flight_code.value();
    let seat_label: String = booking.seat_label.to_string();

    debug!(
        ticket = %booking.ticket_number,
        flight_code,
        seat = %seat_label,
        "Creating booking"
    );

    let receipt: BookingReceipt = conn.write_transaction(|conn| {
        let passenger_id: i64 = find_or_insert_passenger(conn, &booking.passenger)?;

        let inserted: Result<usize, DieselError> = diesel::insert_into(bookings::table)
            .values((
                bookings::flight_code.eq(flight_code),
                bookings::passenger_id.eq(passenger_id),
                bookings::ticket_number.eq(&booking.ticket_number),
                bookings::seat_label.eq(&seat_label),
                bookings::status.eq(booking.status.as_str()),
                bookings::owner_login.eq(&booking.owner_login),
            ))
            .execute(conn);
        if let Err(e) = inserted {
            return Err(explain_booking_insert_failure(conn, booking, e));
        }
        let booking_id: i64 = conn.get_last_insert_rowid()?;

        if !booking.baggage.is_empty() {
            let rows: Vec<NewBaggage<'_>> = booking
                .baggage
                .iter()
                .map(|item| NewBaggage {
                    code: &item.code,
                    status: item.status.as_str(),
                    booking_id: Some(booking_id),
                })
                .collect();
            let inserted: Result<usize, DieselError> = diesel::insert_into(baggage::table)
                .values(&rows)
                .execute(conn);
            if let Err(e) = inserted {
                let codes: Vec<&str> = rows.iter().map(|row| row.code).collect();
                return Err(explain_baggage_insert_failure(conn, &codes, e));
            }
        }

        decrement_available_seats(conn, flight_code)?;
        occupy_seat(conn, flight_code, &seat_label)?;

        Ok(BookingReceipt {
            booking_id,
            passenger_id,
            ticket_number: booking.ticket_number.clone(),
        })
    })?;

    info!(
        ticket = %receipt.ticket_number,
        booking_id = receipt.booking_id,
        passenger_id = receipt.passenger_id,
        flight_code,
        "Booking created"
    );
    Ok(receipt)
}
}

backend_fn! {
/// Distinguishes an unknown ticket from an already cancelled booking after
/// a guarded status update matched nothing.
fn explain_missed_status_update(
    conn: &mut _,
    ticket_number: &str,
) -> PersistenceError {
    let status: Result<Option<String>, DieselError> = bookings::table
        .filter(bookings::ticket_number.eq(ticket_number))
        .select(bookings::status)
        .first::<String>(conn)
        .optional();

    match status {
        Ok(Some(_)) => PersistenceError::BookingAlreadyCancelled(ticket_number.to_string()),
        Ok(None) => PersistenceError::TicketNotFound(ticket_number.to_string()),
        Err(e) => PersistenceError::from(e),
    }
}
}

backend_fn! {
/// Cancels a booking and returns its seat to the flight's inventory.
///
/// The status change, the counter increment, and the seat release commit
/// together or not at all. Baggage attached to the booking is left as is.
///
/// # Errors
///
/// Returns `TicketNotFound`, `BookingAlreadyCancelled`,
/// `InventoryInconsistent`, or a database error.
pub fn cancel_booking(conn: &mut _, ticket_number: &str) -> Result<(), PersistenceError>
where calls [explain_missed_status_update, increment_available_seats, release_seat]
{
    let cancelled: &str = BookingStatus::Cancelled.as_str();

    let (flight_code, seat_label): (String, String) = conn.write_transaction(|conn| {
        let updated: usize = diesel::update(bookings::table)
            .filter(bookings::ticket_number.eq(ticket_number))
            .filter(bookings::status.ne(cancelled))
            .set(bookings::status.eq(cancelled))
            .execute(conn)?;
        if updated == 0 {
            return Err(explain_missed_status_update(conn, ticket_number));
        }

        let (flight_code, seat_label): (String, String) = bookings::table
            .filter(bookings::ticket_number.eq(ticket_number))
            .select((bookings::flight_code, bookings::seat_label))
            .first::<(String, String)>(conn)?;

        increment_available_seats(conn, &flight_code)?;
        if !release_seat(conn, &flight_code, &seat_label)? {
            warn!(
                ticket = ticket_number,
                flight_code = %flight_code,
                seat = %seat_label,
                "Cancelled booking held no occupied seat"
            );
        }
        Ok((flight_code, seat_label))
    })?;

    info!(
        ticket = ticket_number,
        flight_code = %flight_code,
        seat = %seat_label,
        "Booking cancelled"
    );
    Ok(())
}
}

backend_fn! {
/// Moves a booking between `Pending` and `Confirmed`.
///
/// The current status is read and checked with
/// [`BookingStatus::validate_transition`], then written with a guard on
/// that status. There is no inventory side effect; cancellation goes
/// through `cancel_booking` instead.
///
/// # Errors
///
/// Returns `TicketNotFound`, `BookingAlreadyCancelled`, or a database
/// error. Passing `Cancelled` is rejected as a domain violation.
fn set_live_booking_status(
    conn: &mut _,
    ticket_number: &str,
    status: BookingStatus,
) -> Result<(), PersistenceError>
where calls [explain_missed_status_update]
{
    conn.write_transaction(|conn| {
        let current: BookingStatus = bookings::table
            .filter(bookings::ticket_number.eq(ticket_number))
            .select(bookings::status)
            .first::<String>(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::TicketNotFound(ticket_number.to_string()))?
            .parse()?;

        if current.validate_transition(status).is_err() {
            return Err(PersistenceError::BookingAlreadyCancelled(
                ticket_number.to_string(),
            ));
        }
        if !status.holds_seat() {
            return Err(PersistenceError::DomainViolation(
                DomainError::InvalidStatusTransition {
                    from: current.as_str().to_string(),
                    to: status.as_str().to_string(),
                    reason: String::from("cancellation must release inventory"),
                },
            ));
        }

        let updated: usize = diesel::update(bookings::table)
            .filter(bookings::ticket_number.eq(ticket_number))
            .filter(bookings::status.eq(current.as_str()))
            .set(bookings::status.eq(status.as_str()))
            .execute(conn)?;

        if updated == 0 {
            return Err(explain_missed_status_update(conn, ticket_number));
        }

        info!(
            ticket = ticket_number,
            from = %current,
            to = %status,
            "Booking status updated"
        );
        Ok(())
    })
}
}

backend_fn! {
/// Applies a booking status, dispatching `Cancelled` to `cancel_booking`.
///
/// # Errors
///
/// Returns `TicketNotFound`, `BookingAlreadyCancelled`,
/// `InventoryInconsistent`, or a database error.
pub fn update_booking_status(
    conn: &mut _,
    status: BookingStatus,
    ticket_number: &str,
) -> Result<(), PersistenceError>
where calls [cancel_booking, set_live_booking_status]
{
    match status {
        BookingStatus::Cancelled => cancel_booking(conn, ticket_number),
        BookingStatus::Pending | BookingStatus::Confirmed => {
            set_live_booking_status(conn, ticket_number, status)
        }
    }
}
}
