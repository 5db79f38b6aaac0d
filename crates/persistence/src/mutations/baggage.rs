// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Baggage lifecycle mutations.
//!
//! Baggage status changes are independent of booking transactions. Under
//! [`TransitionPolicy::Unchecked`] any status may be written; under
//! [`TransitionPolicy::Enforced`] a row only moves if its current status is
//! a valid predecessor of the requested one.

use airops_domain::{Baggage, BaggageStatus, TransitionPolicy};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::NewBaggage;
use crate::diesel_schema::{baggage, bookings};
use crate::error::PersistenceError;

backend_fn! {
/// Registers a baggage item that belongs to no booking.
///
/// # Errors
///
/// Returns `DuplicateBaggageCode` if the code is taken.
pub fn register_baggage(conn: &mut _, item: &Baggage) -> Result<(), PersistenceError> {
    diesel::insert_into(baggage::table)
        .values(NewBaggage {
            code: &item.code,
            status: item.status.as_str(),
            booking_id: None,
        })
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateBaggageCode(item.code.clone())
            }
            other => PersistenceError::from(other),
        })?;

    info!(code = %item.code, status = %item.status, "Baggage registered");
    Ok(())
}
}

backend_fn! {
/// Sets the status of one baggage item.
///
/// # Errors
///
/// Returns `BaggageNotFound`, a domain violation when `policy` is
/// `Enforced` and the transition is not allowed, or a database error.
pub fn update_baggage_status(
    conn: &mut _,
    code: &str,
    status: BaggageStatus,
    policy: TransitionPolicy,
) -> Result<(), PersistenceError> {
    conn.write_transaction(|conn| {
        let current: String = baggage::table
            .filter(baggage::code.eq(code))
            .select(baggage::status)
            .first::<String>(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::BaggageNotFound(code.to_string()))?;

        if policy == TransitionPolicy::Enforced {
            current.parse::<BaggageStatus>()?.validate_transition(status)?;
        }

        // Guarded on the status just read.
        let updated: usize = diesel::update(baggage::table)
            .filter(baggage::code.eq(code))
            .filter(baggage::status.eq(&current))
            .set(baggage::status.eq(status.as_str()))
            .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::BaggageNotFound(code.to_string()));
        }
        Ok(())
    })?;

    info!(code, status = %status, "Baggage status updated");
    Ok(())
}
}

backend_fn! {
/// Sets the status of every baggage item booked on a flight, in one
/// statement.
///
/// Under `Enforced`, items whose current status is not a predecessor of
/// `status` are left untouched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_flight_baggage_status(
    conn: &mut _,
    flight_code: &str,
    status: BaggageStatus,
    policy: TransitionPolicy,
) -> Result<usize, PersistenceError> {
    let flight_bookings = bookings::table
        .filter(bookings::flight_code.eq(flight_code))
        .select(bookings::booking_id.nullable());

    let updated: usize = match policy {
        TransitionPolicy::Unchecked => diesel::update(baggage::table)
            .filter(baggage::booking_id.eq_any(flight_bookings))
            .set(baggage::status.eq(status.as_str()))
            .execute(conn)?,
        TransitionPolicy::Enforced => {
            let predecessors: Vec<&str> = status
                .predecessors()
                .iter()
                .map(BaggageStatus::as_str)
                .collect();
            if predecessors.is_empty() {
                debug!(flight_code, status = %status, "No status may precede target");
                0
            } else {
                diesel::update(baggage::table)
                    .filter(baggage::booking_id.eq_any(flight_bookings))
                    .filter(baggage::status.eq_any(predecessors))
                    .set(baggage::status.eq(status.as_str()))
                    .execute(conn)?
            }
        }
    };

    info!(flight_code, status = %status, updated, "Flight baggage status updated");
    Ok(updated)
}
}
