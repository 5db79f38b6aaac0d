// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gate mutations and the gate double-assignment check.

use airops_domain::FlightStatus;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::to_int_column;
use crate::diesel_schema::gates;
use crate::error::PersistenceError;

/// Statuses during which a flight holds its gate.
pub(crate) fn gate_holding_statuses() -> Vec<&'static str> {
    [
        FlightStatus::Scheduled,
        FlightStatus::Delayed,
        FlightStatus::Departed,
        FlightStatus::Landed,
        FlightStatus::Cancelled,
    ]
    .into_iter()
    .filter(FlightStatus::holds_gate)
    .map(|status| status.as_str())
    .collect()
}

backend_fn! {
/// Creates a gate.
///
/// # Errors
///
/// Returns `GateAlreadyExists` if the number is taken.
pub fn create_gate(conn: &mut _, gate_number: u32) -> Result<(), PersistenceError> {
    let column: i32 = to_int_column(gate_number, "gate_number")?;

    diesel::insert_into(gates::table)
        .values(gates::gate_number.eq(column))
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::GateAlreadyExists(gate_number)
            }
            other => PersistenceError::from(other),
        })?;

    info!(gate_number, "Gate created");
    Ok(())
}
}

backend_fn! {
/// Fails if `gate_number` does not exist or is held on `flight_date` by an
/// active flight other than `flight_code`.
///
/// Call inside the write transaction that performs the assignment. The
/// gate row stays locked until that transaction ends, so concurrent
/// assignments of one gate are checked one at a time.
///
/// # Errors
///
/// Returns `GateNotFound` or `GateOccupied`.
pub fn ensure_gate_free(
    conn: &mut _,
    gate_number: u32,
    flight_date: &str,
    flight_code: &str,
) -> Result<(), PersistenceError> {
    let column: i32 = to_int_column(gate_number, "gate_number")?;

    if !conn.lock_gate(column)? {
        return Err(PersistenceError::GateNotFound(gate_number));
    }

    let holder: Option<String> = conn.find_gate_holder(column, flight_date, flight_code)?;

    if let Some(holder) = holder {
        debug!(gate_number, flight_date, holder = %holder, "Gate already held");
        return Err(PersistenceError::GateOccupied {
            gate: gate_number,
            flight_code: holder,
            date: flight_date.to_string(),
        });
    }

    Ok(())
}
}
