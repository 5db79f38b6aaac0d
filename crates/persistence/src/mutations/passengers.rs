// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::Passenger;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::passengers;
use crate::error::PersistenceError;

backend_fn! {
/// Returns the identifier of the passenger with this document number,
/// inserting the passenger first if the document number is unknown.
///
/// Runs on the caller's connection and does not open a transaction, so the
/// insert is rolled back together with the enclosing booking.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub fn find_or_insert_passenger(
    conn: &mut _,
    passenger: &Passenger,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = passengers::table
        .filter(passengers::document_number.eq(&passenger.document_number))
        .select(passengers::passenger_id)
        .first::<i64>(conn)
        .optional()?;

    if let Some(passenger_id) = existing {
        debug!(passenger_id, "Reusing passenger");
        return Ok(passenger_id);
    }

    diesel::insert_into(passengers::table)
        .values((
            passengers::name.eq(&passenger.name),
            passengers::surname.eq(&passenger.surname),
            passengers::document_number.eq(&passenger.document_number),
        ))
        .execute(conn)?;

    let passenger_id: i64 = conn.get_last_insert_rowid()?;
    info!(passenger_id, "Passenger created");
    Ok(passenger_id)
}
}
