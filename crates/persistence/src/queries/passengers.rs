// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::Passenger;
use diesel::prelude::*;

use crate::data_models::PassengerRow;
use crate::diesel_schema::passengers;
use crate::error::PersistenceError;

backend_fn! {
/// Finds a passenger by document number.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the document
/// number is unknown.
pub fn find_passenger_by_document(
    conn: &mut _,
    document_number: &str,
) -> Result<Option<Passenger>, PersistenceError> {
    let row: Option<PassengerRow> = passengers::table
        .filter(passengers::document_number.eq(document_number))
        .select(PassengerRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Passenger::from))
}
}

backend_fn! {
/// Counts stored passengers.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_passengers(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(passengers::table.count().get_result(conn)?)
}
}
