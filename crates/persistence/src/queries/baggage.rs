// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::BaggageStatus;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{BaggageRecord, BaggageRow};
use crate::diesel_schema::baggage;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a baggage item by code.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the code is
/// unknown.
pub fn get_baggage(conn: &mut _, code: &str) -> Result<Option<BaggageRecord>, PersistenceError> {
    let row: Option<BaggageRow> = baggage::table
        .filter(baggage::code.eq(code))
        .select(BaggageRow::as_select())
        .first(conn)
        .optional()?;

    row.map(BaggageRow::into_record).transpose()
}
}

backend_fn! {
/// Lists every baggage item whose status is `Lost`, ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_lost_baggage(conn: &mut _) -> Result<Vec<BaggageRecord>, PersistenceError> {
    debug!("Listing lost baggage");

    let rows: Vec<BaggageRow> = baggage::table
        .filter(baggage::status.eq(BaggageStatus::Lost.as_str()))
        .order(baggage::code.asc())
        .select(BaggageRow::as_select())
        .load(conn)?;

    rows.into_iter().map(BaggageRow::into_record).collect()
}
}
