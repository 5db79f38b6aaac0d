// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::User;
use diesel::prelude::*;
use tracing::{debug, warn};

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a user by login.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if the user is
/// not found.
pub fn get_user(conn: &mut _, login: &str) -> Result<Option<User>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::login.eq(login))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserRow::into_user).transpose()
}
}

backend_fn! {
/// Checks a login and password against the stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the query fails or the stored hash is malformed.
/// Returns `Ok(None)` if the login is unknown or the password is wrong.
pub fn verify_credentials(
    conn: &mut _,
    login: &str,
    password: &str,
) -> Result<Option<User>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::login.eq(login))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        debug!(login, "Unknown login");
        return Ok(None);
    };

    let matches: bool = bcrypt::verify(password, &row.password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))?;

    if !matches {
        warn!(login, "Password mismatch");
        return Ok(None);
    }

    row.into_user().map(Some)
}
}

backend_fn! {
/// Counts stored users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}
}
