// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airops_domain::User;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a user, storing only a bcrypt hash of `password`.
///
/// # Errors
///
/// Returns `UserAlreadyExists` if the login is taken, or an error if
/// hashing or the insert fails.
pub fn create_user(conn: &mut _, user: &User, password: &str) -> Result<(), PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::login.eq(&user.login),
            users::password_hash.eq(&password_hash),
            users::name.eq(&user.name),
            users::surname.eq(&user.surname),
            users::role.eq(user.role.as_str()),
        ))
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::UserAlreadyExists(user.login.clone())
            }
            other => PersistenceError::from(other),
        })?;

    info!(login = %user.login, role = %user.role, "User created");
    Ok(())
}
}
