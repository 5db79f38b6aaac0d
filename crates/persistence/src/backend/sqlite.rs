// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup and write locking.
//!
//! The booking engine relies on two properties of the `SQLite` connection:
//!
//! - Write transactions open with `BEGIN IMMEDIATE`. The database write
//!   lock is taken up front, so two bookings racing for the last seat
//!   queue on the lock instead of both reading a free seat and failing on
//!   lock upgrade.
//! - `busy_timeout` bounds that queue. A writer that cannot get the lock
//!   within the configured time fails with a database error rather than
//!   blocking forever.
//!
//! Foreign keys are switched on for every connection and checked before
//! the handle is returned, since booking ownership and seat references
//! depend on them. File databases run in WAL mode so readers are not
//! blocked by the single writer.
//!
//! Gate checks need no row locks here: inside a write transaction the
//! connection already holds the database write lock.

use std::time::Duration;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::diesel_schema::{flights, gates};
use crate::error::PersistenceError;
use crate::mutations::gates::gate_holding_statuses;

/// Schema for the `SQLite` backend.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Result of `PRAGMA foreign_keys`. Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Runs a raw PRAGMA statement.
fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))?;
    Ok(())
}

/// Returns the rowid of the last row inserted on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless the connection enforces foreign keys.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled`, or a database error.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeysPragma>(conn)?
        .foreign_keys;

    if enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Sets how long a writer waits for the database lock.
///
/// The value is clamped to `u32::MAX` milliseconds.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn set_busy_timeout(
    conn: &mut SqliteConnection,
    timeout: Duration,
) -> Result<(), PersistenceError> {
    let millis: u128 = timeout.as_millis().min(u128::from(u32::MAX));
    debug!(timeout_ms = %millis, "Setting SQLite busy timeout");
    pragma(conn, &format!("PRAGMA busy_timeout = {millis}"))
}

/// Runs `f` inside a `BEGIN IMMEDIATE` transaction.
///
/// Commits when `f` returns `Ok` and rolls back otherwise.
///
/// # Errors
///
/// Returns the error of `f`, or a database error if the write lock cannot
/// be taken within the busy timeout.
pub fn immediate_write<T, F>(conn: &mut SqliteConnection, f: F) -> Result<T, PersistenceError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
{
    conn.immediate_transaction(f)
}

/// Reports whether `gate_number` exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lock_gate(conn: &mut SqliteConnection, gate_number: i32) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        gates::table.filter(gates::gate_number.eq(gate_number)),
    ))
    .get_result(conn)?)
}

/// Finds an active flight other than `flight_code` at `gate_number` on
/// `flight_date`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_gate_holder(
    conn: &mut SqliteConnection,
    gate_number: i32,
    flight_date: &str,
    flight_code: &str,
) -> Result<Option<String>, PersistenceError> {
    Ok(flights::table
        .filter(flights::gate_number.eq(gate_number))
        .filter(flights::flight_date.eq(flight_date))
        .filter(flights::code.ne(flight_code))
        .filter(flights::status.eq_any(gate_holding_statuses()))
        .select(flights::code)
        .first::<String>(conn)
        .optional()?)
}

/// Applies pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    info!(count = applied.len(), "Applied SQLite migrations");
    Ok(())
}

/// Opens `database_url`, enables foreign keys, and migrates the schema.
///
/// `database_url` is a file path or an in-memory URI.
///
/// # Errors
///
/// Returns an error if the connection, the PRAGMA, or a migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Switches a file database to write-ahead logging.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    pragma(conn, "PRAGMA journal_mode = WAL")
}
