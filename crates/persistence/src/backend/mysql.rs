// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! MySQL/MariaDB-specific persistence utilities.
//!
//! Compiled only with the `mysql` cargo feature, which requires the
//! `MySQL` client development libraries at build time.
//!
//! ## Schema Parity
//!
//! `MYSQL_MIGRATIONS` embeds `migrations_mysql/`, which must stay
//! semantically identical to the `SQLite` migrations in `migrations/`.
//! Any migration change is made in both directories. `cargo xtask
//! verify-migrations` applies both trees and compares tables, column type
//! families, nullability, primary keys, foreign keys, unique constraints,
//! and indexes. `CHECK` constraints are kept in step by hand.
//!
//! ## Gate Locking
//!
//! Under `REPEATABLE READ` a plain `SELECT` reads the transaction snapshot,
//! so two transactions assigning the same gate could both see it free.
//! [`lock_gate`] takes `SELECT ... FOR UPDATE` on the `gates` row, which
//! queues competing assignments, and [`find_gate_holder`] is a locking read
//! so it sees the flight committed by the transaction it waited on.
//!
//! Validation tests for this backend are `#[ignore]` and read the
//! connection URL from `DATABASE_URL`.

use std::time::Duration;

use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::diesel_schema::{flights, gates};
use crate::error::PersistenceError;
use crate::mutations::gates::gate_holding_statuses;

/// Result type for foreign key check query.
#[derive(QueryableByName)]
struct ForeignKeyCheck {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

/// Helper function to get the last inserted row ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

/// `MySQL`-specific migrations.
pub const MYSQL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

/// Initialize a `MySQL` database at the given URL and run migrations.
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Initializing MySQL database");

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Run pending migrations on the provided `MySQL` connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut MysqlConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running MySQL database migrations");
    conn.run_pending_migrations(MYSQL_MIGRATIONS)?;
    Ok(())
}

/// Sets the `InnoDB` row lock wait bound for this session.
///
/// `MySQL` only accepts whole seconds; sub-second values round up to one.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn set_lock_wait_timeout(
    conn: &mut MysqlConnection,
    timeout: Duration,
) -> Result<(), PersistenceError> {
    let seconds: u64 = timeout.as_secs().max(1);
    debug!(timeout_s = seconds, "Setting MySQL lock wait timeout");

    // NOTE: raw SQL (justified - Diesel has no session variable DSL)
    diesel::sql_query(format!("SET SESSION innodb_lock_wait_timeout = {seconds}"))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Takes an exclusive row lock on `gate_number` and reports whether it
/// exists.
///
/// The lock is held until the enclosing transaction ends.
///
/// # Errors
///
/// Returns an error if the query fails or `innodb_lock_wait_timeout`
/// expires.
pub fn lock_gate(conn: &mut MysqlConnection, gate_number: i32) -> Result<bool, PersistenceError> {
    let locked: Option<i32> = gates::table
        .filter(gates::gate_number.eq(gate_number))
        .select(gates::gate_number)
        .for_update()
        .first::<i32>(conn)
        .optional()?;
    Ok(locked.is_some())
}

/// Finds an active flight other than `flight_code` at `gate_number` on
/// `flight_date` with a locking read.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_gate_holder(
    conn: &mut MysqlConnection,
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
        .for_update()
        .first::<String>(conn)
        .optional()?)
}

/// Verify that foreign key enforcement is enabled on `MySQL`.
///
/// # Errors
///
/// Returns an error if verification fails.
pub fn verify_foreign_key_enforcement(conn: &mut MysqlConnection) -> Result<(), PersistenceError> {
    // NOTE: This is raw SQL (justified - Diesel has no system variable query DSL)
    let result: Result<ForeignKeyCheck, _> =
        diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks").get_result(conn);

    match result {
        Ok(check) => {
            if check.fk_checks == 1 {
                info!("MySQL foreign key enforcement is enabled");
                Ok(())
            } else {
                Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
            }
        }
        Err(e) => Err(PersistenceError::QueryFailed(format!(
            "Failed to verify foreign key enforcement: {e}"
        ))),
    }
}
