// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! transaction, and helper functions that cannot be expressed in
//! backend-agnostic Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` backend (default, always compiled)
//! - `mysql`: MySQL/MariaDB backend (behind the `mysql` cargo feature)
//!
//! ## Backend-Agnostic Code
//!
//! Backend-specific code is limited to:
//!
//! - Connection initialization
//! - Migration execution
//! - Write transaction semantics and lock-wait bounds
//! - Backend-specific workarounds for missing Diesel DSL features
//!
//! All domain queries and mutations live in `queries/` and `mutations/`
//! modules and must work across all supported backends.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

use std::time::Duration;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Trait for backend-specific operations.
///
/// Implemented for every supported connection type so that the
/// `backend_fn!` bodies can be written once and stamped out per backend.
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Bounds how long a statement waits for a competing writer's lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be applied.
    fn set_lock_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError>;

    /// Locks the `gates` row for the rest of the write transaction and
    /// reports whether it exists.
    ///
    /// Concurrent assignments of one gate queue on this lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the lock wait times out.
    fn lock_gate(&mut self, gate_number: i32) -> Result<bool, PersistenceError>;

    /// Returns a flight other than `flight_code` that holds `gate_number`
    /// on `flight_date`.
    ///
    /// Reads the latest committed rows, not the transaction snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_gate_holder(
        &mut self,
        gate_number: i32,
        flight_date: &str,
        flight_code: &str,
    ) -> Result<Option<String>, PersistenceError>;

    /// Runs `f` inside a write transaction.
    ///
    /// The write lock is taken when the transaction begins, so two writers
    /// never both read under a shared lock and then fail on upgrade. The
    /// transaction commits when `f` returns `Ok` and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or an error if the transaction cannot
    /// be opened or committed.
    fn write_transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn set_lock_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError> {
        sqlite::set_busy_timeout(self, timeout)
    }

    fn lock_gate(&mut self, gate_number: i32) -> Result<bool, PersistenceError> {
        sqlite::lock_gate(self, gate_number)
    }

    fn find_gate_holder(
        &mut self,
        gate_number: i32,
        flight_date: &str,
        flight_code: &str,
    ) -> Result<Option<String>, PersistenceError> {
        sqlite::find_gate_holder(self, gate_number, flight_date, flight_code)
    }

    fn write_transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>,
    {
        sqlite::immediate_write(self, f)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for diesel::MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn set_lock_timeout(&mut self, timeout: Duration) -> Result<(), PersistenceError> {
        mysql::set_lock_wait_timeout(self, timeout)
    }

    fn lock_gate(&mut self, gate_number: i32) -> Result<bool, PersistenceError> {
        mysql::lock_gate(self, gate_number)
    }

    fn find_gate_holder(
        &mut self,
        gate_number: i32,
        flight_date: &str,
        flight_code: &str,
    ) -> Result<Option<String>, PersistenceError> {
        mysql::find_gate_holder(self, gate_number, flight_date, flight_code)
    }

    fn write_transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>,
    {
        self.transaction(f)
    }
}
