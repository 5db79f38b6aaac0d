// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `bookings`: Denormalized booking views (by user, by flight, by ticket)
//! - `flights`: Flight and gate lookups
//! - `seats`: Seat listings and occupancy counts
//! - `passengers`: Passenger lookups
//! - `baggage`: Baggage lookups and the lost baggage report
//! - `users`: User lookups and credential checks
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `Persistence` adapter in `lib.rs` dispatches to the appropriate version
//! based on the active backend connection.

pub mod baggage;
pub mod bookings;
pub mod flights;
pub mod passengers;
pub mod seats;
pub mod users;
