// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! ## Module Organization
//!
//! - `flights`: Flight creation (with seat layout), status, delay, gate
//! - `gates`: Gate creation and the double-assignment check
//! - `seats`: Seat layout generation and guarded occupancy flips
//! - `passengers`: Passenger lookup-or-insert by document number
//! - `bookings`: The booking transaction engine
//! - `baggage`: Baggage registration and lifecycle updates
//! - `users`: User creation
//!
//! Every public mutation is generated once per backend by `backend_fn!`.

pub mod baggage;
pub mod bookings;
pub mod flights;
pub mod gates;
pub mod passengers;
pub mod seats;
pub mod users;
