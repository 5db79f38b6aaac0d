// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle states for flights, bookings, and baggage.
//!
//! Every status is persisted as its `snake_case` string form. Parsing is
//! strict: unknown strings are rejected rather than defaulted.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operational status of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    /// Flight is on schedule.
    Scheduled,
    /// Flight departure has been pushed back.
    Delayed,
    /// Flight has left the gate.
    Departed,
    /// Flight has arrived.
    Landed,
    /// Flight will not operate.
    Cancelled,
}

impl FlightStatus {
    /// Returns the persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Delayed => "delayed",
            Self::Departed => "departed",
            Self::Landed => "landed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true while the flight still occupies its gate.
    #[must_use]
    pub const fn holds_gate(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Delayed)
    }
}

impl FromStr for FlightStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "delayed" => Ok(Self::Delayed),
            "departed" => Ok(Self::Departed),
            "landed" => Ok(Self::Landed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidFlightStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a booking.
///
/// `Cancelled` is terminal. Moving a booking into `Cancelled` releases its
/// seat and returns the capacity to the flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Seat is held but not yet confirmed.
    Pending,
    /// Booking is confirmed.
    Confirmed,
    /// Booking was cancelled; seat has been released.
    Cancelled,
}

impl BookingStatus {
    /// Returns the persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if this status still holds inventory.
    #[must_use]
    pub const fn holds_seat(&self) -> bool {
        match self {
            Self::Pending | Self::Confirmed => true,
            Self::Cancelled => false,
        }
    }

    /// Validates a transition from this status to `new_status`.
    ///
    /// # Errors
    ///
    /// Returns an error when leaving `Cancelled`, since the released seat
    /// may already belong to another booking.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        match (self, new_status) {
            (Self::Cancelled, _) => Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "booking is already cancelled".to_string(),
            }),
            (Self::Pending | Self::Confirmed, _) => Ok(()),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handling status of a baggage item.
///
/// The expected lifecycle is `Processing -> Loaded -> Collectable`, with
/// `Lost` reachable from `Loaded` or `Collectable`. Whether the lifecycle
/// is enforced is decided by [`TransitionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaggageStatus {
    /// Checked in, not yet on the aircraft.
    Processing,
    /// Loaded onto the aircraft.
    Loaded,
    /// Available at the destination carousel.
    Collectable,
    /// Reported lost.
    Lost,
}

impl BaggageStatus {
    /// Returns the persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Loaded => "loaded",
            Self::Collectable => "collectable",
            Self::Lost => "lost",
        }
    }

    /// Statuses from which a move into `self` is a valid lifecycle step.
    #[must_use]
    pub const fn predecessors(&self) -> &'static [Self] {
        match self {
            Self::Processing => &[],
            Self::Loaded => &[Self::Processing],
            Self::Collectable => &[Self::Loaded],
            Self::Lost => &[Self::Loaded, Self::Collectable],
        }
    }

    /// Validates a lifecycle transition from this status to `new_status`.
    ///
    /// # Errors
    ///
    /// Returns an error if `new_status` is not a successor of `self`.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if new_status.predecessors().contains(self) {
            return Ok(());
        }

        let reason: &str = match self {
            Self::Lost => "lost baggage cannot change status",
            Self::Processing | Self::Loaded | Self::Collectable => {
                "transition not permitted by baggage lifecycle rules"
            }
        };

        Err(DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl FromStr for BaggageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "loaded" => Ok(Self::Loaded),
            "collectable" => Ok(Self::Collectable),
            "lost" => Ok(Self::Lost),
            _ => Err(DomainError::InvalidBaggageStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BaggageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether baggage status updates are checked against the lifecycle.
///
/// `Unchecked` accepts any status, leaving lifecycle policy to the caller.
/// `Enforced` rejects single-item updates that skip or reverse a step, and
/// restricts bulk updates to items currently in a valid predecessor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may be written.
    #[default]
    Unchecked,
    /// Only lifecycle steps may be written.
    Enforced,
}
