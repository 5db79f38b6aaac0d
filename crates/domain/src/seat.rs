// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seat labels and per-flight seat layout.
//!
//! A flight's cabin is laid out in rows of [`SEATS_PER_ROW`] seats labeled
//! `1A`..`1F`, `2A`..`2F`, and so on. When the capacity is not a multiple of
//! the row width, the final row is partial.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Number of seats in a full row.
pub const SEATS_PER_ROW: u32 = 6;

/// Highest row number a layout may use.
pub const MAX_ROWS: u32 = 99;

/// Largest seat capacity a flight may declare.
pub const MAX_SEATS: u32 = SEATS_PER_ROW * MAX_ROWS;

const ROW_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// A seat position such as `12A`.
///
/// Labels order numerically by row, then alphabetically by letter, so
/// `2A < 10A` even though the strings compare the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatLabel {
    row: u32,
    letter: char,
}

impl SeatLabel {
    /// Creates a seat label from a row number and a letter.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is outside `1..=MAX_ROWS` or the letter
    /// is not one of `A`..`F`.
    pub fn new(row: u32, letter: char) -> Result<Self, DomainError> {
        let letter: char = letter.to_ascii_uppercase();
        if row == 0 || row > MAX_ROWS || !ROW_LETTERS.contains(&letter) {
            return Err(DomainError::InvalidSeatLabel(format!("{row}{letter}")));
        }
        Ok(Self { row, letter })
    }

    /// Returns the 1-based row number.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the seat letter.
    #[must_use]
    pub const fn letter(&self) -> char {
        self.letter
    }
}

impl Ord for SeatLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.letter.cmp(&other.letter))
    }
}

impl PartialOrd for SeatLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for SeatLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let invalid = || DomainError::InvalidSeatLabel(s.to_string());

        let mut chars = trimmed.chars();
        let letter: char = chars.next_back().ok_or_else(invalid)?;
        let digits: &str = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: u32 = digits.parse().map_err(|_| invalid())?;

        Self::new(row, letter).map_err(|_| invalid())
    }
}

impl std::fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

impl TryFrom<String> for SeatLabel {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatLabel> for String {
    fn from(label: SeatLabel) -> Self {
        label.to_string()
    }
}

/// One bookable seat on a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// The flight this seat belongs to.
    pub flight_code: String,
    /// The seat position.
    pub label: SeatLabel,
    /// Whether a live booking holds the seat.
    pub occupied: bool,
}

/// Generates the seat layout for a flight of the given capacity.
///
/// Labels are produced in row-major order: `1A..1F`, `2A..2F`, and so on,
/// with a partial final row when `total_seats % SEATS_PER_ROW != 0`.
///
/// # Errors
///
/// Returns an error if `total_seats` is zero or exceeds [`MAX_SEATS`].
pub fn generate_seat_labels(total_seats: u32) -> Result<Vec<SeatLabel>, DomainError> {
    if total_seats == 0 || total_seats > MAX_SEATS {
        return Err(DomainError::InvalidSeatCount {
            count: total_seats,
            max: MAX_SEATS,
        });
    }

    let labels: Vec<SeatLabel> = (0..total_seats)
        .map(|index| SeatLabel {
            row: index / SEATS_PER_ROW + 1,
            letter: ROW_LETTERS[(index % SEATS_PER_ROW) as usize],
        })
        .collect();

    Ok(labels)
}

/// Sorts seats by row, then by letter.
///
/// Storage order is not guaranteed, so read paths sort before display.
pub fn sort_seats(seats: &mut [Seat]) {
    seats.sort_by(|a, b| a.label.cmp(&b.label));
}
