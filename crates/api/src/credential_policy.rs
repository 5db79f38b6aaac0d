// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential policy validation.
//!
//! This module enforces password requirements for new users.

use thiserror::Error;

/// Credential policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password does not mix enough character classes.
    #[error(
        "Password must contain at least {required} of: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password equals one of the user's identifying fields.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },
}

/// Credential policy configuration.
#[derive(Debug, Clone, Copy)]
pub struct CredentialPolicy {
    /// Minimum password length.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_complexity: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_length: 12,
            min_complexity: 3,
        }
    }
}

impl CredentialPolicy {
    /// Validates a password for the user identified by `login`, `name`
    /// and `surname`.
    ///
    /// # Errors
    ///
    /// Returns a `CredentialPolicyError` describing the first failed rule.
    pub fn validate(
        &self,
        password: &str,
        login: &str,
        name: &str,
        surname: &str,
    ) -> Result<(), CredentialPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(CredentialPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let complexity: usize = character_classes(password);
        if complexity < self.min_complexity {
            return Err(CredentialPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found: complexity,
            });
        }

        let lowered: String = password.to_lowercase();
        for (field, value) in [("login", login), ("name", name), ("surname", surname)] {
            if lowered == value.to_lowercase() {
                return Err(CredentialPolicyError::MatchesForbiddenField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Counts the character classes present in `password`.
fn character_classes(password: &str) -> usize {
    let upper: bool = password.chars().any(|c| c.is_ascii_uppercase());
    let lower: bool = password.chars().any(|c| c.is_ascii_lowercase());
    let digit: bool = password.chars().any(|c| c.is_ascii_digit());
    let symbol: bool = password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());

    [upper, lower, digit, symbol]
        .into_iter()
        .filter(|present| *present)
        .count()
}
