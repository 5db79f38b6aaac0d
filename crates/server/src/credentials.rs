// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential extraction for the server.
//!
//! Every request carries its login and password in the
//! [`LOGIN_HEADER`] and [`PASSWORD_HEADER`] headers. The extractor verifies
//! them against the stored bcrypt hash before the handler runs.

use airops_api::{AuthenticatedActor, AuthenticationService};
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::AppState;

/// Header carrying the caller's login.
pub const LOGIN_HEADER: &str = "x-airops-login";

/// Header carrying the caller's password.
pub const PASSWORD_HEADER: &str = "x-airops-password";

/// Extractor for authenticated callers.
///
/// # Errors
///
/// Rejects with HTTP 401 if either header is missing or not valid ASCII,
/// or if the credentials do not match a stored user.
pub struct Caller(pub AuthenticatedActor);

impl FromRequestParts<AppState> for Caller {
    type Rejection = CredentialError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let login: &str = header_value(parts, LOGIN_HEADER)?;
        let password: &str = header_value(parts, PASSWORD_HEADER)?;

        let mut persistence = state.persistence.lock().await;
        let actor: AuthenticatedActor =
            AuthenticationService::authenticate(&mut persistence, login, password).map_err(
                |e| {
                    warn!(login, error = %e, "Credential check failed");
                    CredentialError::Rejected(e.to_string())
                },
            )?;
        drop(persistence);

        debug!(login = %actor.login, role = actor.role.as_str(), "Caller authenticated");
        Ok(Self(actor))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, CredentialError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing credential header");
            CredentialError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Invalid credential header encoding");
            CredentialError::InvalidHeader(name)
        })
}

/// Credential extraction errors.
#[derive(Debug)]
pub enum CredentialError {
    /// A credential header is missing.
    MissingHeader(&'static str),
    /// A credential header is not valid ASCII.
    InvalidHeader(&'static str),
    /// The credentials were checked and rejected.
    Rejected(String),
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header encoding"),
            Self::Rejected(reason) => reason,
        };
        crate::HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
        }
        .into_response()
    }
}
