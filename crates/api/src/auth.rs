// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use airops_domain::{Role, User};
use airops_persistence::{Persistence, PersistenceError};
use tracing::{debug, warn};

use crate::error::AuthError;

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The login of this actor.
    pub login: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(login: String, role: Role) -> Self {
        Self { login, role }
    }
}

impl From<&User> for AuthenticatedActor {
    fn from(user: &User) -> Self {
        Self::new(user.login.clone(), user.role)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Capabilities come from [`Role`]; this service turns a missing capability
/// into an [`AuthError::Unauthorized`] naming the attempted action.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor may manage flights, gates, baggage, and users.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an Administrator.
    pub fn authorize_manage_operations(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.role.can_manage_operations() {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: Role::Administrator.as_str().to_string(),
        })
    }

    /// Checks that an actor may act on a booking owned by `owner_login`.
    ///
    /// Owners may act on their own bookings. Administrators may act on any.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor neither owns the booking nor may manage
    /// any booking.
    pub fn authorize_booking_access(
        actor: &AuthenticatedActor,
        owner_login: &str,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.login == owner_login || actor.role.can_manage_any_booking() {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: Role::Administrator.as_str().to_string(),
        })
    }

    /// Checks that an actor may list the bookings owned by `login`.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither `login` nor an Administrator.
    pub fn authorize_view_user_bookings(
        actor: &AuthenticatedActor,
        login: &str,
    ) -> Result<(), AuthError> {
        Self::authorize_booking_access(actor, login, "list_user_bookings")
    }
}

/// Authentication service for login and password verification.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates a user by login and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the lookup fails.
    pub fn authenticate(
        persistence: &mut Persistence,
        login: &str,
        password: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let user: User = persistence
            .verify_credentials(login, password)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(login, "Rejected credentials");
                AuthError::AuthenticationFailed {
                    reason: String::from("Invalid login or password"),
                }
            })?;

        debug!(login, role = user.role.as_str(), "Authenticated");
        Ok(AuthenticatedActor::from(&user))
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
