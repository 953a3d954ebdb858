//! The resolved identity attached to each request.
//!
//! The authentication middleware inserts a `Principal` into the request extensions;
//! guards and handlers read it back through the `Principal` and `CurrentUser`
//! extractors. A request that never passed through authentication reads as
//! `Principal::Anonymous`.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::server::{
    error::auth::AuthError,
    model::user::{Permission, Role, User},
};

/// Either a resolved user or the anonymous sentinel.
///
/// `Anonymous` is a distinct variant, so it can never compare equal to a stored user.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    User(User),
}

impl Principal {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Requires a resolved user.
    ///
    /// # Returns
    /// - `Err(AuthError::AuthenticationRequired)` - Request is anonymous
    pub fn require_authenticated(&self) -> Result<&User, AuthError> {
        match self {
            Self::User(user) => Ok(user),
            Self::Anonymous => Err(AuthError::AuthenticationRequired),
        }
    }

    /// Requires an authenticated user whose account is activated.
    ///
    /// Authentication is checked first, so an anonymous request yields 401, not 403.
    pub fn require_activated(&self) -> Result<&User, AuthError> {
        let user = self.require_authenticated()?;
        if !user.activated {
            return Err(AuthError::NotActivated(user.id));
        }
        Ok(user)
    }

    /// Requires an activated user holding exactly `role`.
    ///
    /// Activation is checked before the role.
    pub fn require_role(&self, role: Role) -> Result<&User, AuthError> {
        let user = self.require_activated()?;
        if user.role != role {
            return Err(AuthError::InsufficientRole {
                user_id: user.id,
                required: role,
            });
        }
        Ok(user)
    }

    /// Requires an activated user whose role grants `permission`.
    pub fn require_permission(&self, permission: Permission) -> Result<&User, AuthError> {
        let user = self.require_activated()?;
        if !user.role.has_permission(permission) {
            return Err(AuthError::MissingPermission {
                user_id: user.id,
                required: permission,
            });
        }
        Ok(user)
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Principal>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Extractor for handlers that need the authenticated user.
///
/// Rejects anonymous requests with 401; pair it with a guard for activation or role checks.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = match Principal::from_request_parts(parts, state).await {
            Ok(principal) => principal,
            Err(never) => match never {},
        };
        principal.require_authenticated().cloned().map(CurrentUser)
    }
}
