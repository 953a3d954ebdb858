use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::model::user::{Permission, Role},
};

/// Client-attributable authentication and authorization failures.
///
/// None of these are logged as errors; they are expected outcomes of bad or
/// insufficient credentials.
#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    /// Authorization header is not `Bearer <value>`.
    #[error("Malformed authorization header")]
    MalformedCredential,

    /// No stored token matches the presented plaintext, or its owner no longer exists.
    #[error("Token does not match any stored credential")]
    InvalidCredential,

    /// The token exists but its expiry has passed.
    #[error("Token has expired")]
    Expired,

    /// The token exists but was issued for another scope.
    #[error("Token was issued for a different scope")]
    ScopeMismatch,

    /// The route requires an authenticated principal but the request is anonymous.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The user is authenticated but has not activated their account.
    #[error("User {0} is not activated")]
    NotActivated(i32),

    /// User lacks the role the route requires.
    #[error("User {user_id} lacks required role {required:?}")]
    InsufficientRole { user_id: i32, required: Role },

    /// User's role does not grant the permission the route requires.
    #[error("User {user_id} lacks required permission {required:?}")]
    MissingPermission { user_id: i32, required: Permission },

    /// Email/password pair did not match during login.
    #[error("Invalid login credentials")]
    InvalidLoginCredentials,
}

/// Converts authentication errors into HTTP responses.
///
/// - `MalformedCredential` / `InvalidCredential` / `Expired` / `ScopeMismatch` → 401 with
///   `WWW-Authenticate: Bearer` and "invalid or missing authentication token"
/// - `AuthenticationRequired` → 401 with `WWW-Authenticate: Bearer`
/// - `InvalidLoginCredentials` → 401 "invalid authentication credentials"
/// - `NotActivated` → 403
/// - `InsufficientRole` / `MissingPermission` → 403
///
/// Details are logged at debug level only.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "request rejected");

        let (status, message, challenge) = match self {
            Self::MalformedCredential
            | Self::InvalidCredential
            | Self::Expired
            | Self::ScopeMismatch => (
                StatusCode::UNAUTHORIZED,
                "invalid or missing authentication token",
                true,
            ),
            Self::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                "you must be authenticated to access this resource",
                true,
            ),
            Self::InvalidLoginCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid authentication credentials",
                false,
            ),
            Self::NotActivated(_) => (
                StatusCode::FORBIDDEN,
                "your user account must be activated to access this resource",
                false,
            ),
            Self::InsufficientRole { .. } | Self::MissingPermission { .. } => (
                StatusCode::FORBIDDEN,
                "your user account doesn't have the necessary permissions to access this resource",
                false,
            ),
        };

        let mut response = (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response();

        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
