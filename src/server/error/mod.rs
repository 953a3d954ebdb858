//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into HTTP responses. The `AppError` enum serves as the top-level
//! error type that wraps domain-specific errors and implements `IntoResponse` for
//! automatic error handling in handlers and middleware.
//!
//! Client-attributable failures (`AuthError`, `RateLimitError`, validation) map to
//! 4xx responses and are never logged as errors. Store and internal failures are
//! logged with full detail and surface as a generic 500 that leaks nothing.

pub mod auth;
pub mod config;
pub mod internal;
pub mod rate_limit;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError,
        rate_limit::RateLimitError,
    },
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` (401 Unauthorized, 403 Forbidden).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Client exceeded its request allowance (429 Too Many Requests).
    #[error(transparent)]
    RateLimitErr(#[from] RateLimitError),

    /// Unexpected stored data or library failure (500).
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Credential store / database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with details logged server-side. The
    /// request is treated as disallowed.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Socket or listener failure during startup.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error (404).
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error (400).
    #[error("{0}")]
    BadRequest(String),

    /// Input failed validation (422).
    #[error("{0}")]
    Validation(String),

    /// Optimistic concurrency check failed: the record changed since it was read (409).
    #[error("Edit conflict")]
    EditConflict,

    /// Internal server error with custom message.
    ///
    /// The provided message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Body of every 404 response.
pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";

/// Undecodable JSON bodies: 422 when the JSON has the wrong shape, 400 otherwise.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => Self::Validation(err.body_text()),
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "path parameter rejected");
        Self::NotFound(NOT_FOUND_MESSAGE.to_string())
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `EditConflict`
/// - 422 Unprocessable Entity - For `Validation`
/// - Variable - For `AuthErr` and `RateLimitErr`, delegated to their own conversions
/// - 500 Internal Server Error - For all other error types (DbErr, InternalErr, etc.)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::RateLimitErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorDto { error: msg })).into_response()
            }
            Self::EditConflict => (
                StatusCode::CONFLICT,
                Json(ErrorDto {
                    error: "unable to update the record due to an edit conflict, please try again"
                        .to_string(),
                }),
            )
                .into_response(),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                generic_internal_error()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

fn generic_internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDto {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");

        generic_internal_error()
    }
}
