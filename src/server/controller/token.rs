use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::MessageDto,
        token::{AuthenticationTokenDto, CredentialsDto, EmailDto},
    },
    server::{
        controller::extract::JsonBody, error::AppError, model::principal::CurrentUser,
        state::AppState,
    },
};

/// POST /v1/tokens/authentication - Log in
///
/// # Returns
/// - `201 Created`: the authentication token and its expiry
/// - `401 Unauthorized`: unknown email or wrong password
/// - `422 Unprocessable Entity`: malformed email or password
pub async fn create_authentication_token(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsDto>,
) -> Result<impl IntoResponse, AppError> {
    let token = state
        .accounts()
        .login(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthenticationTokenDto {
            authentication_token: token.into_dto(),
        }),
    ))
}

/// DELETE /v1/tokens/authentication - Log out everywhere
///
/// Revokes every authentication token of the caller, including the one on this request.
///
/// # Authentication
/// Requires an authenticated user.
pub async fn delete_authentication_tokens(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    state.accounts().logout(&user).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "authentication tokens revoked".to_string(),
        }),
    ))
}

/// POST /v1/tokens/activation - Resend the activation token
///
/// # Returns
/// - `202 Accepted`: a new token was mailed
/// - `422 Unprocessable Entity`: unknown email or user already activated
pub async fn create_activation_token(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EmailDto>,
) -> Result<impl IntoResponse, AppError> {
    state.accounts().resend_activation(&payload.email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageDto {
            message: "an email will be sent to you containing activation instructions"
                .to_string(),
        }),
    ))
}

/// POST /v1/tokens/password-reset - Request a password-reset token
///
/// # Returns
/// - `202 Accepted`: a token was mailed
/// - `422 Unprocessable Entity`: unknown email or user not activated
pub async fn create_password_reset_token(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EmailDto>,
) -> Result<impl IntoResponse, AppError> {
    state
        .accounts()
        .request_password_reset(&payload.email)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageDto {
            message: "an email will be sent to you containing password reset instructions"
                .to_string(),
        }),
    ))
}
