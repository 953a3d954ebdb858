use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::MessageDto,
        user::{ActivateUserDto, RegisterUserDto, ResetPasswordDto},
    },
    server::{
        controller::extract::{JsonBody, PathParam},
        error::AppError,
        model::{principal::CurrentUser, user::RegisterUserParam},
        state::AppState,
    },
};

/// POST /v1/users - Register a new user
///
/// Creates an inactive account and mails an activation token to it.
///
/// # Returns
/// - `201 Created`: the new user
/// - `422 Unprocessable Entity`: invalid input or email already registered
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .accounts()
        .register(RegisterUserParam {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// PUT /v1/users/activated - Activate an account with an activation token
///
/// # Returns
/// - `200 OK`: the activated user
/// - `409 Conflict`: the user changed concurrently
/// - `422 Unprocessable Entity`: token invalid, expired or of another scope
pub async fn activate_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ActivateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts().activate(&payload.token).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// PUT /v1/users/password - Set a new password with a password-reset token
///
/// # Returns
/// - `200 OK`: confirmation message
/// - `422 Unprocessable Entity`: invalid password, or token invalid or expired
pub async fn update_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    state
        .accounts()
        .reset_password(&payload.password, &payload.token)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "your password was successfully reset".to_string(),
        }),
    ))
}

/// GET /v1/users/me - Get the current user
///
/// # Authentication
/// Requires an activated user.
pub async fn get_current_user(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    (StatusCode::OK, Json(user.into_dto()))
}

/// GET /v1/users/me/permissions - Get the current user's role and permissions
///
/// # Authentication
/// Requires an activated user.
pub async fn get_current_permissions(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    (StatusCode::OK, Json(user.permissions_dto()))
}

/// GET /v1/users - List all users
///
/// # Authentication
/// Requires the `admin` role.
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users: Vec<_> = state
        .accounts()
        .list_users()
        .await?
        .into_iter()
        .map(|u| u.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(users)))
}

/// GET /v1/users/{id} - Get one user
///
/// # Authentication
/// Requires the `users:read` permission.
///
/// # Returns
/// - `200 OK`: the user
/// - `404 Not Found`: no user with that ID
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts().get_user(id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
