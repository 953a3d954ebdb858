use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{model::api::HealthDto, server::state::AppState};

/// GET /v1/healthcheck - Report service status
///
/// # Authentication
/// None; anonymous requests are allowed.
///
/// # Returns
/// - `200 OK`: status, environment label and crate version
pub async fn healthcheck(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthDto {
            status: "available".to_string(),
            environment: state.env,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
