use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum RateLimitError {
    /// The client's bucket holds less than one permit.
    ///
    /// Results in 429 Too Many Requests with a `Retry-After` hint in whole seconds.
    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    Exceeded { retry_after: Duration },
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        match self {
            Self::Exceeded { retry_after } => {
                let seconds = retry_after.as_secs_f64().ceil().max(1.0) as u64;
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorDto {
                        error: "rate limit exceeded".to_string(),
                    }),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(seconds));
                response
            }
        }
    }
}
