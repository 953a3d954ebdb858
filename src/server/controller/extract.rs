//! Request extractors whose rejections render as `AppError` JSON bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::server::error::AppError;

/// JSON request body; decode failures respond with `{"error": ..}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; values that do not parse respond with a JSON 404.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    fn app() -> Router {
        Router::new()
            .route("/items", post(|JsonBody(_): JsonBody<Payload>| async {}))
            .route(
                "/items/{id}",
                get(|PathParam(id): PathParam<i32>| async move { id.to_string() }),
            )
    }

    async fn call(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Tests that a body which is not JSON gets the JSON error shape.
    ///
    /// Expected: 400 with an `error` string
    #[tokio::test]
    async fn malformed_body_is_json_bad_request() {
        let (status, body) = call(post_json("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    /// Tests that well-formed JSON of the wrong shape is a validation failure.
    ///
    /// Expected: 422 with an `error` string
    #[tokio::test]
    async fn missing_field_is_json_validation_error() {
        let (status, body) = call(post_json(r#"{"other": 1}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    /// Tests that a request without a JSON content type gets the JSON error shape.
    ///
    /// Expected: 400 with an `error` string
    #[tokio::test]
    async fn missing_content_type_is_json_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/items")
            .body(Body::from(r#"{"name": "x"}"#))
            .unwrap();

        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    /// Tests that an ID that is not a number is reported as not found.
    ///
    /// Expected: 404 with the not-found message
    #[tokio::test]
    async fn unparsable_path_is_json_not_found() {
        let request = Request::builder()
            .uri("/items/abc")
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "the requested resource could not be found");
    }

    /// Tests that a valid ID reaches the handler.
    ///
    /// Expected: 200
    #[tokio::test]
    async fn parsable_path_reaches_handler() {
        let request = Request::builder()
            .uri("/items/42")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
