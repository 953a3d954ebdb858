use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::net::SocketAddr;
use tower::ServiceExt;

use crate::server::{
    config::LimiterConfig,
    router::router,
    testing::{app_state, disabled_limiter},
};
use test_utils::{builder::TestBuilder, factory};

mod pipeline;

/// Builds a request with an optional bearer token.
fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Builds a GET request that appears to come from `ip`.
fn request_from(uri: &str, ip: [u8; 4]) -> Request<Body> {
    let mut request = request(Method::GET, uri, None);
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
    request
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
