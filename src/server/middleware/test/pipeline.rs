use super::*;

use std::sync::Arc;

use crate::server::{
    config::TokenTtlConfig,
    middleware::rate_limit::RateLimiter,
    service::{password::hash_password, token::TokenService},
    state::AppState,
    testing::{FailingStore, RecordingMailer},
};

/// Tests that a credential store failure fails closed.
///
/// The request is neither treated as anonymous nor as authenticated; the client
/// sees a generic error with no internal detail.
///
/// Expected: 500 with a generic body, even on an anonymous route
#[tokio::test]
async fn store_failure_during_authentication_fails_closed() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let state = AppState::new(
        db.clone(),
        TokenService::new(Arc::new(FailingStore)),
        Arc::new(RateLimiter::new(disabled_limiter())),
        Arc::new(RecordingMailer::default()),
        TokenTtlConfig::default(),
        "test".to_string(),
    );
    let app = router(state);

    let plaintext = factory::token::unique_plaintext();
    let response = send(
        &app,
        request(Method::GET, "/v1/healthcheck", Some(&plaintext)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Internal server error");

    let anonymous = send(&app, request(Method::GET, "/v1/healthcheck", None)).await;
    assert_eq!(anonymous.status(), StatusCode::OK);
}

/// Tests the account lifecycle over HTTP.
///
/// Registers, activates with the mailed token, logs in, reads `/v1/users/me`, logs
/// out, and checks the old token no longer works.
///
/// Expected: 201, 200, 201, 200, 200, 401
#[tokio::test]
async fn register_activate_login_logout() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, mailer) = app_state(db, disabled_limiter());
    let app = router(state);

    let json = |method: Method, uri: &str, body: serde_json::Value| {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let registered = send(
        &app,
        json(
            Method::POST,
            "/v1/users",
            serde_json::json!({
                "name": "Carol",
                "email": "carol@example.com",
                "password": "pa55word"
            }),
        ),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);

    let activation = mailer.last_plaintext().unwrap();
    let activated = send(
        &app,
        json(
            Method::PUT,
            "/v1/users/activated",
            serde_json::json!({ "token": activation }),
        ),
    )
    .await;
    assert_eq!(activated.status(), StatusCode::OK);
    assert_eq!(body_json(activated).await["activated"], true);

    let login = send(
        &app,
        json(
            Method::POST,
            "/v1/tokens/authentication",
            serde_json::json!({ "email": "carol@example.com", "password": "pa55word" }),
        ),
    )
    .await;
    assert_eq!(login.status(), StatusCode::CREATED);
    let token = body_json(login).await["authentication_token"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = send(&app, request(Method::GET, "/v1/users/me", Some(&token))).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["email"], "carol@example.com");

    let logout = send(
        &app,
        request(Method::DELETE, "/v1/tokens/authentication", Some(&token)),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);

    let after = send(&app, request(Method::GET, "/v1/users/me", Some(&token))).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

/// Tests that wrong login credentials get the login-specific 401.
///
/// Expected: 401 without a `WWW-Authenticate` challenge
#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = app_state(db, disabled_limiter());
    let app = router(state);

    let user = factory::user::UserFactory::new(db)
        .password_hash(hash_password("the-password").unwrap())
        .build()
        .await
        .unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/tokens/authentication")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "email": user.email, "password": "not-the-password" })
                .to_string(),
        ))
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    assert_eq!(
        body_json(response).await["error"],
        "invalid authentication credentials"
    );
}

/// Tests that an undecodable login body answers in the JSON error shape.
///
/// Expected: 400 with an `error` string
#[tokio::test]
async fn malformed_login_body_is_json_error() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (state, _mailer) = app_state(db, disabled_limiter());
    let app = router(state);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/tokens/authentication")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
