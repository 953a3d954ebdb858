use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::server::{
    controller::{
        health::healthcheck,
        token::{
            create_activation_token, create_authentication_token, create_password_reset_token,
            delete_authentication_tokens,
        },
        user::{
            activate_user, get_current_permissions, get_current_user, get_user, list_users,
            register_user, update_password,
        },
    },
    middleware::{
        auth::authenticate,
        guard::{activated, authenticated, permission, role},
        rate_limit::rate_limit,
    },
    model::user::{Permission, Role},
    state::AppState,
};

/// Builds the API router with the full gating pipeline.
///
/// Requests pass the rate limiter, then authentication, then any per-route guards.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(healthcheck))
        .route(
            "/v1/users",
            post(register_user).merge(role(Role::Admin, get(list_users))),
        )
        .route("/v1/users/activated", put(activate_user))
        .route("/v1/users/password", put(update_password))
        .route("/v1/users/me", activated(get(get_current_user)))
        .route(
            "/v1/users/me/permissions",
            activated(get(get_current_permissions)),
        )
        .route(
            "/v1/users/{id}",
            permission(Permission::UsersRead, get(get_user)),
        )
        .route("/v1/tokens/activation", post(create_activation_token))
        .route(
            "/v1/tokens/authentication",
            post(create_authentication_token)
                .merge(authenticated(delete(delete_authentication_tokens))),
        )
        .route(
            "/v1/tokens/password-reset",
            post(create_password_reset_token),
        )
        .layer(from_fn_with_state(state.tokens.clone(), authenticate))
        .layer(from_fn_with_state(state.limiter.clone(), rate_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
