//! Authorization guards.
//!
//! Each guard is a middleware that inspects the request's `Principal` and either
//! forwards the request untouched or answers it. The route wrappers at the bottom
//! turn a `MethodRouter` into a guarded one, so guards stack in any order the router
//! needs. Every guard checks authentication before anything else, then activation,
//! so anonymous requests always get 401 and inactive users get 403 before any role
//! check.

use axum::{
    extract::{Request, State},
    middleware::{from_fn, from_fn_with_state, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::server::{
    error::auth::AuthError,
    model::{
        principal::Principal,
        user::{Permission, Role},
    },
};

pub async fn require_authenticated(
    principal: Principal,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    principal.require_authenticated()?;
    Ok(next.run(request).await)
}

pub async fn require_activated(
    principal: Principal,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    principal.require_activated()?;
    Ok(next.run(request).await)
}

pub async fn require_role(
    State(role): State<Role>,
    principal: Principal,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    principal.require_role(role)?;
    Ok(next.run(request).await)
}

pub async fn require_permission(
    State(permission): State<Permission>,
    principal: Principal,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    principal.require_permission(permission)?;
    Ok(next.run(request).await)
}

/// Wraps `route` so it only runs for authenticated principals.
pub fn authenticated<S>(route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn(require_authenticated))
}

/// Wraps `route` so it only runs for activated users.
pub fn activated<S>(route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn(require_activated))
}

/// Wraps `route` so it only runs for activated users holding the `required` role.
pub fn role<S>(required: Role, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(required, require_role))
}

/// Wraps `route` so it only runs for activated users granted `required`.
pub fn permission<S>(required: Permission, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(required, require_permission))
}
