//! Authentication stage.
//!
//! Resolves the `Authorization` header into a `Principal` and stores it in the request
//! extensions. A missing header yields `Principal::Anonymous`; enforcement is left to
//! the guards.

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, VARY},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::{principal::Principal, token::Scope},
    service::token::TokenService,
};

/// Middleware resolving the request's principal.
///
/// Every response passing through carries `Vary: Authorization`.
///
/// # Returns
/// - 401 - Header is malformed, or the token is unknown, expired, or of another scope
/// - 500 - Credential store failed; the request is not let through as anonymous
pub async fn authenticate(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut response = match resolve_principal(&tokens, request.headers()).await {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    };

    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));

    response
}

/// Resolves request headers to a principal.
pub async fn resolve_principal(
    tokens: &TokenService,
    headers: &HeaderMap,
) -> Result<Principal, AppError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(Principal::Anonymous);
    };

    let plaintext = parse_bearer(header)?;
    let user = tokens.validate(plaintext, Scope::Authentication).await?;

    Ok(Principal::User(user))
}

/// Extracts the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; anything other than exactly two
/// non-empty parts separated by one space is rejected.
pub fn parse_bearer(header: &HeaderValue) -> Result<&str, AuthError> {
    let value = header
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MalformedCredential)?;

    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() || token.contains(' ') {
        return Err(AuthError::MalformedCredential);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_scheme_in_any_case() {
        let header = HeaderValue::from_static("bearer abc");
        assert_eq!(parse_bearer(&header), Ok("abc"));

        let header = HeaderValue::from_static("Bearer abc");
        assert_eq!(parse_bearer(&header), Ok("abc"));
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "Bearer", "Bearer ", "abc", "Basic abc", "Bearer a b", "Bearer  abc"] {
            let header = HeaderValue::from_static(value);
            assert_eq!(
                parse_bearer(&header),
                Err(AuthError::MalformedCredential),
                "{value:?} should be malformed"
            );
        }
    }
}
