//! Token service: issues, validates, and revokes scoped credentials.
//!
//! Plaintexts are 128 bits from the thread-local CSPRNG, encoded as 22 characters of
//! URL-safe base64. Only the hex SHA-256 of a plaintext reaches the store, and
//! validation works purely by hash lookup, so the plaintext is never compared
//! against anything.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::server::{
    data::store::CredentialStore,
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        token::{IssuedToken, Scope, Token},
        user::User,
    },
};

/// Number of random bytes in a token plaintext.
const TOKEN_BYTES: usize = 16;

#[derive(Clone)]
pub struct TokenService {
    store: Arc<dyn CredentialStore>,
}

impl TokenService {
    /// Length of every plaintext this service issues.
    pub const PLAINTEXT_LEN: usize = 22;

    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Issues a new token for `user_id`, valid for `ttl` in `scope`.
    ///
    /// The returned plaintext cannot be recovered later; only its hash is persisted.
    ///
    /// # Returns
    /// - `Ok(IssuedToken)` - The plaintext with its scope and expiry
    /// - `Err(AppError::DbErr)` - The store failed to persist the token
    pub async fn issue(
        &self,
        user_id: i32,
        ttl: Duration,
        scope: Scope,
    ) -> Result<IssuedToken, AppError> {
        let plaintext = generate_plaintext();
        let expiry = Utc::now()
            .checked_add_signed(ttl)
            .ok_or(InternalError::ExpiryOutOfRange {
                seconds: ttl.num_seconds(),
            })?;

        let token = Token {
            hash: hash_plaintext(&plaintext),
            user_id,
            scope,
            expiry,
        };
        self.store.save_token(&token).await?;

        tracing::debug!(user_id, scope = %scope, "issued token");

        Ok(IssuedToken {
            plaintext,
            user_id,
            scope,
            expiry,
        })
    }

    /// Resolves a plaintext to its owning user if it is live and of `required` scope.
    ///
    /// # Returns
    /// - `Ok(User)` - The token's owner
    /// - `Err(AuthError::InvalidCredential)` - No such token, or its owner is gone
    /// - `Err(AuthError::Expired)` - The token's expiry has been reached
    /// - `Err(AuthError::ScopeMismatch)` - The token was issued for another scope
    /// - `Err(AppError::DbErr / InternalErr)` - Store failure; never treated as a result
    pub async fn validate(&self, plaintext: &str, required: Scope) -> Result<User, AppError> {
        self.validate_at(plaintext, required, Utc::now()).await
    }

    /// [`validate`](Self::validate) against an explicit clock reading.
    pub async fn validate_at(
        &self,
        plaintext: &str,
        required: Scope,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        if plaintext.len() != Self::PLAINTEXT_LEN {
            return Err(AuthError::InvalidCredential.into());
        }

        let Some(token) = self.store.find_token(&hash_plaintext(plaintext)).await? else {
            return Err(AuthError::InvalidCredential.into());
        };

        if token.is_expired_at(now) {
            return Err(AuthError::Expired.into());
        }

        if token.scope != required {
            return Err(AuthError::ScopeMismatch.into());
        }

        let Some(user) = self.store.find_user(token.user_id).await? else {
            return Err(AuthError::InvalidCredential.into());
        };

        Ok(user)
    }

    /// Deletes every `scope` token owned by `user_id`. Calling it again is a no-op.
    pub async fn revoke(&self, user_id: i32, scope: Scope) -> Result<(), AppError> {
        self.store.delete_tokens(user_id, scope).await?;
        tracing::debug!(user_id, scope = %scope, "revoked tokens");
        Ok(())
    }

    /// Removes tokens that are already expired.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.store.purge_expired(Utc::now()).await
    }
}

/// Generates a fresh 22-character plaintext from 128 random bits.
pub fn generate_plaintext() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex-encoded SHA-256 of a plaintext; the only form of a token that is stored.
pub fn hash_plaintext(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}
