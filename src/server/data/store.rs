//! Credential store contract and its database implementation.
//!
//! The token service depends on `CredentialStore` rather than on the database so the
//! persistence layer can be swapped (or made to fail) without touching validation
//! logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{token::TokenRepository, user::UserRepository},
    error::AppError,
    model::{
        token::{Scope, Token},
        user::User,
    },
};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists a token record.
    async fn save_token(&self, token: &Token) -> Result<(), AppError>;

    /// Looks up a token record by the hash of its plaintext.
    async fn find_token(&self, hash: &str) -> Result<Option<Token>, AppError>;

    /// Removes all tokens of `scope` belonging to `user_id`. Idempotent.
    async fn delete_tokens(&self, user_id: i32, scope: Scope) -> Result<(), AppError>;

    /// Loads a user by ID.
    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Removes tokens that expired at or before `now`, returning how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

/// `CredentialStore` backed by the application database.
#[derive(Clone)]
pub struct DbCredentialStore {
    db: DatabaseConnection,
}

impl DbCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for DbCredentialStore {
    async fn save_token(&self, token: &Token) -> Result<(), AppError> {
        TokenRepository::new(&self.db).insert(token).await?;
        Ok(())
    }

    async fn find_token(&self, hash: &str) -> Result<Option<Token>, AppError> {
        TokenRepository::new(&self.db).find_by_hash(hash).await
    }

    async fn delete_tokens(&self, user_id: i32, scope: Scope) -> Result<(), AppError> {
        TokenRepository::new(&self.db)
            .delete_all_for_user(user_id, scope)
            .await?;
        Ok(())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        UserRepository::new(&self.db).find_by_id(id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(TokenRepository::new(&self.db).delete_expired(now).await?)
    }
}
