//! Token factory for inserting stored credentials.
//!
//! Only the SHA-256 hash of the plaintext is persisted, matching what the
//! token service writes, so tokens created here validate through the real
//! service.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use sha2::{Digest, Sha256};

use crate::factory::helpers::next_id;

/// Builds a unique 22-character plaintext in the same shape the service issues.
pub fn unique_plaintext() -> String {
    format!("{:0>22}", format!("testtoken{}", next_id()))
}

/// Hex-encoded SHA-256 of a token plaintext.
pub fn hash_plaintext(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Factory for creating stored tokens.
pub struct TokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    plaintext: String,
    scope: String,
    expiry: DateTime<Utc>,
}

impl<'a> TokenFactory<'a> {
    /// Creates a new TokenFactory with default values.
    ///
    /// Defaults:
    /// - plaintext: unique value from [`unique_plaintext`]
    /// - scope: `"authentication"`
    /// - expiry: one hour from now
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            plaintext: unique_plaintext(),
            scope: "authentication".to_string(),
            expiry: Utc::now() + Duration::hours(1),
        }
    }

    pub fn plaintext(mut self, plaintext: impl Into<String>) -> Self {
        self.plaintext = plaintext.into();
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry;
        self
    }

    /// Inserts the token row.
    ///
    /// # Returns
    /// - `Ok(entity::token::Model)` - Created token entity (hash only)
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::token::Model, DbErr> {
        entity::token::ActiveModel {
            hash: ActiveValue::Set(hash_plaintext(&self.plaintext)),
            user_id: ActiveValue::Set(self.user_id),
            scope: ActiveValue::Set(self.scope),
            expiry: ActiveValue::Set(self.expiry),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an authentication token for the user, returning the plaintext.
pub async fn create_token(db: &DatabaseConnection, user_id: i32) -> Result<String, DbErr> {
    let plaintext = unique_plaintext();
    TokenFactory::new(db, user_id)
        .plaintext(plaintext.clone())
        .build()
        .await?;
    Ok(plaintext)
}
