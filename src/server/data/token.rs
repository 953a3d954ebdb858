//! Token data repository.
//!
//! Tokens are keyed by the hex SHA-256 of their plaintext. Nothing here ever sees a
//! plaintext value.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::server::{
    error::AppError,
    model::token::{Scope, Token},
};

pub struct TokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a token record.
    ///
    /// # Returns
    /// - `Ok(())` - Token stored
    /// - `Err(DbErr)` - Database error, including a (practically impossible) hash collision
    pub async fn insert(&self, token: &Token) -> Result<(), DbErr> {
        entity::prelude::Token::insert(entity::token::ActiveModel {
            hash: ActiveValue::Set(token.hash.clone()),
            user_id: ActiveValue::Set(token.user_id),
            scope: ActiveValue::Set(token.scope.as_str().to_string()),
            expiry: ActiveValue::Set(token.expiry),
        })
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Looks up a token by hash, regardless of scope or expiry.
    ///
    /// # Returns
    /// - `Ok(Some(Token))` - A token with this hash exists
    /// - `Ok(None)` - No token matches
    /// - `Err(AppError)` - Database error or stored scope outside the known set
    pub async fn find_by_hash(&self, hash: &str) -> Result<Option<Token>, AppError> {
        entity::prelude::Token::find_by_id(hash.to_string())
            .one(self.db)
            .await?
            .map(Token::from_entity)
            .transpose()
    }

    /// Deletes every token of `scope` owned by `user_id`.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of tokens removed (0 when none existed)
    pub async fn delete_all_for_user(&self, user_id: i32, scope: Scope) -> Result<u64, DbErr> {
        let result = entity::prelude::Token::delete_many()
            .filter(entity::token::Column::UserId.eq(user_id))
            .filter(entity::token::Column::Scope.eq(scope.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every token whose expiry is at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Token::delete_many()
            .filter(entity::token::Column::Expiry.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
