//! Token domain models.
//!
//! A token is a scoped, expiring capability. Only the SHA-256 hash of its plaintext
//! is ever stored; the plaintext exists once, inside the `IssuedToken` handed back
//! to the caller that requested it.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::token::TokenDto,
    server::error::{internal::InternalError, AppError},
};

/// Purpose a token was issued for. A token is only valid for its own scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Activation,
    Authentication,
    PasswordReset,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Authentication => "authentication",
            Self::PasswordReset => "password-reset",
        }
    }
}

impl FromStr for Scope {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "activation" => Ok(Self::Activation),
            "authentication" => Ok(Self::Authentication),
            "password-reset" => Ok(Self::PasswordReset),
            other => Err(InternalError::UnknownScope {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored form of a token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Hex-encoded SHA-256 of the plaintext.
    pub hash: String,
    pub user_id: i32,
    pub scope: Scope,
    pub expiry: DateTime<Utc>,
}

impl Token {
    /// A token is expired from its expiry instant onward (`now >= expiry`).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }

    /// Converts an entity model to a token domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(AppError::InternalErr(UnknownScope))` - Stored scope is not a known scope
    pub fn from_entity(entity: entity::token::Model) -> Result<Self, AppError> {
        Ok(Self {
            scope: entity.scope.parse::<Scope>()?,
            hash: entity.hash,
            user_id: entity.user_id,
            expiry: entity.expiry,
        })
    }
}

/// Freshly issued token, the only place the plaintext ever exists.
#[derive(Clone)]
pub struct IssuedToken {
    pub plaintext: String,
    pub user_id: i32,
    pub scope: Scope,
    pub expiry: DateTime<Utc>,
}

impl IssuedToken {
    pub fn into_dto(self) -> TokenDto {
        TokenDto {
            token: self.plaintext,
            expiry: self.expiry,
        }
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("plaintext", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("scope", &self.scope)
            .field("expiry", &self.expiry)
            .finish()
    }
}
