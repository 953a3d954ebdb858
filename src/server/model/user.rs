//! User domain models and parameters.
//!
//! Provides the `User` domain model with its closed `Role` enumeration and the
//! permissions each role grants, plus parameter types for registration.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::user::{PermissionsDto, UserDto},
    server::error::{internal::InternalError, AppError},
};

/// Closed set of roles a user can hold.
///
/// There is no default role value; a stored string outside this set fails to parse
/// and is never matched against a required role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Permissions granted by this role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::User => &[Permission::CarsRead],
            Self::Admin => &[
                Permission::CarsRead,
                Permission::CarsWrite,
                Permission::UsersRead,
            ],
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(InternalError::UnknownRole {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained capabilities granted through roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CarsRead,
    CarsWrite,
    UsersRead,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarsRead => "cars:read",
            Self::CarsWrite => "cars:write",
            Self::UsersRead => "users:read",
        }
    }
}

/// Registered account.
///
/// `password_hash` is an Argon2id PHC string; the plaintext password is never held
/// beyond the request that supplied it. `version` increments on every write and
/// guards updates against lost writes.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub activated: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.as_str().to_string(),
            activated: self.activated,
            created_at: self.created_at,
        }
    }

    pub fn permissions_dto(&self) -> PermissionsDto {
        PermissionsDto {
            role: self.role.as_str().to_string(),
            permissions: self
                .role
                .permissions()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(UnknownRole))` - Stored role is not a known role
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let role = entity.role.parse::<Role>()?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            role,
            activated: entity.activated,
            version: entity.version,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub activated: bool,
}

/// Registration input as received from the client, before hashing.
#[derive(Debug, Clone)]
pub struct RegisterUserParam {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterUserParam {
    /// Validates registration input.
    ///
    /// # Returns
    /// - `Ok(())` - Input is acceptable
    /// - `Err(AppError::Validation)` - First failing rule, as a client-facing message
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must be provided".to_string()));
        }
        if self.name.len() > 500 {
            return Err(AppError::Validation(
                "name must not be more than 500 bytes long".to_string(),
            ));
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Checks the email has a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(
            "email must be a valid email address".to_string(),
        ))
    }
}

/// Checks the password is 8 to 72 bytes, the range Argon2 inputs are accepted in.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 bytes long".to_string(),
        ));
    }
    if password.len() > 72 {
        return Err(AppError::Validation(
            "password must not be more than 72 bytes long".to_string(),
        ));
    }
    Ok(())
}
