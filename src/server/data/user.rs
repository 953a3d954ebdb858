//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records. Updates are
//! guarded by the row's `version` column so concurrent writers cannot silently
//! overwrite each other.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::user::{CreateUserParam, User},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user with version 1.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Database error, including unique violations on email
    pub async fn create(&self, param: CreateUserParam) -> Result<User, AppError> {
        let entity = entity::user::ActiveModel {
            name: ActiveValue::Set(param.name),
            email: ActiveValue::Set(param.email),
            password_hash: ActiveValue::Set(param.password_hash),
            role: ActiveValue::Set(param.role.as_str().to_string()),
            activated: ActiveValue::Set(param.activated),
            version: ActiveValue::Set(1),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(AppError)` - Database error or stored role outside the known set
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a user by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Gets all users ordered by ID.
    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Writes the mutable fields of `user` if its version is still current.
    ///
    /// The update only matches the row when both `id` and `version` equal the values
    /// the caller read, and bumps the version by one.
    ///
    /// # Returns
    /// - `Ok(User)` - The user with its new version
    /// - `Err(AppError::EditConflict)` - Row was changed or deleted since it was read
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn update(&self, user: User) -> Result<User, AppError> {
        let next_version = user.version + 1;

        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user.id))
            .filter(entity::user::Column::Version.eq(user.version))
            .col_expr(entity::user::Column::Name, Expr::value(user.name.clone()))
            .col_expr(entity::user::Column::Email, Expr::value(user.email.clone()))
            .col_expr(
                entity::user::Column::PasswordHash,
                Expr::value(user.password_hash.clone()),
            )
            .col_expr(
                entity::user::Column::Role,
                Expr::value(user.role.as_str().to_string()),
            )
            .col_expr(entity::user::Column::Activated, Expr::value(user.activated))
            .col_expr(entity::user::Column::Version, Expr::value(next_version))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::EditConflict);
        }

        Ok(User {
            version: next_version,
            ..user
        })
    }
}
