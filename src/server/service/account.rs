//! Account lifecycle flows built on the token service.
//!
//! Each flow that hands a plaintext to the user (registration, activation resend,
//! password reset) delivers it through the configured `Mailer`. Delivery failures are
//! logged and do not fail the request; the user can ask for a new token.

use sea_orm::{DatabaseConnection, SqlErr};

use crate::server::{
    config::TokenTtlConfig,
    data::user::UserRepository,
    error::{auth::AuthError, AppError, NOT_FOUND_MESSAGE},
    model::{
        token::{IssuedToken, Scope},
        user::{validate_email, validate_password, CreateUserParam, RegisterUserParam, Role, User},
    },
    service::{
        mailer::{Mail, Mailer},
        password::{hash_password, verify_decoy, verify_password},
        token::TokenService,
    },
};

const DUPLICATE_EMAIL: &str = "a user with this email address already exists";
const UNKNOWN_EMAIL: &str = "no matching email address found";

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    mailer: &'a dyn Mailer,
    ttl: &'a TokenTtlConfig,
}

impl<'a> AccountService<'a> {
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `tokens` - Token service used to issue and consume tokens
    /// - `mailer` - Delivery for activation and reset tokens
    /// - `ttl` - Lifetime of each token scope
    pub fn new(
        db: &'a DatabaseConnection,
        tokens: &'a TokenService,
        mailer: &'a dyn Mailer,
        ttl: &'a TokenTtlConfig,
    ) -> Self {
        Self {
            db,
            tokens,
            mailer,
            ttl,
        }
    }

    /// Registers a new, not yet activated user and mails them an activation token.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::Validation)` - Invalid input or email already registered
    /// - `Err(AppError)` - Database or hashing failure
    pub async fn register(&self, param: RegisterUserParam) -> Result<User, AppError> {
        param.validate()?;

        let repo = UserRepository::new(self.db);
        if repo.find_by_email(&param.email).await?.is_some() {
            return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = hash_password(&param.password)?;
        let user = repo
            .create(CreateUserParam {
                name: param.name,
                email: param.email,
                password_hash,
                role: Role::User,
                activated: false,
            })
            .await
            .map_err(|err| match err {
                AppError::DbErr(db_err)
                    if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    AppError::Validation(DUPLICATE_EMAIL.to_string())
                }
                other => other,
            })?;

        tracing::info!(user_id = user.id, "registered user");

        let token = self.issue(user.id, Scope::Activation).await?;
        self.deliver(Mail::Welcome {
            recipient: user.email.clone(),
            name: user.name.clone(),
            token,
        })
        .await;

        Ok(user)
    }

    /// Activates the owner of an activation token and revokes their activation tokens.
    ///
    /// # Returns
    /// - `Ok(User)` - The activated user
    /// - `Err(AppError::Validation)` - Token is unknown, expired, or of another scope
    /// - `Err(AppError::EditConflict)` - User changed concurrently
    pub async fn activate(&self, plaintext: &str) -> Result<User, AppError> {
        let mut user = self
            .tokens
            .validate(plaintext, Scope::Activation)
            .await
            .map_err(|err| token_rejected(err, "invalid or expired activation token"))?;

        user.activated = true;
        let user = UserRepository::new(self.db).update(user).await?;

        self.tokens.revoke(user.id, Scope::Activation).await?;
        tracing::info!(user_id = user.id, "activated user");

        Ok(user)
    }

    /// Issues and mails a fresh activation token to a registered, inactive user.
    pub async fn resend_activation(&self, email: &str) -> Result<(), AppError> {
        validate_email(email)?;

        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Err(AppError::Validation(UNKNOWN_EMAIL.to_string()));
        };
        if user.activated {
            return Err(AppError::Validation(
                "user has already been activated".to_string(),
            ));
        }

        let token = self.issue(user.id, Scope::Activation).await?;
        self.deliver(Mail::Activation {
            recipient: user.email,
            token,
        })
        .await;

        Ok(())
    }

    /// Exchanges email and password for an authentication token.
    ///
    /// # Returns
    /// - `Ok(IssuedToken)` - New authentication token
    /// - `Err(AuthError::InvalidLoginCredentials)` - Unknown email or wrong password
    /// - `Err(AppError::Validation)` - Malformed email or password
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        validate_email(email)?;
        validate_password(password)?;

        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            verify_decoy(password);
            return Err(AuthError::InvalidLoginCredentials.into());
        };
        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidLoginCredentials.into());
        }

        self.issue(user.id, Scope::Authentication).await
    }

    /// Revokes every authentication token of `user`.
    pub async fn logout(&self, user: &User) -> Result<(), AppError> {
        self.tokens.revoke(user.id, Scope::Authentication).await
    }

    /// Issues and mails a password-reset token to an activated user.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        validate_email(email)?;

        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Err(AppError::Validation(UNKNOWN_EMAIL.to_string()));
        };
        if !user.activated {
            return Err(AppError::Validation(
                "user account must be activated".to_string(),
            ));
        }

        let token = self.issue(user.id, Scope::PasswordReset).await?;
        self.deliver(Mail::PasswordReset {
            recipient: user.email,
            token,
        })
        .await;

        Ok(())
    }

    /// Sets a new password for the owner of a password-reset token.
    ///
    /// All of the user's password-reset tokens are revoked afterwards.
    pub async fn reset_password(&self, password: &str, plaintext: &str) -> Result<User, AppError> {
        validate_password(password)?;

        let mut user = self
            .tokens
            .validate(plaintext, Scope::PasswordReset)
            .await
            .map_err(|err| token_rejected(err, "invalid or expired password reset token"))?;

        user.password_hash = hash_password(password)?;
        let user = UserRepository::new(self.db).update(user).await?;

        self.tokens.revoke(user.id, Scope::PasswordReset).await?;
        tracing::info!(user_id = user.id, "reset password");

        Ok(user)
    }

    /// Gets all users ordered by ID.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        UserRepository::new(self.db).get_all().await
    }

    /// Gets one user by ID.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn get_user(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    async fn issue(&self, user_id: i32, scope: Scope) -> Result<IssuedToken, AppError> {
        self.tokens
            .issue(user_id, self.ttl.for_scope(scope), scope)
            .await
    }

    async fn deliver(&self, mail: Mail) {
        let template = mail.template();
        if let Err(err) = self.mailer.send(mail).await {
            tracing::error!(error = %err, template, "failed to send mail");
        }
    }
}

/// Turns a token rejection into a 422 with `message`; store failures pass through.
fn token_rejected(err: AppError, message: &str) -> AppError {
    match err {
        AppError::AuthErr(_) => AppError::Validation(message.to_string()),
        other => other,
    }
}
