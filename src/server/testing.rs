//! Shared doubles and state builders for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::{Arc, Mutex};

use crate::server::{
    config::{LimiterConfig, TokenTtlConfig},
    data::store::{CredentialStore, DbCredentialStore},
    error::AppError,
    middleware::rate_limit::RateLimiter,
    model::{
        token::{Scope, Token},
        user::User,
    },
    service::{
        mailer::{Mail, Mailer},
        token::TokenService,
    },
    state::AppState,
};

/// Mailer that keeps every message it is given.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Mail>>,
    fail: bool,
}

impl RecordingMailer {
    /// A mailer whose every send fails.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Removes and returns the messages sent so far.
    pub fn take(&self) -> Vec<Mail> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    /// Plaintext of the most recently sent token.
    pub fn last_plaintext(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|mail| mail.token().plaintext.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: Mail) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::InternalError("smtp unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Credential store whose every operation fails.
pub struct FailingStore;

fn unavailable() -> AppError {
    AppError::DbErr(DbErr::Custom("credential store unavailable".to_string()))
}

#[async_trait]
impl CredentialStore for FailingStore {
    async fn save_token(&self, _token: &Token) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn find_token(&self, _hash: &str) -> Result<Option<Token>, AppError> {
        Err(unavailable())
    }

    async fn delete_tokens(&self, _user_id: i32, _scope: Scope) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn find_user(&self, _id: i32) -> Result<Option<User>, AppError> {
        Err(unavailable())
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<u64, AppError> {
        Err(unavailable())
    }
}

pub fn token_service(db: &DatabaseConnection) -> TokenService {
    TokenService::new(Arc::new(DbCredentialStore::new(db.clone())))
}

/// Limiter settings that never reject a request.
pub fn disabled_limiter() -> LimiterConfig {
    LimiterConfig {
        enabled: false,
        ..LimiterConfig::default()
    }
}

/// Application state over `db` with a recording mailer.
pub fn app_state(
    db: &DatabaseConnection,
    limiter: LimiterConfig,
) -> (AppState, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(
        db.clone(),
        token_service(db),
        Arc::new(RateLimiter::new(limiter)),
        mailer.clone(),
        TokenTtlConfig::default(),
        "test".to_string(),
    );
    (state, mailer)
}
