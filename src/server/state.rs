//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Token service backed by the credential store
//! - The rate limiter's bucket registry
//! - Mail delivery for activation and reset tokens
//! - Token lifetimes per scope

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::TokenTtlConfig,
    middleware::rate_limit::RateLimiter,
    service::{account::AccountService, mailer::Mailer, token::TokenService},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection is a pool handle and the rest are
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Issues and validates scoped tokens.
    pub tokens: TokenService,

    /// Per-client token buckets, shared with the sweep task.
    pub limiter: Arc<RateLimiter>,

    /// Delivers activation and password-reset tokens to users.
    pub mailer: Arc<dyn Mailer>,

    /// Lifetime of each token scope.
    pub token_ttl: TokenTtlConfig,

    /// Environment label reported by the health check.
    pub env: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `tokens` - Token service
    /// - `limiter` - Rate limiter registry
    /// - `mailer` - Mail delivery
    /// - `token_ttl` - Token lifetimes
    /// - `env` - Environment label
    pub fn new(
        db: DatabaseConnection,
        tokens: TokenService,
        limiter: Arc<RateLimiter>,
        mailer: Arc<dyn Mailer>,
        token_ttl: TokenTtlConfig,
        env: String,
    ) -> Self {
        Self {
            db,
            tokens,
            limiter,
            mailer,
            token_ttl,
            env,
        }
    }

    /// Account service borrowing this state's dependencies.
    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(
            &self.db,
            &self.tokens,
            self.mailer.as_ref(),
            &self.token_ttl,
        )
    }
}
