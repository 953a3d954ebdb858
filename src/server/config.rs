use axum::http::HeaderValue;
use chrono::Duration;
use std::str::FromStr;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::token::Scope,
};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_ENV: &str = "development";
/// Slowest refill rate accepted for an enabled limiter.
const MIN_REQUESTS_PER_SECOND: f64 = 0.001;

/// Rate limiter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterConfig {
    pub enabled: bool,
    /// Tokens added to each bucket per second.
    pub requests_per_second: f64,
    /// Bucket capacity.
    pub burst: u32,
    /// Derive the client key from `X-Forwarded-For` / `X-Real-IP` before the socket address.
    pub trust_proxy_headers: bool,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: 2.0,
            burst: 4,
            trust_proxy_headers: false,
        }
    }
}

/// Lifetime of each token scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenTtlConfig {
    pub authentication: Duration,
    pub activation: Duration,
    pub password_reset: Duration,
}

impl TokenTtlConfig {
    pub fn for_scope(&self, scope: Scope) -> Duration {
        match scope {
            Scope::Authentication => self.authentication,
            Scope::Activation => self.activation,
            Scope::PasswordReset => self.password_reset,
        }
    }
}

impl Default for TokenTtlConfig {
    fn default() -> Self {
        Self {
            authentication: Duration::hours(24),
            activation: Duration::days(3),
            password_reset: Duration::minutes(45),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub env: String,

    pub limiter: LimiterConfig,
    pub token_ttl: TokenTtlConfig,

    pub cors_trusted_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);
        let limiter_defaults = LimiterConfig::default();
        let ttl_defaults = TokenTtlConfig::default();

        let limiter = LimiterConfig {
            enabled: vars.parse_or("LIMITER_ENABLED", limiter_defaults.enabled)?,
            requests_per_second: vars
                .parse_or("LIMITER_RPS", limiter_defaults.requests_per_second)?,
            burst: vars.parse_or("LIMITER_BURST", limiter_defaults.burst)?,
            trust_proxy_headers: vars.parse_or(
                "LIMITER_TRUST_PROXY_HEADERS",
                limiter_defaults.trust_proxy_headers,
            )?,
        };

        if limiter.enabled {
            let rps = limiter.requests_per_second;
            if !rps.is_finite() || rps < MIN_REQUESTS_PER_SECOND {
                return Err(invalid(
                    "LIMITER_RPS",
                    rps.to_string(),
                    &format!("must be a finite number of at least {MIN_REQUESTS_PER_SECOND}"),
                ));
            }
            if limiter.burst == 0 {
                return Err(invalid("LIMITER_BURST", "0".to_string(), "must be at least 1"));
            }
        }

        let token_ttl = TokenTtlConfig {
            authentication: vars.ttl_or(
                "TOKEN_TTL_AUTHENTICATION_SECS",
                ttl_defaults.authentication,
            )?,
            activation: vars.ttl_or("TOKEN_TTL_ACTIVATION_SECS", ttl_defaults.activation)?,
            password_reset: vars.ttl_or(
                "TOKEN_TTL_PASSWORD_RESET_SECS",
                ttl_defaults.password_reset,
            )?,
        };

        let cors_trusted_origins = match vars.get("CORS_TRUSTED_ORIGINS") {
            Some(value) => value
                .split_whitespace()
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|e| {
                        invalid("CORS_TRUSTED_ORIGINS", origin.to_string(), &e.to_string())
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            database_url: vars
                .get("DATABASE_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            port: vars.parse_or("PORT", DEFAULT_PORT)?,
            env: vars
                .get("APP_ENV")
                .unwrap_or_else(|| DEFAULT_ENV.to_string()),
            limiter,
            token_ttl,
            cors_trusted_origins,
        })
    }
}

fn invalid(name: &str, value: String, reason: &str) -> AppError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
        reason: reason.to_string(),
    }
    .into()
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }

    /// Reads and parses an optional variable, falling back to `default` when unset.
    fn parse_or<T>(&self, name: &str, default: T) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map_err(|e| invalid(name, value.clone(), &e.to_string())),
            None => Ok(default),
        }
    }

    fn ttl_or(&self, name: &str, default: Duration) -> Result<Duration, AppError> {
        let seconds: i64 = self.parse_or(name, default.num_seconds())?;
        if seconds <= 0 {
            return Err(invalid(name, seconds.to_string(), "must be a positive number of seconds"));
        }
        Duration::try_seconds(seconds)
            .ok_or_else(|| invalid(name, seconds.to_string(), "duration out of range"))
    }
}
