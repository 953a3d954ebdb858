//! Per-client token-bucket rate limiting.
//!
//! Buckets live in a `DashMap` keyed by client. A refill-and-take runs while holding
//! the shard lock for that key, so two concurrent requests from one client can never
//! both spend the same permit. The periodic sweep uses the same map and therefore the
//! same locks.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::server::{config::LimiterConfig, error::rate_limit::RateLimitError};

/// How often idle buckets are swept.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Buckets not seen for this long are removed by the sweep.
pub const BUCKET_RETENTION: Duration = Duration::from_secs(180);

/// Key used when no client address can be determined.
const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Allowed,
    Denied { retry_after: Duration },
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl Bucket {
    fn full(burst: f64, now: Instant) -> Self {
        Self {
            tokens: burst,
            last_refill: now,
            last_seen: now,
        }
    }

    /// Refills for the time elapsed since the last refill, then takes one permit if available.
    fn take(&mut self, now: Instant, rate: f64, burst: f64) -> Decision {
        let elapsed = now.saturating_duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * rate).min(burst);
        self.last_refill = now;
        self.last_seen = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Decision::Allowed
        } else {
            let wait = (1.0 - self.tokens) / rate;
            Decision::Denied {
                retry_after: Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX),
            }
        }
    }
}

pub struct RateLimiter {
    buckets: DashMap<String, Bucket>,
    config: LimiterConfig,
}

impl RateLimiter {
    pub fn new(config: LimiterConfig) -> Self {
        Self {
            buckets: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Spends one permit from `key`'s bucket, creating a full bucket on first sight.
    ///
    /// When the limiter is disabled every call is allowed and no bucket is created.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// [`check`](Self::check) against an explicit clock reading.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        if !self.config.enabled {
            return Decision::Allowed;
        }

        let rate = self.config.requests_per_second;
        let burst = f64::from(self.config.burst);

        if let Some(mut bucket) = self.buckets.get_mut(key) {
            return bucket.take(now, rate, burst);
        }

        self.buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::full(burst, now))
            .take(now, rate, burst)
    }

    /// Removes buckets last seen more than `retention` before `now`.
    ///
    /// # Returns
    /// Number of buckets removed.
    pub fn sweep_at(&self, now: Instant, retention: Duration) -> usize {
        let before = self.buckets.len();
        self.buckets
            .retain(|_, bucket| now.saturating_duration_since(bucket.last_seen) <= retention);
        before.saturating_sub(self.buckets.len())
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Starts the background sweep.
    ///
    /// A single task owns the sweep, so sweeps never overlap. Abort the returned
    /// handle on shutdown.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration, retention: Duration) -> JoinHandle<()> {
        let limiter = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let removed = limiter.sweep_at(Instant::now(), retention);
                if removed > 0 {
                    tracing::info!(
                        removed,
                        remaining = limiter.bucket_count(),
                        "swept idle rate limiter buckets"
                    );
                }
            }
        })
    }
}

/// Derives the rate-limit key for a request.
///
/// Proxy headers are consulted only when `trust_proxy_headers` is set: the first
/// `X-Forwarded-For` entry, then `X-Real-IP`. Otherwise the peer IP is used.
pub fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy_headers: bool,
) -> String {
    if trust_proxy_headers {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let real_ip = || {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Middleware rejecting requests whose client has no permit left.
///
/// # Returns
/// - `Ok(Response)` - Downstream response
/// - `Err(RateLimitError::Exceeded)` - 429 with `Retry-After`; nothing downstream runs
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    if !limiter.config.enabled {
        return Ok(next.run(request).await);
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(
        request.headers(),
        peer,
        limiter.config.trust_proxy_headers,
    );

    match limiter.check(&key) {
        Decision::Allowed => Ok(next.run(request).await),
        Decision::Denied { retry_after } => {
            tracing::info!(client = %key, "rate limit exceeded");
            Err(RateLimitError::Exceeded { retry_after })
        }
    }
}
