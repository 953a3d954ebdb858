use axum::http::{header, Method};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio::{signal, task::JoinHandle};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::{
    config::Config,
    data::store::DbCredentialStore,
    error::AppError,
    middleware::rate_limit::RateLimiter,
    service::{mailer::LogMailer, token::TokenService},
    state::AppState,
};

/// How often expired tokens are deleted from the store.
pub const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Installs the JSON log subscriber.
///
/// The level filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up to date before the server
/// accepts requests.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Assembles application state from configuration and a connected database.
pub fn build_state(config: &Config, db: DatabaseConnection) -> AppState {
    let store = Arc::new(DbCredentialStore::new(db.clone()));

    AppState::new(
        db,
        TokenService::new(store),
        Arc::new(RateLimiter::new(config.limiter.clone())),
        Arc::new(LogMailer),
        config.token_ttl.clone(),
        config.env.clone(),
    )
}

/// CORS layer allowing the configured trusted origins.
pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_trusted_origins.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Starts the hourly deletion of expired tokens.
pub fn spawn_token_purge(tokens: TokenService) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(TOKEN_PURGE_INTERVAL);

        loop {
            ticker.tick().await;

            match tokens.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "purged expired tokens"),
                Err(e) => tracing::error!(error = %e, "failed to purge expired tokens"),
            }
        }
    })
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
