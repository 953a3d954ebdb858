mod model;
mod server;

use std::net::SocketAddr;

use crate::server::{
    config::Config,
    error::AppError,
    middleware::rate_limit::{BUCKET_RETENTION, SWEEP_INTERVAL},
    router, startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = startup::build_state(&config, db);

    let sweeper = state.limiter.spawn_sweeper(SWEEP_INTERVAL, BUCKET_RETENTION);
    let purger = startup::spawn_token_purge(state.tokens.clone());

    let app = router::router(state).layer(startup::cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        env = %config.env,
        limiter_enabled = config.limiter.enabled,
        "starting server"
    );

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(startup::shutdown_signal())
    .await;

    sweeper.abort();
    purger.abort();

    tracing::info!("server stopped");

    served?;
    Ok(())
}
