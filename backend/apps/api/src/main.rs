//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use api::app::build_router;
use api::config::ServerConfig;
use auth::domain::repository::SessionRepository;
use auth::{AuthAppState, PgAuthRepository};
use platform::request::cors_layer;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use works::{PgWorkRepository, WorksAppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.default_log_filter()))
                .context("LOG_LEVEL must be a valid log level")?,
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.ephemeral_session_key {
        tracing::warn!("SESSION_KEY not set, using a random key; sessions end on restart");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_repo = PgAuthRepository::new(pool.clone()).with_query_timeout(config.store_timeout);
    let works_repo = PgWorkRepository::new(pool).with_query_timeout(config.store_timeout);

    // Startup cleanup: errors here should not prevent server startup
    if let Err(e) = auth_repo.cleanup_expired().await {
        tracing::warn!(error = ?e, "Auth session cleanup failed, continuing anyway");
    }

    let app = build_router(
        AuthAppState::new(Arc::new(auth_repo), Arc::new(config.auth_config())),
        WorksAppState::new(Arc::new(works_repo)),
        cors_layer(config.cors_allowed_origins.clone()),
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
