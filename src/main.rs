//! PixelHub Server: image resize service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use pixelhub_core::config::{AppConfig, DatabaseProvider};
use pixelhub_core::error::AppError;
use pixelhub_database::repositories::{AlbumRepository, ManipulationRepository};
use pixelhub_database::store::{AlbumStore, ManipulationStore};
use pixelhub_database::{DatabasePool, MemoryStore};
use pixelhub_storage::token::AlphanumericTokenSource;

#[tokio::main]
async fn main() {
    let env = std::env::var("PIXELHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PixelHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Record store ─────────────────────────────────────
    let (records, albums, db_pool) = connect_store(&config).await?;

    // ── Step 2: Services and state ───────────────────────────────
    let tokens = Arc::new(AlphanumericTokenSource::default());
    let state = pixelhub_api::build_state(config.clone(), records, albums, tokens).await?;
    let app = pixelhub_api::build_app(state);

    // ── Step 3: Bind ─────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("PixelHub server listening on {}", addr);

    // ── Step 4: Serve with graceful shutdown ─────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Release resources ────────────────────────────────
    if let Some(pool) = db_pool {
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            tracing::warn!("Timed out closing database pool");
        }
    }

    tracing::info!("PixelHub server shut down gracefully");
    Ok(())
}

/// Connect the configured record store, running migrations for PostgreSQL.
async fn connect_store(
    config: &AppConfig,
) -> Result<
    (
        Arc<dyn ManipulationStore>,
        Arc<dyn AlbumStore>,
        Option<DatabasePool>,
    ),
    AppError,
> {
    match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            pixelhub_database::migration::run_migrations(pool.pool()).await?;

            let records: Arc<dyn ManipulationStore> =
                Arc::new(ManipulationRepository::new(pool.pool().clone()));
            let albums: Arc<dyn AlbumStore> = Arc::new(AlbumRepository::new(pool.pool().clone()));
            Ok((records, albums, Some(pool)))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory record store; records are lost on restart");
            let store = MemoryStore::new();
            let records: Arc<dyn ManipulationStore> = Arc::new(store.clone());
            let albums: Arc<dyn AlbumStore> = Arc::new(store);
            Ok((records, albums, None))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
