//! Application builder: wires stores, storage and services into state,
//! and state plus middleware into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use pixelhub_core::config::AppConfig;
use pixelhub_core::result::AppResult;
use pixelhub_database::store::{AlbumStore, ManipulationStore};
use pixelhub_service::{AlbumService, ManipulationService, ResizeService};
use pixelhub_storage::acquire::SourceAcquirer;
use pixelhub_storage::fetch::RemoteFetcher;
use pixelhub_storage::imaging::{ImageBackend, RustImageBackend};
use pixelhub_storage::token::RandomTokenSource;
use pixelhub_storage::workdir::PublicRoot;

use crate::auth::JwtDecoder;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Multipart framing allowance on top of the raw upload limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the shared state from configuration and already-connected stores.
pub async fn build_state(
    config: AppConfig,
    records: Arc<dyn ManipulationStore>,
    albums: Arc<dyn AlbumStore>,
    tokens: Arc<dyn RandomTokenSource>,
) -> AppResult<AppState> {
    // ── Step 1: Public root ──────────────────────────────────────
    let public_root = PublicRoot::open(&config.storage.public_root).await?;
    tracing::info!(root = %config.storage.public_root, "Public root ready");

    // ── Step 2: Source acquisition and imaging ───────────────────
    let fetcher = RemoteFetcher::new(&config.storage.fetch)?;
    let acquirer = Arc::new(SourceAcquirer::new(public_root.clone(), tokens, fetcher));
    let backend: Arc<dyn ImageBackend> = Arc::new(RustImageBackend::new());

    // ── Step 3: Services ─────────────────────────────────────────
    let cleanup = config.storage.cleanup;
    let resize_service = Arc::new(ResizeService::new(
        Arc::clone(&records),
        Arc::clone(&albums),
        acquirer,
        backend,
        cleanup,
        config.storage.max_upload_size_bytes,
    ));
    let manipulation_service = Arc::new(ManipulationService::new(
        Arc::clone(&records),
        Arc::clone(&albums),
        public_root.clone(),
        cleanup,
    ));
    let album_service = Arc::new(AlbumService::new(albums));

    // ── Step 4: Auth ─────────────────────────────────────────────
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    Ok(AppState {
        config: Arc::new(config),
        records,
        public_root,
        jwt_decoder,
        resize_service,
        manipulation_service,
        album_service,
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let body_limit =
        (config.storage.max_upload_size_bytes as usize).saturating_add(MULTIPART_OVERHEAD_BYTES);

    build_router(state.clone())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.server.cors))
        .layer(axum_middleware::from_fn_with_state(state, request_logging))
}
