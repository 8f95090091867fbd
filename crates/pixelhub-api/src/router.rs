//! Route definitions for the PixelHub HTTP API.
//!
//! Resource routes are mounted under `/api/v1`, health under `/api`, and
//! the public root's `images/` directory under `/images` when enabled.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, threading `AppState` through
/// via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .merge(image_routes())
        .merge(album_routes());

    let mut router = Router::new()
        .nest("/api/v1", v1_routes)
        .merge(health_routes());

    if state.config.storage.serve_public {
        let images = Path::new(&state.config.storage.public_root).join("images");
        router = router.nest_service("/images", ServeDir::new(images));
    }

    router.with_state(state)
}

/// Image manipulation endpoints.
fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/image", get(handlers::manipulation::list))
        .route("/image/resize", post(handlers::manipulation::resize))
        .route(
            "/image/by-album/{album_id}",
            get(handlers::manipulation::by_album),
        )
        .route(
            "/image/{id}",
            get(handlers::manipulation::show).delete(handlers::manipulation::destroy),
        )
}

/// Album endpoints.
fn album_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/album",
            get(handlers::album::list).post(handlers::album::create),
        )
        .route(
            "/album/{id}",
            get(handlers::album::show)
                .put(handlers::album::update)
                .delete(handlers::album::delete),
        )
}

/// Liveness endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(handlers::health::health))
}
