//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use pixelhub_core::config::AppConfig;
use pixelhub_database::store::ManipulationStore;
use pixelhub_service::{AlbumService, ManipulationService, ResizeService};
use pixelhub_storage::workdir::PublicRoot;

use crate::auth::JwtDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record store, used directly for health checks
    pub records: Arc<dyn ManipulationStore>,
    /// Public root holding every working directory
    pub public_root: PublicRoot,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Resize pipeline
    pub resize_service: Arc<ResizeService>,
    /// Record listing, show and destroy
    pub manipulation_service: Arc<ManipulationService>,
    /// Album CRUD
    pub album_service: Arc<AlbumService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("public_root", &self.public_root)
            .finish()
    }
}
