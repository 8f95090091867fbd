//! Persistence seams for albums and manipulation records.
//!
//! The service layer only talks to these traits. The PostgreSQL
//! repositories back them in production and [`crate::MemoryStore`]
//! backs them in tests and in `provider = "memory"` deployments.

use async_trait::async_trait;
use uuid::Uuid;

use pixelhub_core::result::AppResult;
use pixelhub_core::types::pagination::{PageRequest, PageResponse};
use pixelhub_entity::album::{Album, CreateAlbum};
use pixelhub_entity::manipulation::{CreateManipulation, ManipulationRecord};

/// Storage of [`Album`] rows.
#[async_trait]
pub trait AlbumStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an album by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Album>>;

    /// List albums owned by a user, newest first.
    async fn find_by_user(&self, user_id: Uuid, page: &PageRequest)
    -> AppResult<PageResponse<Album>>;

    /// Insert a new album.
    async fn create(&self, data: &CreateAlbum) -> AppResult<Album>;

    /// Rename an album, returning the updated row.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Album>;

    /// Delete an album together with every record grouped into it.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Storage of [`ManipulationRecord`] rows.
#[async_trait]
pub trait ManipulationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a record by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ManipulationRecord>>;

    /// List records owned by a user, newest first.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>>;

    /// List records grouped into an album, newest first.
    async fn find_by_album(
        &self,
        album_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>>;

    /// Insert a new record.
    async fn create(&self, data: &CreateManipulation) -> AppResult<ManipulationRecord>;

    /// Delete a record. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
