//! Listing, showing and destroying manipulation records.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use pixelhub_core::config::CleanupPolicy;
use pixelhub_core::error::AppError;
use pixelhub_core::result::AppResult;
use pixelhub_core::types::pagination::{PageRequest, PageResponse};
use pixelhub_database::store::{AlbumStore, ManipulationStore};
use pixelhub_entity::manipulation::ManipulationRecord;
use pixelhub_storage::workdir::PublicRoot;

use crate::context::RequestContext;
use crate::guard;

/// Read and delete access to a user's manipulation records.
#[derive(Clone)]
pub struct ManipulationService {
    records: Arc<dyn ManipulationStore>,
    albums: Arc<dyn AlbumStore>,
    public_root: PublicRoot,
    cleanup: CleanupPolicy,
}

impl std::fmt::Debug for ManipulationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManipulationService").finish()
    }
}

impl ManipulationService {
    /// Creates a new manipulation service.
    pub fn new(
        records: Arc<dyn ManipulationStore>,
        albums: Arc<dyn AlbumStore>,
        public_root: PublicRoot,
        cleanup: CleanupPolicy,
    ) -> Self {
        Self {
            records,
            albums,
            public_root,
            cleanup,
        }
    }

    /// The caller's records, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        self.records.find_by_user(ctx.user_id, page).await
    }

    /// Records in one of the caller's albums, newest first.
    pub async fn list_by_album(
        &self,
        ctx: &RequestContext,
        album_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        let album = self.albums.find_by_id(album_id).await?;
        guard::owned_album(ctx, album, album_id)?;
        self.records.find_by_album(album_id, page).await
    }

    /// A single record owned by the caller.
    pub async fn show(&self, ctx: &RequestContext, id: Uuid) -> AppResult<ManipulationRecord> {
        let record = self.records.find_by_id(id).await?;
        guard::owned_record(ctx, record, id)
    }

    /// Delete a record owned by the caller.
    ///
    /// Files are removed only when `remove_on_delete` is set; a failure to
    /// remove them is logged and does not fail the delete.
    pub async fn destroy(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let record = self.show(ctx, id).await?;

        if !self.records.delete(id).await? {
            return Err(AppError::not_found(format!("Image {id} not found")));
        }

        if self.cleanup.remove_on_delete {
            if let Some(directory) = record.directory() {
                if let Err(e) = self.public_root.remove_directory(directory).await {
                    warn!(record_id = %id, directory, error = %e, "Failed to remove record files");
                }
            }
        }

        info!(user_id = %ctx.user_id, record_id = %id, "Deleted manipulation record");
        Ok(())
    }
}
