//! Album CRUD guarded by ownership.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pixelhub_core::error::AppError;
use pixelhub_core::result::AppResult;
use pixelhub_core::types::pagination::{PageRequest, PageResponse};
use pixelhub_database::store::AlbumStore;
use pixelhub_entity::album::{Album, CreateAlbum};

use crate::context::RequestContext;
use crate::guard;

/// Maximum album name length, in characters.
pub const MAX_ALBUM_NAME_LENGTH: usize = 255;

/// Album operations for the acting user.
#[derive(Clone)]
pub struct AlbumService {
    albums: Arc<dyn AlbumStore>,
}

impl std::fmt::Debug for AlbumService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumService").finish()
    }
}

impl AlbumService {
    /// Creates a new album service.
    pub fn new(albums: Arc<dyn AlbumStore>) -> Self {
        Self { albums }
    }

    /// The caller's albums, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Album>> {
        self.albums.find_by_user(ctx.user_id, page).await
    }

    /// Create an album owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<Album> {
        let name = normalize_name(name)?;
        let album = self
            .albums
            .create(&CreateAlbum {
                name,
                user_id: ctx.user_id,
            })
            .await?;
        info!(user_id = %ctx.user_id, album_id = %album.id, "Created album");
        Ok(album)
    }

    /// A single album owned by the caller.
    pub async fn show(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Album> {
        let album = self.albums.find_by_id(id).await?;
        guard::owned_album(ctx, album, id)
    }

    /// Rename one of the caller's albums.
    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> AppResult<Album> {
        let name = normalize_name(name)?;
        self.show(ctx, id).await?;
        self.albums.rename(id, &name).await
    }

    /// Delete one of the caller's albums and every record in it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.show(ctx, id).await?;
        if !self.albums.delete(id).await? {
            return Err(AppError::not_found(format!("Album {id} not found")));
        }
        info!(user_id = %ctx.user_id, album_id = %id, "Deleted album");
        Ok(())
    }
}

fn normalize_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Album name must not be empty"));
    }
    if trimmed.chars().count() > MAX_ALBUM_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Album name must be at most {MAX_ALBUM_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}
