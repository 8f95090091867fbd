//! Album repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;
use pixelhub_core::types::pagination::{PageRequest, PageResponse};
use pixelhub_entity::album::{Album, CreateAlbum};

use crate::store::AlbumStore;

/// Repository for album CRUD.
#[derive(Debug, Clone)]
pub struct AlbumRepository {
    pool: PgPool,
}

impl AlbumRepository {
    /// Create a new album repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlbumStore for AlbumRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Album>> {
        sqlx::query_as::<_, Album>("SELECT * FROM albums WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find album", e))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Album>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count albums", e))?;

        let albums = sqlx::query_as::<_, Album>(
            "SELECT * FROM albums WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset().min(i64::MAX as u64) as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list albums", e))?;

        Ok(PageResponse::new(
            albums,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &CreateAlbum) -> AppResult<Album> {
        sqlx::query_as::<_, Album>(
            "INSERT INTO albums (name, user_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create album", e))
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Album> {
        sqlx::query_as::<_, Album>(
            "UPDATE albums SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename album", e))?
        .ok_or_else(|| AppError::not_found(format!("Album {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // image_manipulations.album_id cascades on delete
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete album", e))?;
        Ok(result.rows_affected() > 0)
    }
}
