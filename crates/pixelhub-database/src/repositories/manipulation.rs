//! Manipulation record repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;
use pixelhub_core::types::pagination::{PageRequest, PageResponse};
use pixelhub_entity::manipulation::{CreateManipulation, ManipulationRecord};

use crate::store::ManipulationStore;

/// Repository for `image_manipulations` rows.
#[derive(Debug, Clone)]
pub struct ManipulationRepository {
    pool: PgPool,
}

impl ManipulationRepository {
    /// Create a new manipulation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_where(&self, column: &'static str, value: Uuid) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM image_manipulations WHERE {column} = $1");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count manipulations", e)
            })?;
        Ok(total as u64)
    }

    async fn page_where(
        &self,
        column: &'static str,
        value: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        let total = self.count_where(column, value).await?;

        let sql = format!(
            "SELECT * FROM image_manipulations WHERE {column} = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let records = sqlx::query_as::<_, ManipulationRecord>(&sql)
            .bind(value)
            .bind(page.limit() as i64)
            .bind(page.offset().min(i64::MAX as u64) as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list manipulations", e)
            })?;

        Ok(PageResponse::new(records, page.page, page.page_size, total))
    }
}

#[async_trait]
impl ManipulationStore for ManipulationRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ManipulationRecord>> {
        sqlx::query_as::<_, ManipulationRecord>("SELECT * FROM image_manipulations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find manipulation", e)
            })
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        self.page_where("user_id", user_id, page).await
    }

    async fn find_by_album(
        &self,
        album_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        self.page_where("album_id", album_id, page).await
    }

    async fn create(&self, data: &CreateManipulation) -> AppResult<ManipulationRecord> {
        sqlx::query_as::<_, ManipulationRecord>(
            r#"INSERT INTO image_manipulations
                (type, data, user_id, album_id, name, path, output_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *"#,
        )
        .bind(data.kind)
        .bind(&data.data)
        .bind(data.user_id)
        .bind(data.album_id)
        .bind(&data.name)
        .bind(&data.path)
        .bind(&data.output_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create manipulation", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM image_manipulations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete manipulation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
