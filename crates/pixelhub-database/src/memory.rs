//! In-memory store used by tests and `provider = "memory"` deployments.
//!
//! Albums and records share one lock so that deleting an album removes
//! its records atomically, mirroring the `ON DELETE CASCADE` foreign key.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use pixelhub_core::error::AppError;
use pixelhub_core::result::AppResult;
use pixelhub_core::types::pagination::{PageRequest, PageResponse};
use pixelhub_entity::album::{Album, CreateAlbum};
use pixelhub_entity::manipulation::{CreateManipulation, ManipulationRecord};

use crate::store::{AlbumStore, ManipulationStore};

#[derive(Debug, Default)]
struct Tables {
    // Kept in insertion order; listings walk them in reverse.
    albums: Vec<Album>,
    records: Vec<ManipulationRecord>,
}

/// Process-local store implementing both [`AlbumStore`] and [`ManipulationStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored manipulation records.
    pub async fn record_count(&self) -> usize {
        self.tables.read().await.records.len()
    }
}

fn paginate<T: Clone>(
    newest_first: impl Iterator<Item = T>,
    page: &PageRequest,
) -> PageResponse<T> {
    let all: Vec<T> = newest_first.collect();
    let total = all.len() as u64;
    let items = all
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(items, page.page, page.page_size, total)
}

#[async_trait]
impl AlbumStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Album>> {
        let tables = self.tables.read().await;
        Ok(tables.albums.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Album>> {
        let tables = self.tables.read().await;
        let owned = tables
            .albums
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned();
        Ok(paginate(owned, page))
    }

    async fn create(&self, data: &CreateAlbum) -> AppResult<Album> {
        let now = Utc::now();
        let album = Album {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.albums.push(album.clone());
        Ok(album)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Album> {
        let mut tables = self.tables.write().await;
        let album = tables
            .albums
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Album {id} not found")))?;
        album.name = name.to_string();
        album.updated_at = Utc::now();
        Ok(album.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.albums.len();
        tables.albums.retain(|a| a.id != id);
        if tables.albums.len() == before {
            return Ok(false);
        }
        tables.records.retain(|r| r.album_id != Some(id));
        Ok(true)
    }
}

#[async_trait]
impl ManipulationStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ManipulationRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        let tables = self.tables.read().await;
        let owned = tables
            .records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned();
        Ok(paginate(owned, page))
    }

    async fn find_by_album(
        &self,
        album_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ManipulationRecord>> {
        let tables = self.tables.read().await;
        let grouped = tables
            .records
            .iter()
            .rev()
            .filter(|r| r.album_id == Some(album_id))
            .cloned();
        Ok(paginate(grouped, page))
    }

    async fn create(&self, data: &CreateManipulation) -> AppResult<ManipulationRecord> {
        let mut tables = self.tables.write().await;
        if let Some(album_id) = data.album_id {
            if !tables.albums.iter().any(|a| a.id == album_id) {
                return Err(AppError::database(format!(
                    "Album {album_id} does not exist"
                )));
            }
        }

        let now = Utc::now();
        let record = ManipulationRecord {
            id: Uuid::new_v4(),
            kind: data.kind,
            data: data.data.clone(),
            user_id: data.user_id,
            album_id: data.album_id,
            name: data.name.clone(),
            path: data.path.clone(),
            output_path: data.output_path.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.records.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.records.len();
        tables.records.retain(|r| r.id != id);
        Ok(tables.records.len() != before)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
