//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pixelhub_core::types::pagination::PageResponse;
use pixelhub_entity::album::Album;
use pixelhub_entity::manipulation::{ManipulationRecord, ManipulationType};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> From<PageResponse<T>> for PaginatedResponse<T> {
    fn from(page: PageResponse<T>) -> Self {
        Self {
            items: page.items,
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// A manipulation record with public URLs for both files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManipulationResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ManipulationType,
    pub data: serde_json::Value,
    pub user_id: Uuid,
    pub album_id: Option<Uuid>,
    pub name: String,
    pub path: String,
    pub output_path: String,
    /// Public URL of the original file.
    pub original_url: String,
    /// Public URL of the resized file.
    pub output_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ManipulationResponse {
    /// Build from a record, prefixing paths with `public_url_base`.
    pub fn from_record(record: ManipulationRecord, public_url_base: &str) -> Self {
        Self {
            original_url: public_url(public_url_base, &record.path),
            output_url: public_url(public_url_base, &record.output_path),
            id: record.id,
            kind: record.kind,
            data: record.data,
            user_id: record.user_id,
            album_id: record.album_id,
            name: record.name,
            path: record.path,
            output_path: record.output_path,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Join a base URL and a public-root-relative path.
pub fn public_url(base: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// Album summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            name: album.name,
            user_id: album.user_id,
            created_at: album.created_at,
            updated_at: album.updated_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Record store status.
    pub database: String,
    /// Public root status.
    pub storage: String,
}
