//! Album entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-owned grouping of manipulation records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Album {
    /// Unique album identifier.
    pub id: Uuid,
    /// Album display name.
    pub name: String,
    /// The owning user.
    pub user_id: Uuid,
    /// When the album was created.
    pub created_at: DateTime<Utc>,
    /// When the album was last renamed.
    pub updated_at: DateTime<Utc>,
}

impl Album {
    /// Whether `user_id` owns this album.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Data required to create a new album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    /// Album display name.
    pub name: String,
    /// The owning user.
    pub user_id: Uuid,
}
