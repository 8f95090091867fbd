//! Manipulation record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::ManipulationType;

/// One completed image manipulation and the files it produced.
///
/// `path` and `output_path` are relative to the public root and always
/// share the same randomized `images/<token>/` directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ManipulationRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The operation performed.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ManipulationType,
    /// Request parameters (everything except the image payload).
    pub data: serde_json::Value,
    /// The owning user.
    pub user_id: Uuid,
    /// The album this record is grouped into, if any.
    pub album_id: Option<Uuid>,
    /// Original file name.
    pub name: String,
    /// Relative path of the original file.
    pub path: String,
    /// Relative path of the produced file.
    pub output_path: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ManipulationRecord {
    /// Whether `user_id` owns this record.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// The relative working directory holding both files.
    pub fn directory(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(dir, _)| dir)
    }
}

/// Data required to create a new manipulation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManipulation {
    /// The operation performed.
    pub kind: ManipulationType,
    /// Request parameters (everything except the image payload).
    pub data: serde_json::Value,
    /// The owning user.
    pub user_id: Uuid,
    /// Optional album.
    pub album_id: Option<Uuid>,
    /// Original file name.
    pub name: String,
    /// Relative path of the original file.
    pub path: String,
    /// Relative path of the produced file.
    pub output_path: String,
}
