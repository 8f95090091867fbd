//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use pixelhub_core::error::AppError;
use pixelhub_service::ResizeRequest;
use pixelhub_storage::acquire::SourceInput;

/// JSON body for `POST /api/v1/image/resize` with a remote image.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResizeJsonRequest {
    /// Remote image URL.
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
    /// Target width, `400` / `"400"` / `"50%"`.
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "w is required"))]
    pub w: String,
    /// Optional target height.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub h: Option<String>,
    /// Optional album.
    #[serde(default)]
    pub album_id: Option<Uuid>,
}

impl ResizeJsonRequest {
    /// Validate and convert into a service request.
    pub fn into_resize_request(self) -> Result<ResizeRequest, AppError> {
        self.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        Ok(ResizeRequest {
            image: SourceInput::Url(self.image),
            w: self.w,
            h: self.h.filter(|h| !h.trim().is_empty()),
            album_id: self.album_id,
        })
    }
}

/// Create album request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlbumRequest {
    /// Album name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Rename album request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAlbumRequest {
    /// New album name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
