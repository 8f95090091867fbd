//! `ResizeForm` extractor: accepts the resize request either as
//! `multipart/form-data` (file upload or URL text) or as JSON (URL).

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use uuid::Uuid;

use pixelhub_core::error::AppError;
use pixelhub_service::ResizeRequest;
use pixelhub_storage::acquire::SourceInput;

use crate::dto::request::ResizeJsonRequest;
use crate::state::AppState;

/// A parsed resize request.
#[derive(Debug, Clone)]
pub struct ResizeForm(pub ResizeRequest);

impl FromRequest<AppState> for ResizeForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e.body_text())))?;
            return parse_multipart(multipart).await.map(ResizeForm);
        }

        let Json(body) = Json::<ResizeJsonRequest>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        body.into_resize_request().map(ResizeForm)
    }
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

async fn parse_multipart(mut multipart: Multipart) -> Result<ResizeRequest, AppError> {
    let mut image: Option<SourceInput> = None;
    let mut w: Option<String> = None;
    let mut h: Option<String> = None;
    let mut album_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(String::from);
                image = Some(match file_name {
                    Some(file_name) => SourceInput::Upload {
                        file_name,
                        bytes: field
                            .bytes()
                            .await
                            .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                    },
                    None => SourceInput::Url(field_text(field).await?),
                });
            }
            "w" => w = Some(field_text(field).await?),
            "h" => h = Some(field_text(field).await?).filter(|v| !v.trim().is_empty()),
            "album_id" => {
                let text = field_text(field).await?;
                if !text.trim().is_empty() {
                    album_id = Some(
                        Uuid::parse_str(text.trim())
                            .map_err(|_| AppError::validation("Invalid album_id"))?,
                    );
                }
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| AppError::validation("image is required"))?;
    let w = w
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation("w is required"))?;

    Ok(ResizeRequest {
        image,
        w,
        h,
        album_id,
    })
}
