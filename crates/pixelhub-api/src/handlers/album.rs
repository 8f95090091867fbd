//! Album handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pixelhub_core::error::AppError;

use crate::dto::request::{CreateAlbumRequest, UpdateAlbumRequest};
use crate::dto::response::{AlbumResponse, ApiResponse, PaginatedResponse};
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/album
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<AlbumResponse>>>, AppError> {
    let page = params.into_page_request();
    let result = state.album_service.list(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::from(
        result.map(AlbumResponse::from),
    ))))
}

/// POST /api/v1/album
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AlbumResponse>>), AppError> {
    let album = state.album_service.create(&auth, &req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AlbumResponse::from(album))),
    ))
}

/// GET /api/v1/album/{id}
pub async fn show(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AlbumResponse>>, AppError> {
    let album = state.album_service.show(&auth, id).await?;
    Ok(Json(ApiResponse::ok(AlbumResponse::from(album))))
}

/// PUT /api/v1/album/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateAlbumRequest>,
) -> Result<Json<ApiResponse<AlbumResponse>>, AppError> {
    let album = state.album_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(AlbumResponse::from(album))))
}

/// DELETE /api/v1/album/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.album_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
