//! Image manipulation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pixelhub_core::error::AppError;
use pixelhub_core::types::pagination::PageResponse;
use pixelhub_entity::manipulation::ManipulationRecord;

use crate::dto::response::{ApiResponse, ManipulationResponse, PaginatedResponse};
use crate::extractors::{AuthUser, PaginationParams, ResizeForm};
use crate::state::AppState;

type RecordPage = Json<ApiResponse<PaginatedResponse<ManipulationResponse>>>;

/// POST /api/v1/image/resize
pub async fn resize(
    State(state): State<AppState>,
    auth: AuthUser,
    ResizeForm(request): ResizeForm,
) -> Result<(StatusCode, Json<ApiResponse<ManipulationResponse>>), AppError> {
    let record = state.resize_service.resize(&auth, request).await?;
    let body = ManipulationResponse::from_record(record, &state.config.storage.public_url_base);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(body))))
}

/// GET /api/v1/image
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<RecordPage, AppError> {
    let page = params.into_page_request();
    let result = state.manipulation_service.list(&auth, &page).await?;
    Ok(to_page(&state, result))
}

/// GET /api/v1/image/by-album/{album_id}
pub async fn by_album(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(album_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<RecordPage, AppError> {
    let page = params.into_page_request();
    let result = state
        .manipulation_service
        .list_by_album(&auth, album_id, &page)
        .await?;
    Ok(to_page(&state, result))
}

/// GET /api/v1/image/{id}
pub async fn show(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ManipulationResponse>>, AppError> {
    let record = state.manipulation_service.show(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ManipulationResponse::from_record(
        record,
        &state.config.storage.public_url_base,
    ))))
}

/// DELETE /api/v1/image/{id}
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.manipulation_service.destroy(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn to_page(state: &AppState, page: PageResponse<ManipulationRecord>) -> RecordPage {
    let base = &state.config.storage.public_url_base;
    let page = page.map(|record| ManipulationResponse::from_record(record, base));
    Json(ApiResponse::ok(PaginatedResponse::from(page)))
}
