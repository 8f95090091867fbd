//! Ownership checks applied before any read, mutation or delete.

use uuid::Uuid;

use pixelhub_core::error::AppError;
use pixelhub_core::result::AppResult;
use pixelhub_entity::album::Album;
use pixelhub_entity::manipulation::ManipulationRecord;

use crate::context::RequestContext;

/// Succeeds only when the acting user owns the resource.
pub fn authorize(acting_user_id: Uuid, owner_user_id: Uuid) -> AppResult<()> {
    if acting_user_id == owner_user_id {
        Ok(())
    } else {
        Err(AppError::authorization("Unauthorized"))
    }
}

/// Require `ctx` to own the album, treating a missing album as not found.
pub fn owned_album(ctx: &RequestContext, album: Option<Album>, id: Uuid) -> AppResult<Album> {
    let album = album.ok_or_else(|| AppError::not_found(format!("Album {id} not found")))?;
    authorize(ctx.user_id, album.user_id)?;
    Ok(album)
}

/// Require `ctx` to own the record, treating a missing record as not found.
pub fn owned_record(
    ctx: &RequestContext,
    record: Option<ManipulationRecord>,
    id: Uuid,
) -> AppResult<ManipulationRecord> {
    let record = record.ok_or_else(|| AppError::not_found(format!("Image {id} not found")))?;
    authorize(ctx.user_id, record.user_id)?;
    Ok(record)
}
