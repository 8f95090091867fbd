//! The resize pipeline: acquire, decode, resolve, resize, save, record.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use pixelhub_core::config::CleanupPolicy;
use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;
use pixelhub_database::store::{AlbumStore, ManipulationStore};
use pixelhub_entity::manipulation::{CreateManipulation, ManipulationRecord, ManipulationType};
use pixelhub_storage::acquire::{SourceAcquirer, SourceInput};
use pixelhub_storage::imaging::{Dimensions, ImageBackend};
use pixelhub_storage::workdir::PendingArtifact;

use crate::context::RequestContext;
use crate::dimension::{self, DimensionSpec};
use crate::guard;

/// A resize request as received from the client.
#[derive(Debug, Clone)]
pub struct ResizeRequest {
    /// The source image.
    pub image: SourceInput,
    /// Target width, absolute (`"400"`) or percent (`"50%"`).
    pub w: String,
    /// Optional target height in the same mode as `w`.
    pub h: Option<String>,
    /// Optional album to group the record into.
    pub album_id: Option<Uuid>,
}

impl ResizeRequest {
    /// The request parameters stored on the record: every field except
    /// the image payload, omitting absent keys.
    pub fn parameters(&self) -> Value {
        let mut data = Map::new();
        data.insert("w".to_string(), Value::String(self.w.clone()));
        if let Some(h) = &self.h {
            data.insert("h".to_string(), Value::String(h.clone()));
        }
        if let Some(album_id) = self.album_id {
            data.insert("album_id".to_string(), Value::String(album_id.to_string()));
        }
        Value::Object(data)
    }
}

/// Orchestrates one resize from request to persisted record.
#[derive(Clone)]
pub struct ResizeService {
    records: Arc<dyn ManipulationStore>,
    albums: Arc<dyn AlbumStore>,
    acquirer: Arc<SourceAcquirer>,
    backend: Arc<dyn ImageBackend>,
    cleanup: CleanupPolicy,
    max_upload_size_bytes: u64,
}

impl std::fmt::Debug for ResizeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeService")
            .field("cleanup", &self.cleanup)
            .finish()
    }
}

impl ResizeService {
    /// Creates a new resize service.
    pub fn new(
        records: Arc<dyn ManipulationStore>,
        albums: Arc<dyn AlbumStore>,
        acquirer: Arc<SourceAcquirer>,
        backend: Arc<dyn ImageBackend>,
        cleanup: CleanupPolicy,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            records,
            albums,
            acquirer,
            backend,
            cleanup,
            max_upload_size_bytes,
        }
    }

    /// Resize an image and record the result.
    ///
    /// No record exists unless every step succeeded. Failures after the
    /// working directory was created hand it to the cleanup policy.
    pub async fn resize(
        &self,
        ctx: &RequestContext,
        request: ResizeRequest,
    ) -> AppResult<ManipulationRecord> {
        // ── Step 0: parse dimensions, no I/O ─────────────────────────
        let width = DimensionSpec::parse(&request.w)?;
        let height = request
            .h
            .as_deref()
            .map(DimensionSpec::parse)
            .transpose()?;
        dimension::check_mode(width, height)?;

        if let SourceInput::Upload { bytes, .. } = &request.image {
            if bytes.len() as u64 > self.max_upload_size_bytes {
                return Err(AppError::validation(format!(
                    "Image exceeds maximum upload size of {} bytes",
                    self.max_upload_size_bytes
                )));
            }
        }

        // ── Step 1: album ownership ──────────────────────────────────
        if let Some(album_id) = request.album_id {
            let album = self.albums.find_by_id(album_id).await?;
            guard::owned_album(ctx, album, album_id)?;
        }

        // ── Step 2: acquire the source ───────────────────────────────
        let data = request.parameters();
        let album_id = request.album_id;
        let pending = self.acquirer.acquire(request.image, self.cleanup).await?;

        // ── Steps 3-6: decode, resolve, resize, save, record ─────────
        match self
            .process(ctx, &pending, width, height, data, album_id)
            .await
        {
            Ok(record) => {
                pending.commit();
                Ok(record)
            }
            Err(e) => {
                warn!(
                    user_id = %ctx.user_id,
                    directory = %pending.directory.relative(),
                    error = %e,
                    "Resize failed"
                );
                pending.discard(self.cleanup).await;
                Err(e)
            }
        }
    }

    async fn process(
        &self,
        ctx: &RequestContext,
        pending: &PendingArtifact,
        width: DimensionSpec,
        height: Option<DimensionSpec>,
        data: Value,
        album_id: Option<Uuid>,
    ) -> AppResult<ManipulationRecord> {
        let source = &pending.source;
        let resized_name = source.resized_name();

        let backend = Arc::clone(&self.backend);
        let input_path = source.local_path.clone();
        let output_path = pending.directory.file_path(&resized_name);

        let (original, target) =
            tokio::task::spawn_blocking(move || -> AppResult<(Dimensions, Dimensions)> {
                let decoded = backend.decode(&input_path)?;
                let original = decoded.dimensions();
                let target = dimension::resolve(width, height, original)?;
                let resized = backend.resize(&decoded, target)?;
                backend.save(&resized, &output_path)?;
                Ok((original, target))
            })
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Resize task panicked", e))??;

        let record = self
            .records
            .create(&CreateManipulation {
                kind: ManipulationType::Resize,
                data,
                user_id: ctx.user_id,
                album_id,
                name: source.file_name.clone(),
                path: pending.directory.relative_path(&source.file_name),
                output_path: pending.directory.relative_path(&resized_name),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            record_id = %record.id,
            directory = %pending.directory.relative(),
            original_width = original.width,
            original_height = original.height,
            width = target.width,
            height = target.height,
            "Image resized"
        );

        Ok(record)
    }
}
