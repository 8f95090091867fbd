//! Materializes a source image into a fresh working directory.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Url;
use tokio::fs;
use tracing::{debug, info};

use pixelhub_core::config::CleanupPolicy;
use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;

use crate::fetch::RemoteFetcher;
use crate::token::RandomTokenSource;
use crate::workdir::{PendingArtifact, PublicRoot, discard_directory, is_plain_segment};

/// Suffix inserted before the extension of the resized output.
pub const RESIZED_SUFFIX: &str = "-resized";

/// Longest file name most filesystems accept, in bytes.
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// Where the original image comes from.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// A multipart upload with its client-supplied file name.
    Upload {
        /// Client-supplied name, extension included.
        file_name: String,
        /// Raw file content.
        bytes: Bytes,
    },
    /// A remote `http`/`https` URL.
    Url(String),
}

/// The acquired original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path of the written file.
    pub local_path: PathBuf,
    /// File name as stored, extension included.
    pub file_name: String,
    /// File name before its last `.`.
    pub file_stem: String,
    /// File name after its last `.`; empty when there is no dot.
    pub extension: String,
}

impl SourceFile {
    /// Build from a file name, splitting stem and extension on the last `.`.
    pub fn new(local_path: PathBuf, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let (file_stem, extension) = split_file_name(&file_name);
        Self {
            local_path,
            file_stem: file_stem.to_string(),
            extension: extension.to_string(),
            file_name,
        }
    }

    /// Name of the resized output: `{stem}-resized.{ext}`, or
    /// `{stem}-resized` when the source has no extension.
    pub fn resized_name(&self) -> String {
        if self.extension.is_empty() {
            format!("{}{RESIZED_SUFFIX}", self.file_stem)
        } else {
            format!("{}{RESIZED_SUFFIX}.{}", self.file_stem, self.extension)
        }
    }
}

/// Split on the last `.`.
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    file_name.rsplit_once('.').unwrap_or((file_name, ""))
}

/// Acquires source images into randomized working directories.
#[derive(Clone)]
pub struct SourceAcquirer {
    root: PublicRoot,
    tokens: Arc<dyn RandomTokenSource>,
    fetcher: RemoteFetcher,
}

impl std::fmt::Debug for SourceAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceAcquirer")
            .field("root", &self.root.path())
            .finish()
    }
}

impl SourceAcquirer {
    /// Create a new acquirer.
    pub fn new(
        root: PublicRoot,
        tokens: Arc<dyn RandomTokenSource>,
        fetcher: RemoteFetcher,
    ) -> Self {
        Self {
            root,
            tokens,
            fetcher,
        }
    }

    /// The public root working directories are created under.
    pub fn public_root(&self) -> &PublicRoot {
        &self.root
    }

    /// Write the source into a new working directory.
    ///
    /// Input is validated (and remote content fetched) before the
    /// directory is created. If writing the file fails, `cleanup`
    /// decides whether the new directory is removed.
    pub async fn acquire(
        &self,
        input: SourceInput,
        cleanup: CleanupPolicy,
    ) -> AppResult<PendingArtifact> {
        let (file_name, bytes) = match input {
            SourceInput::Upload { file_name, bytes } => {
                validate_file_name(&file_name)?;
                (file_name, bytes)
            }
            SourceInput::Url(raw) => {
                let url = parse_source_url(&raw)?;
                let file_name = url_file_name(&url)?;
                let bytes = self.fetcher.fetch(&url).await?;
                (file_name, bytes)
            }
        };

        let token = self.tokens.next_token();
        let directory = self.root.create_working_directory(&token).await?;
        let local_path = directory.file_path(&file_name);

        if let Err(e) = fs::write(&local_path, &bytes).await {
            discard_directory(&directory, cleanup).await;
            return Err(AppError::with_source(
                ErrorKind::Acquire,
                format!("Failed to write source file {file_name}"),
                e,
            ));
        }

        info!(
            directory = %directory.relative(),
            file_name = %file_name,
            bytes = bytes.len(),
            "Acquired source image"
        );

        Ok(PendingArtifact {
            directory,
            source: SourceFile::new(local_path, file_name),
        })
    }
}

/// Reject names that are not a single plain segment, or that would not
/// fit on disk once the resized suffix is added.
pub fn validate_file_name(file_name: &str) -> AppResult<()> {
    if !is_plain_segment(file_name) {
        return Err(AppError::validation(format!(
            "Invalid image file name: {file_name:?}"
        )));
    }
    if file_name.len() + RESIZED_SUFFIX.len() > MAX_FILE_NAME_BYTES {
        return Err(AppError::validation(format!(
            "Image file name is too long ({} bytes, at most {} allowed)",
            file_name.len(),
            MAX_FILE_NAME_BYTES - RESIZED_SUFFIX.len()
        )));
    }
    Ok(())
}

/// Parse a source URL, accepting only `http` and `https`.
pub fn parse_source_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid image URL", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::validation(format!(
            "Unsupported image URL scheme: {other}"
        ))),
    }
}

/// The basename of the URL path.
pub fn url_file_name(url: &Url) -> AppResult<String> {
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    validate_file_name(name)?;
    debug!(url = %url, file_name = name, "Derived file name from URL");
    Ok(name.to_string())
}
