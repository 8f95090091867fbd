//! Randomized per-request working directories under the public root.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use pixelhub_core::config::CleanupPolicy;
use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;

use crate::acquire::SourceFile;

/// Name of the directory (relative to the public root) holding every
/// working directory.
pub const IMAGES_DIR: &str = "images";

/// The publicly served root directory.
#[derive(Debug, Clone)]
pub struct PublicRoot {
    root: PathBuf,
}

impl PublicRoot {
    /// Open the public root, creating `<root>/images` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        let images = root.join(IMAGES_DIR);
        fs::create_dir_all(&images).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create public root: {}", images.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Absolute path of the public root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Whether the images directory is present and is a directory.
    pub async fn health_check(&self) -> AppResult<bool> {
        match fs::metadata(self.root.join(IMAGES_DIR)).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(_) => Ok(false),
        }
    }

    /// Create `images/<token>/`. Fails if the directory already exists.
    pub async fn create_working_directory(&self, token: &str) -> AppResult<WorkingDirectory> {
        if !is_plain_segment(token) {
            return Err(AppError::internal(format!(
                "Token is not a valid directory name: {token:?}"
            )));
        }

        let relative = format!("{IMAGES_DIR}/{token}");
        let absolute = self.root.join(IMAGES_DIR).join(token);

        fs::create_dir(&absolute).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Working directory already exists: {relative}"),
                    e,
                )
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create working directory: {relative}"),
                    e,
                )
            }
        })?;

        debug!(directory = %relative, "Created working directory");
        Ok(WorkingDirectory { relative, absolute })
    }

    /// Remove a working directory given its relative path (`images/<token>`).
    ///
    /// Returns `false` when the directory was already gone.
    pub async fn remove_directory(&self, relative: &str) -> AppResult<bool> {
        let token = relative
            .strip_prefix(IMAGES_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|token| is_plain_segment(token))
            .ok_or_else(|| {
                AppError::storage(format!("Refusing to remove non-working directory: {relative}"))
            })?;

        let absolute = self.root.join(IMAGES_DIR).join(token);
        match fs::remove_dir_all(&absolute).await {
            Ok(()) => {
                debug!(directory = %relative, "Removed working directory");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove working directory: {relative}"),
                e,
            )),
        }
    }
}

/// A single `images/<token>/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    relative: String,
    absolute: PathBuf,
}

impl WorkingDirectory {
    /// Path relative to the public root, without a trailing slash.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Absolute filesystem path.
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Absolute path of a file inside this directory.
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.absolute.join(file_name)
    }

    /// Public-root-relative path of a file inside this directory.
    pub fn relative_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.relative)
    }
}

/// A working directory holding an acquired source that no record
/// references yet.
#[derive(Debug)]
#[must_use = "a pending artifact must be committed or discarded"]
pub struct PendingArtifact {
    /// The directory the source was written into.
    pub directory: WorkingDirectory,
    /// The acquired source file.
    pub source: SourceFile,
}

impl PendingArtifact {
    /// Mark the artifact as referenced by a persisted record.
    pub fn commit(self) {
        debug!(directory = %self.directory.relative, "Committed working directory");
    }

    /// Abandon the artifact, removing its directory if the policy asks for it.
    pub async fn discard(self, policy: CleanupPolicy) {
        discard_directory(&self.directory, policy).await;
    }
}

/// Remove a directory nothing references, if `policy` asks for it.
///
/// Failures are logged rather than returned.
pub(crate) async fn discard_directory(directory: &WorkingDirectory, policy: CleanupPolicy) {
    if !policy.remove_on_failure {
        debug!(directory = %directory.relative, "Keeping failed working directory");
        return;
    }
    if let Err(e) = fs::remove_dir_all(&directory.absolute).await {
        warn!(
            directory = %directory.relative,
            error = %e,
            "Failed to remove working directory"
        );
    } else {
        debug!(directory = %directory.relative, "Discarded working directory");
    }
}

/// A non-empty path segment with no separators and no dot-only names.
pub(crate) fn is_plain_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
