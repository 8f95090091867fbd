//! Public file storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Public root; working directories live under `<public_root>/images/`.
    #[serde(default = "default_public_root")]
    pub public_root: String,
    /// Base URL prepended to record paths in responses.
    #[serde(default = "default_public_url_base")]
    pub public_url_base: String,
    /// Serve `<public_root>/images` statically from the API server.
    #[serde(default = "default_true")]
    pub serve_public: bool,
    /// Maximum upload size in bytes (default 20 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Remote fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// What happens to working directories on failure and on delete.
    #[serde(default)]
    pub cleanup: CleanupPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_root: default_public_root(),
            public_url_base: default_public_url_base(),
            serve_public: true,
            max_upload_size_bytes: default_max_upload(),
            fetch: FetchConfig::default(),
            cleanup: CleanupPolicy::default(),
        }
    }
}

/// Remote URL fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Maximum response body size in bytes (default 20 MB).
    #[serde(default = "default_max_upload")]
    pub max_download_size_bytes: u64,
    /// User-Agent header sent with fetches.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_fetch_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            max_download_size_bytes: default_max_upload(),
            user_agent: default_user_agent(),
        }
    }
}

/// Cleanup policy for on-disk artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupPolicy {
    /// Remove the working directory when any step after its creation fails.
    #[serde(default = "default_true")]
    pub remove_on_failure: bool,
    /// Remove the working directory when its record is deleted.
    #[serde(default)]
    pub remove_on_delete: bool,
}

impl Default for CleanupPolicy {
    fn default() -> Self {
        Self {
            remove_on_failure: true,
            remove_on_delete: false,
        }
    }
}

fn default_public_root() -> String {
    "./public".to_string()
}

fn default_public_url_base() -> String {
    "http://localhost:8080".to_string()
}

fn default_max_upload() -> u64 {
    20_971_520 // 20 MB
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("pixelhub/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}
