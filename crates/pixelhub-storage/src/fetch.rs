//! Bounded HTTP(S) download of remote source images.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::Url;
use tracing::debug;

use pixelhub_core::config::FetchConfig;
use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;

/// Downloads remote images with a timeout and a body size limit.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl RemoteFetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: &FetchConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            max_bytes: config.max_download_size_bytes,
        })
    }

    /// Fetch the full body at `url`.
    ///
    /// Network errors, timeouts, non-2xx responses and bodies larger than
    /// the configured limit all fail with [`ErrorKind::Acquire`].
    pub async fn fetch(&self, url: &Url) -> AppResult<Bytes> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_error(url, e))?;

        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                return Err(self.too_large(url));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| fetch_error(url, e))?;
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), "Fetched remote image");
        Ok(body.freeze())
    }

    fn too_large(&self, url: &Url) -> AppError {
        AppError::acquire(format!(
            "Remote image at {url} exceeds the {} byte limit",
            self.max_bytes
        ))
    }
}

fn fetch_error(url: &Url, err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("Timed out fetching {url}")
    } else if let Some(status) = err.status() {
        format!("Fetching {url} returned {status}")
    } else {
        format!("Failed to fetch {url}")
    };
    AppError::with_source(ErrorKind::Acquire, message, err)
}
