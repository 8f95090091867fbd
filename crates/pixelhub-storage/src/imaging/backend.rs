//! Image processing backend trait and shared types.
//!
//! The pipeline only needs three capabilities from a backend: decode a
//! file, resize to exact dimensions, and save to a path. The production
//! implementation is [`RustImageBackend`](super::rust_backend::RustImageBackend).
//! All calls are blocking and are expected to run on a blocking thread.

use std::path::Path;

use image::{DynamicImage, ImageFormat};

use pixelhub_core::result::AppResult;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image together with the format it was read in.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self { image, format }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.image.width(),
            height: self.image.height(),
        }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Decode the image at `path`, detecting its format from content.
    fn decode(&self, path: &Path) -> AppResult<DecodedImage>;

    /// Resize to exactly `target`, ignoring aspect ratio.
    fn resize(&self, image: &DecodedImage, target: Dimensions) -> AppResult<DecodedImage>;

    /// Save to `path`. The format follows the path's extension and falls
    /// back to the decoded format when the extension is missing or unknown.
    fn save(&self, image: &DecodedImage, path: &Path) -> AppResult<()>;
}
