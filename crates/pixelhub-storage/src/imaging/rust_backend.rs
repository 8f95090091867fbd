//! Pure Rust image backend built on the `image` crate.
//!
//! | Operation | Function |
//! |---|---|
//! | Decode | `ImageReader::with_guessed_format` + `decode` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode | `DynamicImage::save_with_format` |

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use pixelhub_core::error::{AppError, ErrorKind};
use pixelhub_core::result::AppResult;

use super::backend::{DecodedImage, Dimensions, ImageBackend};

/// Backend using the `image` crate's pure Rust codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustImageBackend;

impl RustImageBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Output format for `path`, falling back to `decoded`.
fn output_format(path: &Path, decoded: ImageFormat) -> ImageFormat {
    ImageFormat::from_path(path)
        .ok()
        .filter(|f| f.writing_enabled())
        .unwrap_or(decoded)
}

/// Convert to a color type the target encoder accepts.
fn prepare_for(image: &DynamicImage, format: ImageFormat) -> Option<DynamicImage> {
    match format {
        // JPEG has no alpha channel and only 8-bit samples.
        ImageFormat::Jpeg => match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => None,
            other => Some(DynamicImage::ImageRgb8(other.to_rgb8())),
        },
        _ => None,
    }
}

impl ImageBackend for RustImageBackend {
    fn decode(&self, path: &Path) -> AppResult<DecodedImage> {
        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open {}", path.display()),
                    e,
                )
            })?;

        let format = reader
            .format()
            .ok_or_else(|| AppError::invalid_image("Unrecognized image format"))?;

        let image = reader.decode().map_err(|e| {
            AppError::with_source(ErrorKind::InvalidImage, "Failed to decode image", e)
        })?;

        Ok(DecodedImage::new(image, format))
    }

    fn resize(&self, image: &DecodedImage, target: Dimensions) -> AppResult<DecodedImage> {
        if target.width == 0 || target.height == 0 {
            return Err(AppError::validation("Target dimensions must be non-zero"));
        }
        let resized = image
            .image
            .resize_exact(target.width, target.height, FilterType::Lanczos3);
        Ok(DecodedImage::new(resized, image.format))
    }

    fn save(&self, image: &DecodedImage, path: &Path) -> AppResult<()> {
        let format = output_format(path, image.format);
        let converted = prepare_for(&image.image, format);
        converted
            .as_ref()
            .unwrap_or(&image.image)
            .save_with_format(path, format)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to save {}", path.display()),
                    e,
                )
            })
    }
}
