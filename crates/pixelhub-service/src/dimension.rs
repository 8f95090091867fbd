//! Target dimension resolution.
//!
//! Everything here is pure: raw `w`/`h` strings are parsed once into
//! [`DimensionSpec`]s, and [`resolve`] maps them plus the decoded source
//! size to exact pixel dimensions.

use std::fmt;

use pixelhub_core::error::AppError;
use pixelhub_core::result::AppResult;
use pixelhub_storage::imaging::Dimensions;

/// Largest accepted output edge, in pixels.
pub const MAX_TARGET_DIMENSION: u32 = 20_000;

/// Largest accepted output area, in pixels.
pub const MAX_TARGET_PIXELS: u64 = 50_000_000;

/// A caller-supplied width or height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionSpec {
    /// An absolute size in pixels.
    Absolute(f64),
    /// A percentage of the corresponding source dimension.
    Percent(f64),
}

impl DimensionSpec {
    /// Parse `"400"`, `"400.5"` or `"50%"`.
    ///
    /// Non-numeric, non-finite, zero and negative values are rejected.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(n) => (n.trim_end(), true),
            None => (trimmed, false),
        };

        let value: f64 = number
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid dimension: {raw:?}")))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::validation(format!(
                "Dimension must be a positive number: {raw:?}"
            )));
        }

        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Absolute(value)
        })
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }

    pub fn value(&self) -> f64 {
        match *self {
            Self::Absolute(v) | Self::Percent(v) => v,
        }
    }
}

impl fmt::Display for DimensionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Reject a height whose shape disagrees with the width's mode.
pub fn check_mode(width: DimensionSpec, height: Option<DimensionSpec>) -> AppResult<()> {
    match height {
        Some(h) if h.is_percent() != width.is_percent() => Err(AppError::validation(
            "Width and height must both be percentages or both be absolute sizes",
        )),
        _ => Ok(()),
    }
}

/// Compute the output size for a source of `original` dimensions.
///
/// The mode is chosen by `width`. With a percentage width, a missing
/// height reuses the width's ratio. With an absolute width, a missing
/// height preserves the source aspect ratio.
pub fn resolve(
    width: DimensionSpec,
    height: Option<DimensionSpec>,
    original: Dimensions,
) -> AppResult<Dimensions> {
    check_mode(width, height)?;

    if original.width == 0 || original.height == 0 {
        return Err(AppError::invalid_image(format!(
            "Source image has no usable size ({}x{})",
            original.width, original.height
        )));
    }

    let ow = f64::from(original.width);
    let oh = f64::from(original.height);

    let (tw, th) = match width {
        DimensionSpec::Percent(ratio_w) => {
            let ratio_h = height.map_or(ratio_w, |h| h.value());
            (ow * ratio_w / 100.0, oh * ratio_h / 100.0)
        }
        DimensionSpec::Absolute(w) => {
            let h = height.map_or(oh * w / ow, |h| h.value());
            (w, h)
        }
    };

    let target = Dimensions {
        width: to_pixels(tw, "width")?,
        height: to_pixels(th, "height")?,
    };

    let area = u64::from(target.width) * u64::from(target.height);
    if area > MAX_TARGET_PIXELS {
        return Err(AppError::validation(format!(
            "Resolved size {}x{} exceeds {MAX_TARGET_PIXELS} pixels",
            target.width, target.height
        )));
    }

    Ok(target)
}

fn to_pixels(value: f64, axis: &str) -> AppResult<u32> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 1.0 {
        return Err(AppError::validation(format!(
            "Resolved {axis} rounds to zero pixels"
        )));
    }
    if rounded > f64::from(MAX_TARGET_DIMENSION) {
        return Err(AppError::validation(format!(
            "Resolved {axis} exceeds {MAX_TARGET_DIMENSION} pixels"
        )));
    }
    Ok(rounded as u32)
}
