//! Bounded image decoding and JPEG compression.
//!
//! Decoding probes the header first, picks a power-of-two sample factor that
//! keeps the result at or above the requested box, then decodes at that
//! factor.

use std::path::Path;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::content::ImageReference;
use crate::error::{FeedbackError, Result};
use crate::platform::Platform;
use crate::resolver::PathResolver;

/// Default thumbnail bounding box edge, in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 600;

/// Largest power-of-two sample factor that keeps the subsampled image at
/// least `target_w` × `target_h`.
///
/// Zero targets are treated as 1.
///
/// ```
/// use msfeedback::image_ops::compute_sample_factor;
///
/// assert_eq!(compute_sample_factor(4000, 3000, 600, 600), 4);
/// assert_eq!(compute_sample_factor(500, 500, 600, 600), 1);
/// ```
#[must_use]
pub fn compute_sample_factor(source_w: u32, source_h: u32, target_w: u32, target_h: u32) -> u32 {
    let target_w = target_w.max(1);
    let target_h = target_h.max(1);
    let mut factor = 1;

    if source_h > target_h || source_w > target_w {
        let half_h = source_h / 2;
        let half_w = source_w / 2;
        while half_h / factor >= target_h && half_w / factor >= target_w {
            factor *= 2;
        }
    }
    factor
}

/// Downscale `image` by `factor` on both axes (at least 1×1).
#[must_use]
pub fn subsample(image: DynamicImage, factor: u32) -> DynamicImage {
    if factor <= 1 {
        return image;
    }
    let width = (image.width() / factor).max(1);
    let height = (image.height() / factor).max(1);
    trace!(factor, width, height, "Subsampling");
    image.thumbnail_exact(width, height)
}

/// Lossy encoding quality (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quality(u8);

impl Quality {
    #[must_use]
    pub fn new(value: u32) -> Self {
        // Clamped to 1..=100, so the narrowing is lossless.
        #[allow(clippy::cast_possible_truncation)]
        Self(value.clamp(1, 100) as u8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Decode the image at `path`, subsampled to fit at or above the target box.
///
/// # Errors
///
/// Returns [`FeedbackError::Decode`] if the file is not a valid image and
/// [`FeedbackError::ImageNotFound`] if it does not exist.
#[instrument(skip(platform))]
pub fn decode(
    platform: &dyn Platform,
    path: &Path,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage> {
    let (source_w, source_h) = platform.probe_image_bounds(path)?;
    let factor = compute_sample_factor(source_w, source_h, target_w, target_h);
    debug!(source_w, source_h, factor, "Decoding with sample factor");
    platform.decode_image(path, factor)
}

/// Encode `image` as JPEG at `quality`.
pub fn compress(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.value())
        .encode_image(&rgb)
        .map_err(|e| FeedbackError::Decode {
            path: "<in-memory>".to_string(),
            reason: format!("JPEG encoding failed: {e}"),
        })?;
    trace!(len = bytes.len(), quality = quality.value(), "Compressed image");
    Ok(bytes)
}

/// Resolve `reference` and decode it as a bounded thumbnail.
///
/// # Errors
///
/// [`FeedbackError::PathUnresolved`] when the reference cannot be mapped to a
/// path, otherwise any error from [`decode`].
pub fn load_thumbnail(
    platform: &dyn Platform,
    reference: &ImageReference,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage> {
    let path = PathResolver::new(platform)
        .resolve(reference)
        .ok_or_else(|| FeedbackError::PathUnresolved {
            reference: reference.to_string(),
        })?;
    decode(platform, Path::new(&path), target_w, target_h)
}
