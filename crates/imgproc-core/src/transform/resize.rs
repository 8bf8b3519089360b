//! Resampling to exact dimensions.
//!
//! Uses the `image` crate's separable resamplers. The aspect ratio is not
//! preserved: the output is stretched to whatever size is requested.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_input, TransformError};
use crate::decode::ImageBuffer;

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels, at least 1
/// * `height` - Target height in pixels, at least 1
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if either target dimension is zero.
pub fn resize(
    image: &ImageBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<ImageBuffer, TransformError> {
    check_input(image)?;

    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "resize target must be at least 1x1, got {width}x{height}"
        )));
    }

    debug!(
        from_width = image.width,
        from_height = image.height,
        width,
        height,
        ?filter,
        "resize"
    );

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    // The resampler treats the three samples independently, so the BGR
    // bytes can be handed over as-is without reordering.
    let samples = image::RgbImage::from_raw(image.width, image.height, image.pixels.clone())
        .ok_or(TransformError::BufferSizeMismatch {
            expected: image.stride() * image.height as usize,
            actual: image.pixels.len(),
        })?;

    let resized = image::imageops::resize(&samples, width, height, filter.to_image_filter());

    Ok(ImageBuffer::new(width, height, resized.into_raw()))
}
