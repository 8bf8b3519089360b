//! Pure image-to-image transforms.
//!
//! Every function here borrows its input and returns a freshly allocated
//! [`ImageBuffer`]; nothing mutates the source. Parameters are taken at face
//! value: normalization (odd kernel sizes, default crop extents) belongs to
//! [`crate::validate`], so a transform rejects what it cannot execute instead
//! of silently adjusting it.
//!
//! # Coordinate System
//!
//! - Origin is the top-left pixel
//! - Crop regions are half-open: `[x, x + width) × [y, y + height)`
//! - Rotation angles are in degrees, positive = counter-clockwise
//!
//! # Borders
//!
//! Neighborhood filters (Gaussian, median, bilateral) read outside the image
//! by mirroring about the edge pixel without repeating it
//! (`gfedcb|abcdefgh|gfedcba`).

mod blur;
mod crop;
mod denoise;
mod median;
mod resize;
mod rotation;

pub use blur::{gaussian_blur, gaussian_kernel, sigma_for_kernel};
pub use crop::crop;
pub use denoise::{
    bilateral_filter, denoise, DENOISE_DIAMETER, DENOISE_SIGMA_COLOR, DENOISE_SIGMA_SPACE,
};
pub use median::median_blur;
pub use resize::{resize, FilterType};
pub use rotation::rotate;

use thiserror::Error;

use crate::decode::{ImageBuffer, CHANNELS};

/// Errors produced by the transform functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The input has a zero dimension or no pixel data.
    #[error("Input image is empty")]
    EmptyInput,

    /// The input is not an 8-bit, 3-channel raster.
    #[error("Unsupported pixel format: expected 3 channels, got {channels}")]
    UnsupportedFormat { channels: u8 },

    /// The pixel data does not match the declared dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A crop rectangle is empty or reaches outside the image.
    #[error(
        "Crop region ({x}, {y}) {width}x{height} does not fit inside the {image_width}x{image_height} image"
    )]
    InvalidRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// A numeric parameter is out of range or has the wrong parity.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Check that `image` is something the transforms can read.
///
/// Zero-sized input is reported before the channel count so a default
/// constructed buffer reads as empty rather than foreign.
pub(crate) fn check_input(image: &ImageBuffer) -> Result<(), TransformError> {
    if image.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    if image.channels != CHANNELS {
        return Err(TransformError::UnsupportedFormat {
            channels: image.channels,
        });
    }
    let expected = image.pixel_count() * CHANNELS as usize;
    if image.pixels.len() != expected {
        return Err(TransformError::BufferSizeMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Largest kernel side accepted by [`gaussian_blur`] and [`median_blur`].
pub const MAX_KERNEL_SIZE: u32 = 4095;

/// Check that a filter kernel side is odd and within `1..=MAX_KERNEL_SIZE`.
pub(crate) fn check_kernel_size(kernel_size: u32) -> Result<(), TransformError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "kernel size must be a positive odd number, got {kernel_size}"
        )));
    }
    if kernel_size > MAX_KERNEL_SIZE {
        return Err(TransformError::InvalidParameter(format!(
            "kernel size must be at most {MAX_KERNEL_SIZE}, got {kernel_size}"
        )));
    }
    Ok(())
}

/// Check that the half-open region `[x, x + width) × [y, y + height)` is
/// non-empty and lies inside `image`.
pub(crate) fn check_region(
    image: &ImageBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<(), TransformError> {
    let fits = x < image.width
        && y < image.height
        && width >= 1
        && height >= 1
        && width <= image.width - x
        && height <= image.height - y;
    if fits {
        Ok(())
    } else {
        Err(TransformError::InvalidRegion {
            x,
            y,
            width,
            height,
            image_width: image.width,
            image_height: image.height,
        })
    }
}

/// Map a possibly out-of-range coordinate back inside `[0, len)` by
/// reflecting about the edge pixel.
#[inline]
pub(crate) fn reflect_101(pos: i64, len: usize) -> usize {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut p = pos.rem_euclid(period);
    if p >= len {
        p = period - p;
    }
    p as usize
}
