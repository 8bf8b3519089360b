//! Image cropping in pixel coordinates.
//!
//! The region is the half-open rectangle `[x, x + width) × [y, y + height)`.
//! Nothing is clamped: a region that is empty or reaches past the right or
//! bottom edge is an error, since the caller is expected to have bounded its
//! values already.

use tracing::debug;

use super::{check_input, check_region, TransformError};
use crate::decode::ImageBuffer;

/// Extract a rectangular region from an image.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `x` - Left edge of the region (0 to width - 1)
/// * `y` - Top edge of the region (0 to height - 1)
/// * `width` - Region width, at least 1
/// * `height` - Region height, at least 1
///
/// # Errors
///
/// Returns `TransformError::InvalidRegion` unless `x + width <= image.width`
/// and `y + height <= image.height` with both extents non-zero.
pub fn crop(
    image: &ImageBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<ImageBuffer, TransformError> {
    check_input(image)?;

    check_region(image, x, y, width, height)?;

    debug!(x, y, width, height, "crop");

    // Full crop returns a clone
    if x == 0 && y == 0 && width == image.width && height == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.stride();
    let row_bytes = width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * height as usize);

    // Rows are contiguous in both images, so copy a row at a time
    for row in y..y + height {
        let start = row as usize * src_stride + x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(ImageBuffer::new(width, height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
