//! Image rotation on a fixed canvas with bilinear interpolation.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source position lands on it and interpolate the four
//! surrounding source pixels.
//!
//! The pivot is the pixel `(width / 2, height / 2)` (integer division). For
//! a counter-clockwise angle θ in y-down image coordinates the inverse
//! transform is:
//! ```text
//! src_x = cx + (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ)
//! src_y = cy + (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ)
//! ```
//!
//! The output keeps the input dimensions. Content rotated past the canvas is
//! lost and uncovered corners are black.

use tracing::debug;

use super::{check_input, TransformError};
use crate::decode::ImageBuffer;

/// Rotate an image about its center, keeping the canvas size.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise).
///   Any finite value is accepted; whole turns are a no-op.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for a NaN or infinite angle.
pub fn rotate(image: &ImageBuffer, angle_degrees: f64) -> Result<ImageBuffer, TransformError> {
    check_input(image)?;

    if !angle_degrees.is_finite() {
        return Err(TransformError::InvalidParameter(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }

    debug!(angle_degrees, width = image.width, height = image.height, "rotate");

    // Fast path: whole turns leave every pixel in place
    if (angle_degrees % 360.0).abs() < 1e-9 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width, image.height);
    let cx = (w / 2) as f64;
    let cy = (h / 2) as f64;

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..h {
        let dy = dst_y as f64 - cy;
        for dst_x in 0..w {
            let dx = dst_x as f64 - cx;

            let src_x = cx + dx * cos - dy * sin;
            let src_y = cy + dx * sin + dy * cos;

            let pixel = sample_bilinear(image, src_x, src_y);
            let dst_idx = ((dst_y * w + dst_x) * 3) as usize;
            output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    Ok(ImageBuffer::new(w, h, output))
}

/// Sample a pixel using bilinear interpolation over a black surround.
///
/// Neighbors that fall outside the image contribute black, so edges fade
/// out smoothly instead of being cut along the pixel grid.
fn sample_bilinear(image: &ImageBuffer, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    // Entirely outside: no neighbor can contribute
    if x <= -1.0 || y <= -1.0 || x >= w as f64 || y >= h as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let fetch = |px: i64, py: i64| -> [f64; 3] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 3];
        }
        let [b, g, r] = image.pixel(px as u32, py as u32);
        [b as f64, g as f64, r as f64]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}
