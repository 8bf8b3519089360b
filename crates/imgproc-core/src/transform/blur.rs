//! Separable Gaussian smoothing.
//!
//! A `k x k` Gaussian is the outer product of a 1-D kernel with itself, so
//! the image is filtered once along rows and once along columns. The
//! intermediate pass is kept in `f32` so rounding happens only once.

use tracing::{debug, trace};

use super::{check_input, check_kernel_size, reflect_101, TransformError};
use crate::decode::ImageBuffer;

/// Standard deviation used for a kernel of side `kernel_size` when none is
/// given explicitly: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel_size: u32) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Build a normalized 1-D Gaussian kernel of odd length `kernel_size`.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for an even or zero size, or
/// one above [`MAX_KERNEL_SIZE`](super::MAX_KERNEL_SIZE).
pub fn gaussian_kernel(kernel_size: u32) -> Result<Vec<f32>, TransformError> {
    check_kernel_size(kernel_size)?;

    let radius = (kernel_size / 2) as i64;
    let sigma = sigma_for_kernel(kernel_size);
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }

    trace!(kernel_size, sigma, "gaussian kernel");
    Ok(weights.into_iter().map(|w| w as f32).collect())
}

/// Apply a `kernel_size x kernel_size` Gaussian blur.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `kernel_size` is zero,
/// even, or above [`MAX_KERNEL_SIZE`](super::MAX_KERNEL_SIZE). Normalizing
/// an even size is the caller's job.
pub fn gaussian_blur(
    image: &ImageBuffer,
    kernel_size: u32,
) -> Result<ImageBuffer, TransformError> {
    check_input(image)?;
    let kernel = gaussian_kernel(kernel_size)?;

    debug!(kernel_size, width = image.width, height = image.height, "gaussian blur");

    if kernel_size == 1 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let radius = (kernel.len() / 2) as i64;

    // Horizontal pass
    let mut rows = vec![0.0f32; w * h * 3];
    for y in 0..h {
        let row = &image.pixels[y * w * 3..(y + 1) * w * 3];
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect_101(x as i64 + k as i64 - radius, w);
                let src = &row[sx * 3..sx * 3 + 3];
                acc[0] += src[0] as f32 * weight;
                acc[1] += src[1] as f32 * weight;
                acc[2] += src[2] as f32 * weight;
            }
            let dst = (y * w + x) * 3;
            rows[dst..dst + 3].copy_from_slice(&acc);
        }
    }

    // Vertical pass
    let mut output = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = reflect_101(y as i64 + k as i64 - radius, h);
                let src = (sy * w + x) * 3;
                acc[0] += rows[src] * weight;
                acc[1] += rows[src + 1] * weight;
                acc[2] += rows[src + 2] * weight;
            }
            let dst = (y * w + x) * 3;
            for c in 0..3 {
                output[dst + c] = acc[c].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    Ok(ImageBuffer::new(image.width, image.height, output))
}
