//! Median filtering.
//!
//! Each output sample is the median of the `k x k` window of the same
//! channel around it. Unlike a Gaussian, the median removes isolated
//! outliers (salt-and-pepper noise) without smearing step edges.

use tracing::debug;

use super::{check_input, check_kernel_size, reflect_101, TransformError};
use crate::decode::ImageBuffer;

/// Apply a `kernel_size x kernel_size` median filter to each channel.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `kernel_size` is zero, even,
/// or larger than [`MAX_KERNEL_SIZE`](super::MAX_KERNEL_SIZE).
pub fn median_blur(image: &ImageBuffer, kernel_size: u32) -> Result<ImageBuffer, TransformError> {
    check_input(image)?;
    check_kernel_size(kernel_size)?;

    debug!(kernel_size, width = image.width, height = image.height, "median blur");

    if kernel_size == 1 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let radius = (kernel_size / 2) as i64;
    let side = kernel_size as usize;
    let count = side.checked_mul(side).ok_or_else(|| {
        TransformError::InvalidParameter(format!("kernel size {kernel_size} is too large"))
    })?;
    let mid = count / 2;

    let mut output = vec![0u8; w * h * 3];
    let mut window: [Vec<u8>; 3] = [
        Vec::with_capacity(count),
        Vec::with_capacity(count),
        Vec::with_capacity(count),
    ];

    for y in 0..h {
        for x in 0..w {
            for values in &mut window {
                values.clear();
            }

            for ky in -radius..=radius {
                let sy = reflect_101(y as i64 + ky, h);
                for kx in -radius..=radius {
                    let sx = reflect_101(x as i64 + kx, w);
                    let src = (sy * w + sx) * 3;
                    for (c, values) in window.iter_mut().enumerate() {
                        values.push(image.pixels[src + c]);
                    }
                }
            }

            let dst = (y * w + x) * 3;
            for (c, values) in window.iter_mut().enumerate() {
                let (_, median, _) = values.select_nth_unstable(mid);
                output[dst + c] = *median;
            }
        }
    }

    Ok(ImageBuffer::new(image.width, image.height, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_util::gradient_image;

    #[test]
    fn test_kernel_one_is_identity() {
        let img = gradient_image(9, 7);
        assert_eq!(median_blur(&img, 1).unwrap(), img);
    }

    #[test]
    fn test_even_kernel_is_rejected() {
        let img = gradient_image(9, 7);
        assert!(matches!(
            median_blur(&img, 2),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_oversized_kernel_is_rejected() {
        let img = ImageBuffer::filled(1, 1, [1, 2, 3]);
        assert!(matches!(
            median_blur(&img, 65_537),
            Err(TransformError::InvalidParameter(_))
        ));
        assert!(matches!(
            median_blur(&img, u32::MAX),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_removes_isolated_outlier() {
        let mut img = ImageBuffer::filled(9, 9, [40, 80, 120]);
        let idx = (4 * 9 + 4) * 3;
        img.pixels[idx..idx + 3].copy_from_slice(&[255, 0, 255]);

        let result = median_blur(&img, 3).unwrap();
        assert_eq!(result.pixel(4, 4), [40, 80, 120]);
    }

    #[test]
    fn test_preserves_step_edge() {
        // Left half dark, right half bright
        let mut pixels = Vec::new();
        for _y in 0..10 {
            for x in 0..10 {
                let v = if x < 5 { 0 } else { 200 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let img = ImageBuffer::new(10, 10, pixels);

        let result = median_blur(&img, 3).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_channels_are_independent() {
        // Window of 3 pixels in a 3x1 strip: medians taken per channel
        let img = ImageBuffer::new(3, 1, vec![10, 200, 5, 20, 100, 6, 30, 0, 7]);
        let result = median_blur(&img, 3).unwrap();
        // Center pixel sees all three (plus reflections of the outer two)
        assert_eq!(result.pixel(1, 0), [20, 100, 6]);
    }

    #[test]
    fn test_rejects_foreign_format() {
        let img = ImageBuffer {
            width: 2,
            height: 2,
            channels: 4,
            pixels: vec![0; 16],
        };
        assert_eq!(
            median_blur(&img, 3),
            Err(TransformError::UnsupportedFormat { channels: 4 })
        );
    }
}
