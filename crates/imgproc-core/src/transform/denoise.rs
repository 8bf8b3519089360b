//! Edge-preserving noise reduction with a bilateral filter.
//!
//! Each neighbor in a circular window is weighted by two Gaussians: one on
//! its distance from the center pixel, one on how different its color is.
//! Flat regions get averaged while pixels across an edge barely contribute,
//! so edges stay sharp.
//!
//! Color difference is the sum of absolute per-channel differences, which
//! keeps the three channels of a pixel moving together.

use tracing::{debug, trace};

use super::{check_input, reflect_101, TransformError};
use crate::decode::ImageBuffer;

/// Neighborhood diameter used by [`denoise`].
pub const DENOISE_DIAMETER: u32 = 9;
/// Color standard deviation used by [`denoise`].
pub const DENOISE_SIGMA_COLOR: f64 = 75.0;
/// Spatial standard deviation used by [`denoise`].
pub const DENOISE_SIGMA_SPACE: f64 = 75.0;

/// Largest possible summed absolute difference between two 8-bit BGR pixels.
const MAX_COLOR_DISTANCE: usize = 255 * 3;

/// Reduce noise while keeping edges, with fixed filter settings.
///
/// Equivalent to `bilateral_filter(image, 9, 75.0, 75.0)`.
pub fn denoise(image: &ImageBuffer) -> Result<ImageBuffer, TransformError> {
    bilateral_filter(
        image,
        DENOISE_DIAMETER,
        DENOISE_SIGMA_COLOR,
        DENOISE_SIGMA_SPACE,
    )
}

/// Apply a bilateral filter.
///
/// # Arguments
///
/// * `image` - Source image
/// * `diameter` - Width of the circular neighborhood in pixels (at least 1)
/// * `sigma_color` - Standard deviation of the color-similarity Gaussian
/// * `sigma_space` - Standard deviation of the distance Gaussian
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `diameter` is zero or a
/// sigma is not a positive finite number.
pub fn bilateral_filter(
    image: &ImageBuffer,
    diameter: u32,
    sigma_color: f64,
    sigma_space: f64,
) -> Result<ImageBuffer, TransformError> {
    check_input(image)?;

    if diameter == 0 {
        return Err(TransformError::InvalidParameter(
            "bilateral diameter must be at least 1".into(),
        ));
    }
    for (name, sigma) in [("sigma_color", sigma_color), ("sigma_space", sigma_space)] {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(TransformError::InvalidParameter(format!(
                "{name} must be positive, got {sigma}"
            )));
        }
    }

    debug!(
        diameter,
        sigma_color,
        sigma_space,
        width = image.width,
        height = image.height,
        "bilateral filter"
    );

    let radius = (diameter / 2) as i64;

    // Color weights depend only on the summed difference, so tabulate them
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let color_weights: Vec<f32> = (0..=MAX_COLOR_DISTANCE)
        .map(|d| ((d * d) as f64 * color_coeff).exp() as f32)
        .collect();

    // Circular window: (dx, dy, spatial weight)
    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f64;
            if r2.sqrt() > radius as f64 {
                continue;
            }
            offsets.push((dx, dy, (r2 * space_coeff).exp() as f32));
        }
    }
    trace!(taps = offsets.len(), "bilateral window");

    let (w, h) = (image.width as usize, image.height as usize);
    let mut output = vec![0u8; w * h * 3];

    for y in 0..h {
        for x in 0..w {
            let center_idx = (y * w + x) * 3;
            let center = &image.pixels[center_idx..center_idx + 3];

            let mut sum = [0.0f32; 3];
            let mut weight_sum = 0.0f32;

            for &(dx, dy, space_weight) in &offsets {
                let sx = reflect_101(x as i64 + dx, w);
                let sy = reflect_101(y as i64 + dy, h);
                let idx = (sy * w + sx) * 3;
                let neighbor = &image.pixels[idx..idx + 3];

                let distance = neighbor
                    .iter()
                    .zip(center)
                    .map(|(&a, &b)| a.abs_diff(b) as usize)
                    .sum::<usize>();
                let weight = space_weight * color_weights[distance];

                sum[0] += neighbor[0] as f32 * weight;
                sum[1] += neighbor[1] as f32 * weight;
                sum[2] += neighbor[2] as f32 * weight;
                weight_sum += weight;
            }

            // The center tap always has weight 1, so weight_sum > 0
            for c in 0..3 {
                output[center_idx + c] = (sum[c] / weight_sum).clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    Ok(ImageBuffer::new(image.width, image.height, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_util::gradient_image;

    fn step_image(width: u32, height: u32, low: u8, high: u8) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _y in 0..height {
            for x in 0..width {
                let v = if x < width / 2 { low } else { high };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        ImageBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_denoise_keeps_dimensions() {
        let img = gradient_image(30, 20);
        let result = denoise(&img).unwrap();
        assert_eq!((result.width, result.height), (30, 20));
        assert!(result.is_well_formed());
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        let img = ImageBuffer::filled(12, 12, [33, 66, 99]);
        assert_eq!(denoise(&img).unwrap(), img);
    }

    #[test]
    fn test_strong_edge_is_preserved() {
        // A 0 -> 255 step is far beyond the color sigma
        let img = step_image(20, 10, 0, 255);
        let result = denoise(&img).unwrap();

        assert!(result.pixel(9, 5)[0] < 5, "dark side stays dark");
        assert!(result.pixel(10, 5)[0] > 250, "bright side stays bright");
    }

    #[test]
    fn test_weak_edge_is_smoothed() {
        // A small step falls inside the color sigma and gets blended
        let img = step_image(20, 10, 100, 120);
        let result = denoise(&img).unwrap();

        let left = result.pixel(9, 5)[0];
        let right = result.pixel(10, 5)[0];
        assert!(left > 100 && right < 120, "got {} / {}", left, right);
    }

    #[test]
    fn test_diameter_one_is_identity() {
        let img = gradient_image(8, 8);
        assert_eq!(bilateral_filter(&img, 1, 75.0, 75.0).unwrap(), img);
    }

    #[test]
    fn test_invalid_parameters() {
        let img = gradient_image(8, 8);
        assert!(bilateral_filter(&img, 0, 75.0, 75.0).is_err());
        assert!(bilateral_filter(&img, 9, 0.0, 75.0).is_err());
        assert!(bilateral_filter(&img, 9, 75.0, f64::NAN).is_err());
    }

    #[test]
    fn test_tiny_image() {
        let img = ImageBuffer::new(1, 1, vec![1, 2, 3]);
        assert_eq!(denoise(&img).unwrap(), img);
    }
}
