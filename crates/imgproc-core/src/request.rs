//! Transform requests as plain data.
//!
//! A [`TransformRequest`] is what a UI builds from the numbers it collected.
//! It carries no validation of its own; [`crate::validate`] checks it
//! against the current image before [`TransformRequest::execute`] runs it.

use serde::{Deserialize, Serialize};

use crate::decode::ImageBuffer;
use crate::transform::{self, FilterType, TransformError};

/// One transform to apply to the session's image.
///
/// Serialized with an internal `type` tag, e.g.
/// `{ "type": "crop", "x": 10, "y": 10, "width": 50, "height": 50 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformRequest {
    /// Stretch to exactly `width x height` pixels.
    Resize { width: u32, height: u32 },
    /// Keep only `[x, x + width) × [y, y + height)`.
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Rotate about the center, counter-clockwise for positive angles.
    Rotate {
        #[serde(alias = "angle")]
        angle_degrees: f64,
    },
    /// Gaussian smoothing with a square kernel.
    GaussianBlur { kernel_size: u32 },
    /// Median filter with a square window.
    MedianBlur { kernel_size: u32 },
    /// Edge-preserving noise reduction with fixed settings.
    Denoise,
}

impl TransformRequest {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TransformRequest::Resize { .. } => "resize",
            TransformRequest::Crop { .. } => "crop",
            TransformRequest::Rotate { .. } => "rotate",
            TransformRequest::GaussianBlur { .. } => "gaussian_blur",
            TransformRequest::MedianBlur { .. } => "median_blur",
            TransformRequest::Denoise => "denoise",
        }
    }

    /// Run the transform this request names on `image`.
    ///
    /// Parameters are passed through unchanged, so an unnormalized request
    /// (an even kernel, say) fails here rather than being adjusted.
    pub fn execute(&self, image: &ImageBuffer) -> Result<ImageBuffer, TransformError> {
        match *self {
            TransformRequest::Resize { width, height } => {
                transform::resize(image, width, height, FilterType::Bilinear)
            }
            TransformRequest::Crop {
                x,
                y,
                width,
                height,
            } => transform::crop(image, x, y, width, height),
            TransformRequest::Rotate { angle_degrees } => transform::rotate(image, angle_degrees),
            TransformRequest::GaussianBlur { kernel_size } => {
                transform::gaussian_blur(image, kernel_size)
            }
            TransformRequest::MedianBlur { kernel_size } => {
                transform::median_blur(image, kernel_size)
            }
            TransformRequest::Denoise => transform::denoise(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(TransformRequest::Denoise.name(), "denoise");
        assert_eq!(
            TransformRequest::GaussianBlur { kernel_size: 3 }.name(),
            "gaussian_blur"
        );
    }

    #[test]
    fn test_execute_dispatches() {
        let img = ImageBuffer::filled(20, 10, [1, 2, 3]);

        let out = TransformRequest::Resize {
            width: 5,
            height: 40,
        }
        .execute(&img)
        .unwrap();
        assert_eq!((out.width, out.height), (5, 40));

        let out = TransformRequest::Crop {
            x: 2,
            y: 3,
            width: 4,
            height: 5,
        }
        .execute(&img)
        .unwrap();
        assert_eq!((out.width, out.height), (4, 5));

        for request in [
            TransformRequest::Rotate { angle_degrees: 30.0 },
            TransformRequest::GaussianBlur { kernel_size: 3 },
            TransformRequest::MedianBlur { kernel_size: 3 },
            TransformRequest::Denoise,
        ] {
            let out = request.execute(&img).unwrap();
            assert_eq!((out.width, out.height), (20, 10), "{}", request.name());
        }
    }

    #[test]
    fn test_execute_does_not_normalize() {
        let img = ImageBuffer::filled(8, 8, [0, 0, 0]);
        let result = TransformRequest::MedianBlur { kernel_size: 4 }.execute(&img);
        assert!(matches!(result, Err(TransformError::InvalidParameter(_))));
    }
}
