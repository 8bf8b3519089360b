//! Parameter validation and normalization.
//!
//! Requests are checked against the image they will run on, not against
//! fixed ranges alone: a crop that fits a 100x100 image is out of bounds on
//! a 50x50 one.
//!
//! Two policies apply:
//! - Kernel sizes are normalized: an even size is bumped to the next odd one.
//! - Explicit coordinates and sizes are rejected when out of range. Only the
//!   defaults a UI offers ([`suggest_resize`], [`suggest_crop`],
//!   [`clamp_crop`]) are clamped into range.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decode::ImageBuffer;
use crate::request::TransformRequest;
use crate::transform::{check_region, TransformError};

/// Sanity bounds for user-supplied transform parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformLimits {
    /// Largest width or height a resize may produce.
    pub max_dimension: u32,
    /// Largest kernel side for the blur filters, after normalization.
    pub max_kernel_size: u32,
    /// Largest rotation magnitude in degrees.
    pub max_angle_degrees: f64,
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            max_dimension: 10_000,
            max_kernel_size: 31,
            max_angle_degrees: 360.0,
        }
    }
}

impl TransformLimits {
    /// Check `request` against `image` and return the normalized request.
    ///
    /// # Errors
    ///
    /// - `InvalidRegion` for a crop that is empty or leaves the image
    /// - `InvalidParameter` for resize sizes outside `1..=max_dimension`,
    ///   a non-finite or too large angle, or a kernel outside
    ///   `1..=max_kernel_size`
    pub fn validate(
        &self,
        request: &TransformRequest,
        image: &ImageBuffer,
    ) -> Result<TransformRequest, TransformError> {
        let result = self.check(request, image);
        if let Err(err) = &result {
            warn!(request = request.name(), %err, "rejected transform request");
        }
        result
    }

    fn check(
        &self,
        request: &TransformRequest,
        image: &ImageBuffer,
    ) -> Result<TransformRequest, TransformError> {
        match *request {
            TransformRequest::Resize { width, height } => {
                for (name, value) in [("width", width), ("height", height)] {
                    if value == 0 || value > self.max_dimension {
                        return Err(TransformError::InvalidParameter(format!(
                            "resize {name} must be between 1 and {}, got {value}",
                            self.max_dimension
                        )));
                    }
                }
                Ok(request.clone())
            }
            TransformRequest::Crop {
                x,
                y,
                width,
                height,
            } => {
                check_region(image, x, y, width, height)?;
                Ok(request.clone())
            }
            TransformRequest::Rotate { angle_degrees } => {
                if !angle_degrees.is_finite() || angle_degrees.abs() > self.max_angle_degrees {
                    return Err(TransformError::InvalidParameter(format!(
                        "rotation angle must be within ±{} degrees, got {angle_degrees}",
                        self.max_angle_degrees
                    )));
                }
                Ok(request.clone())
            }
            TransformRequest::GaussianBlur { kernel_size } => Ok(TransformRequest::GaussianBlur {
                kernel_size: self.kernel_size(kernel_size)?,
            }),
            TransformRequest::MedianBlur { kernel_size } => Ok(TransformRequest::MedianBlur {
                kernel_size: self.kernel_size(kernel_size)?,
            }),
            TransformRequest::Denoise => Ok(TransformRequest::Denoise),
        }
    }

    /// Normalize a kernel size to odd and check it against the bounds.
    pub fn kernel_size(&self, kernel_size: u32) -> Result<u32, TransformError> {
        if kernel_size == 0 {
            return Err(TransformError::InvalidParameter(
                "kernel size must be at least 1".into(),
            ));
        }
        let normalized = normalize_kernel_size(kernel_size);
        if normalized > self.max_kernel_size {
            return Err(TransformError::InvalidParameter(format!(
                "kernel size must be at most {}, got {kernel_size}",
                self.max_kernel_size
            )));
        }
        Ok(normalized)
    }
}

/// Round an even kernel size up to the next odd value.
#[inline]
pub fn normalize_kernel_size(kernel_size: u32) -> u32 {
    if kernel_size % 2 == 0 {
        kernel_size.saturating_add(1)
    } else {
        kernel_size
    }
}

/// Default resize target offered to the user: the current size, clamped
/// into `1..=max_dimension`.
pub fn suggest_resize(image: &ImageBuffer, limits: &TransformLimits) -> TransformRequest {
    let max = limits.max_dimension.max(1);
    TransformRequest::Resize {
        width: image.width.clamp(1, max),
        height: image.height.clamp(1, max),
    }
}

/// Default crop offered once the user has picked a top-left corner: the
/// corner is clamped into the image and the region extends to the
/// bottom-right edge.
pub fn suggest_crop(image: &ImageBuffer, x: u32, y: u32) -> TransformRequest {
    let x = x.min(image.width.saturating_sub(1));
    let y = y.min(image.height.saturating_sub(1));
    TransformRequest::Crop {
        x,
        y,
        width: image.width.saturating_sub(x).max(1),
        height: image.height.saturating_sub(y).max(1),
    }
}

/// Clamp crop values the way bounded input prompts do: `x` into
/// `0..width`, then `w` into `1..=width - x` (likewise for `y`/`h`).
///
/// The result always fits a non-empty image.
pub fn clamp_crop(
    image: &ImageBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> TransformRequest {
    let x = x.min(image.width.saturating_sub(1));
    let y = y.min(image.height.saturating_sub(1));
    TransformRequest::Crop {
        x,
        y,
        width: width.clamp(1, image.width.saturating_sub(x).max(1)),
        height: height.clamp(1, image.height.saturating_sub(y).max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> ImageBuffer {
        ImageBuffer::filled(width, height, [0, 0, 0])
    }

    fn limits() -> TransformLimits {
        TransformLimits::default()
    }

    #[test]
    fn test_defaults() {
        let l = limits();
        assert_eq!(l.max_dimension, 10_000);
        assert_eq!(l.max_kernel_size, 31);
        assert_eq!(l.max_angle_degrees, 360.0);
    }

    #[test]
    fn test_even_kernel_rounds_up() {
        let img = image(10, 10);
        let out = limits()
            .validate(&TransformRequest::GaussianBlur { kernel_size: 4 }, &img)
            .unwrap();
        assert_eq!(out, TransformRequest::GaussianBlur { kernel_size: 5 });

        let out = limits()
            .validate(&TransformRequest::MedianBlur { kernel_size: 30 }, &img)
            .unwrap();
        assert_eq!(out, TransformRequest::MedianBlur { kernel_size: 31 });
    }

    #[test]
    fn test_odd_kernel_unchanged() {
        let img = image(10, 10);
        let out = limits()
            .validate(&TransformRequest::GaussianBlur { kernel_size: 7 }, &img)
            .unwrap();
        assert_eq!(out, TransformRequest::GaussianBlur { kernel_size: 7 });
    }

    #[test]
    fn test_kernel_bounds() {
        let l = limits();
        assert!(l.kernel_size(0).is_err());
        assert_eq!(l.kernel_size(1), Ok(1));
        assert_eq!(l.kernel_size(31), Ok(31));
        assert!(l.kernel_size(32).is_err());
        assert!(l.kernel_size(u32::MAX).is_err());
    }

    #[test]
    fn test_resize_bounds_are_rejected_not_clamped() {
        let img = image(10, 10);
        let l = limits();
        for (w, h) in [(0, 10), (10, 0), (10_001, 10), (10, 10_001)] {
            let result = l.validate(&TransformRequest::Resize { width: w, height: h }, &img);
            assert!(
                matches!(result, Err(TransformError::InvalidParameter(_))),
                "{}x{} should be rejected",
                w,
                h
            );
        }
        assert!(l
            .validate(&TransformRequest::Resize { width: 10_000, height: 1 }, &img)
            .is_ok());
    }

    #[test]
    fn test_crop_region_checked_against_current_image() {
        let l = limits();
        let request = TransformRequest::Crop {
            x: 60,
            y: 60,
            width: 30,
            height: 30,
        };
        assert!(l.validate(&request, &image(100, 100)).is_ok());
        assert!(matches!(
            l.validate(&request, &image(50, 50)),
            Err(TransformError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_crop_x_equal_to_width_is_rejected() {
        let request = TransformRequest::Crop {
            x: 10,
            y: 0,
            width: 1,
            height: 1,
        };
        assert!(matches!(
            limits().validate(&request, &image(10, 10)),
            Err(TransformError::InvalidRegion { x: 10, .. })
        ));
    }

    #[test]
    fn test_crop_overflowing_extent_is_rejected() {
        let request = TransformRequest::Crop {
            x: 5,
            y: 5,
            width: u32::MAX,
            height: 1,
        };
        assert!(limits().validate(&request, &image(10, 10)).is_err());
    }

    #[test]
    fn test_angle_bounds() {
        let img = image(4, 4);
        let l = limits();
        for angle in [-360.0, -90.5, 0.0, 45.0, 360.0] {
            assert!(l
                .validate(&TransformRequest::Rotate { angle_degrees: angle }, &img)
                .is_ok());
        }
        for angle in [-360.1, 400.0, f64::NAN, f64::NEG_INFINITY] {
            assert!(matches!(
                l.validate(&TransformRequest::Rotate { angle_degrees: angle }, &img),
                Err(TransformError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_denoise_always_valid() {
        assert_eq!(
            limits().validate(&TransformRequest::Denoise, &image(1, 1)),
            Ok(TransformRequest::Denoise)
        );
    }

    #[test]
    fn test_suggest_resize_is_current_size() {
        assert_eq!(
            suggest_resize(&image(640, 480), &limits()),
            TransformRequest::Resize {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn test_suggest_resize_clamps_to_limit() {
        let l = TransformLimits {
            max_dimension: 100,
            ..Default::default()
        };
        assert_eq!(
            suggest_resize(&image(640, 50), &l),
            TransformRequest::Resize {
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_suggest_crop_extends_to_edge() {
        assert_eq!(
            suggest_crop(&image(100, 80), 10, 20),
            TransformRequest::Crop {
                x: 10,
                y: 20,
                width: 90,
                height: 60
            }
        );
    }

    #[test]
    fn test_suggest_crop_clamps_corner() {
        assert_eq!(
            suggest_crop(&image(100, 80), 500, 500),
            TransformRequest::Crop {
                x: 99,
                y: 79,
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn test_clamp_crop_always_validates() {
        let img = image(30, 20);
        for (x, y, w, h) in [(0, 0, 0, 0), (29, 19, 100, 100), (100, 100, 5, 5), (5, 5, 10, 10)] {
            let request = clamp_crop(&img, x, y, w, h);
            assert!(limits().validate(&request, &img).is_ok(), "{:?}", request);
        }
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        // Missing fields fall back to the defaults
        let l: TransformLimits = serde::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                [("max_kernel_size", 15u32)].into_iter(),
            ),
        )
        .unwrap();
        assert_eq!(l.max_kernel_size, 15);
        assert_eq!(l.max_dimension, 10_000);
    }
}
