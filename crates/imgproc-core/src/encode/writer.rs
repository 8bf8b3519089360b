//! Encoding through the `image` crate's codecs.
//!
//! Buffers are BGR in memory; samples are reordered to RGB on the way out so
//! files on disk carry conventional channel order.

use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::{ImageBuffer, CHANNELS};
use crate::format::ImageFormat;

/// Errors that can occur while encoding or saving an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The buffer is not 3-channel
    #[error("Unsupported pixel format: expected 3 channels, got {channels}")]
    UnsupportedPixelFormat { channels: u8 },

    /// The target path has no supported extension
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Codec settings for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// JPEG quality (1-100, where 100 is highest quality). Ignored for
    /// lossless formats.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { jpeg_quality: 95 }
    }
}

/// Encode an image to the bytes of the given file format.
///
/// # Errors
///
/// Returns an error if the buffer is empty, not 3-channel, has a pixel
/// length that doesn't match its dimensions, or the codec fails.
pub fn encode(
    image: &ImageBuffer,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    if image.channels != CHANNELS {
        return Err(EncodeError::UnsupportedPixelFormat {
            channels: image.channels,
        });
    }
    let expected = image.pixel_count() * CHANNELS as usize;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let rgb = image.to_rgb_bytes();
    let mut buffer = Cursor::new(Vec::new());
    let (width, height) = (image.width, image.height);

    match format {
        ImageFormat::Png => write_with(PngEncoder::new(&mut buffer), &rgb, width, height)?,
        ImageFormat::Jpeg => {
            // Clamp quality to valid range (1-100)
            let quality = options.jpeg_quality.clamp(1, 100);
            write_with(
                JpegEncoder::new_with_quality(&mut buffer, quality),
                &rgb,
                width,
                height,
            )?
        }
        ImageFormat::Bmp => write_with(BmpEncoder::new(&mut buffer), &rgb, width, height)?,
    }

    let bytes = buffer.into_inner();
    debug!(?format, width, height, size = bytes.len(), "encoded image");
    Ok(bytes)
}

/// Encode an image and write it to `path`.
///
/// The format comes from the path's extension (`png`, `jpg`, `jpeg`, `bmp`).
pub fn encode_file(
    image: &ImageBuffer,
    path: &Path,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        EncodeError::UnsupportedFormat(
            path.extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string(),
        )
    })?;

    let bytes = encode(image, format, options)?;
    std::fs::write(path, bytes).map_err(|e| EncodeError::IoError(e.to_string()))
}

fn write_with<E: ImageEncoder>(
    encoder: E,
    rgb: &[u8],
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    encoder
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}
