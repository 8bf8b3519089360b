//! Raster decoding with EXIF orientation handling.
//!
//! PNG, JPEG and BMP are recognized by their content, not by a caller hint.
//! Any EXIF orientation tag is applied so the buffer matches what a viewer
//! would show.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{DecodeError, ImageBuffer, Orientation};
use crate::format::ImageFormat;

/// Decode a PNG, JPEG or BMP image from bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not one of the
/// supported formats, `DecodeError::CorruptedFile` if the decoder fails, and
/// `DecodeError::EmptyImage` if the raster has a zero dimension.
pub fn decode(bytes: &[u8]) -> Result<ImageBuffer, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader
        .format()
        .and_then(ImageFormat::from_image_format)
        .ok_or(DecodeError::InvalidFormat)?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    let orientation = get_orientation(bytes);
    debug!(?format, width, height, ?orientation, "decoded image");

    let oriented = apply_orientation(img, orientation);
    Ok(ImageBuffer::from_rgb_image(oriented.into_rgb8()))
}

/// Read and decode an image file.
///
/// The extension must name a supported format; the content is still sniffed,
/// so a PNG saved as `.jpg` decodes correctly.
pub fn decode_file(path: &Path) -> Result<ImageBuffer, DecodeError> {
    if ImageFormat::from_path(path).is_none() {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        return Err(DecodeError::UnsupportedExtension(ext));
    }

    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    decode(&bytes)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
