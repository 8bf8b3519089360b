//! Core types for image decoding.

use thiserror::Error;

/// Number of interleaved samples per pixel in an [`ImageBuffer`].
pub const CHANNELS: u8 = 3;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a PNG, JPEG or BMP file.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The file extension does not name a supported format.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to a zero-sized raster.
    #[error("Image has zero dimensions ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An in-memory 8-bit raster in BGR sample order.
///
/// Pixels are stored row-major with no padding, so a well-formed buffer
/// holds exactly `width * height * channels` bytes. Every decoder and
/// transform in this crate produces 3-channel buffers; `channels` is kept
/// as a field so foreign data can be rejected instead of misread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel.
    pub channels: u8,
    /// BGR pixel data in row-major order.
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a 3-channel BGR buffer from raw pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels: CHANNELS,
            pixels,
        }
    }

    /// Create a buffer where every pixel has the given BGR value.
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&bgr);
        }
        Self::new(width, height, pixels)
    }

    /// Create a buffer from an RGB image, reordering samples to BGR.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let mut pixels = img.into_raw();
        swap_red_blue(&mut pixels);
        Self::new(width, height, pixels)
    }

    /// Convert to an RGB image for encoding.
    ///
    /// Returns `None` when the buffer is not a well-formed 3-channel raster.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        if !self.is_well_formed() {
            return None;
        }
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb_bytes())
    }

    /// Copy the pixels out in RGB order with a stride of `width * 3`.
    ///
    /// This is the representation a viewport paints from. It is always a
    /// fresh allocation, never a view into this buffer.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = self.pixels.clone();
        if self.channels == CHANNELS {
            swap_red_blue(&mut rgb);
        }
        rgb
    }

    /// Read the BGR sample triple at `(x, y)`.
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Non-empty, 3 channels, and exactly as many bytes as the dimensions imply.
    pub fn is_well_formed(&self) -> bool {
        !self.is_empty()
            && self.channels == CHANNELS
            && self.pixels.len() == self.stride() * self.height as usize
    }
}

fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_image_buffer_creation() {
        let img = ImageBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.channels, 3);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.pixels.len(), 15000);
        assert_eq!(img.stride(), 300);
        assert!(!img.is_empty());
        assert!(img.is_well_formed());
    }

    #[test]
    fn test_image_buffer_empty() {
        let img = ImageBuffer::new(0, 0, vec![]);
        assert!(img.is_empty());
        assert!(!img.is_well_formed());
    }

    #[test]
    fn test_foreign_channel_count_is_not_well_formed() {
        let img = ImageBuffer {
            width: 2,
            height: 2,
            channels: 4,
            pixels: vec![0u8; 16],
        };
        assert!(!img.is_well_formed());
        assert!(img.to_rgb_image().is_none());
    }

    #[test]
    fn test_from_rgb_image_reorders_to_bgr() {
        let rgb = image::RgbImage::from_raw(1, 1, vec![10, 20, 30]).unwrap();
        let img = ImageBuffer::from_rgb_image(rgb);
        assert_eq!(img.pixels, vec![30, 20, 10]);
        assert_eq!(img.pixel(0, 0), [30, 20, 10]);
    }

    #[test]
    fn test_rgb_bytes_are_a_copy_in_rgb_order() {
        let img = ImageBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let rgb = img.to_rgb_bytes();
        assert_eq!(rgb, vec![3, 2, 1, 6, 5, 4]);
        // Source untouched
        assert_eq!(img.pixels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_to_rgb_image_round_trip() {
        let img = ImageBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [3, 2, 1]);
        assert_eq!(ImageBuffer::from_rgb_image(rgb), img);
    }

    #[test]
    fn test_filled() {
        let img = ImageBuffer::filled(3, 2, [7, 8, 9]);
        assert_eq!(img.pixels.len(), 18);
        assert!(img.pixels.chunks(3).all(|px| px == [7, 8, 9]));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedExtension("gif".to_string());
        assert_eq!(err.to_string(), "Unsupported file extension: gif");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
