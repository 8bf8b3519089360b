//! WASM-compatible wrapper types and conversions.
//!
//! The core keeps pixels in BGR order; everything handed to JavaScript is a
//! fresh RGB copy so the page never sees the session buffer being replaced.

use imgproc_core::{ImageBuffer, ImageFormat, SessionError};
use wasm_bindgen::prelude::*;

/// An RGB snapshot of an image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns row-major RGB pixel data (stride = width * 3) as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Expand to RGBA with opaque alpha, ready for `new ImageData(...)`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            out.extend_from_slice(rgb);
            out.push(255);
        }
        out
    }
}

impl JsImage {
    pub(crate) fn from_buffer(image: &ImageBuffer) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.to_rgb_bytes(),
        }
    }
}

/// Parse a format name such as `"png"`, `"JPG"` or `".bmp"`.
pub(crate) fn parse_format(name: &str) -> Option<ImageFormat> {
    ImageFormat::from_extension(name.trim_start_matches('.'))
}

/// Convert a session error into a JS `Error` whose `name` is the error kind.
pub(crate) fn to_js_error(err: SessionError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.kind().as_str());
    js_err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_buffer_is_rgb() {
        // One pixel stored as B=10, G=20, R=30
        let buffer = ImageBuffer::new(1, 1, vec![10, 20, 30]);
        let img = JsImage::from_buffer(&buffer);
        assert_eq!(img.width(), 1);
        assert_eq!(img.height(), 1);
        assert_eq!(img.pixels(), vec![30, 20, 10]);
    }

    #[test]
    fn test_byte_length() {
        let buffer = ImageBuffer::filled(100, 50, [0, 0, 0]);
        let img = JsImage::from_buffer(&buffer);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_to_rgba() {
        let buffer = ImageBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let img = JsImage::from_buffer(&buffer);
        assert_eq!(img.to_rgba(), vec![3, 2, 1, 255, 6, 5, 4, 255]);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("png"), Some(ImageFormat::Png));
        assert_eq!(parse_format("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(parse_format(".jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(parse_format("bmp"), Some(ImageFormat::Bmp));
        assert_eq!(parse_format("gif"), None);
        assert_eq!(parse_format(""), None);
    }
}
