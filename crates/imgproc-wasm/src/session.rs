//! WASM bindings for the editing session.
//!
//! A page holds one [`JsSession`], feeds it file bytes, applies transforms
//! as the user confirms each dialog, and repaints from `display_image()`.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//!
//! session.apply({ type: 'crop', x: 10, y: 10, width: 50, height: 50 });
//! session.gaussian_blur(4); // bumped to 5
//!
//! try {
//!   session.crop(session.width, 0, 1, 1);
//! } catch (e) {
//!   console.log(e.name); // "InvalidRegion"
//! }
//!
//! const png = session.encode('png');
//! ```

use imgproc_core::{
    suggest_crop, suggest_resize, EncodeError, EncodeOptions, Session, SessionError,
    TransformRequest,
};
use wasm_bindgen::prelude::*;

use crate::types::{parse_format, to_js_error, JsImage};

/// The current image plus the operations that replace it.
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

impl Default for JsSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsSession {
    /// Create an empty session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsSession {
        JsSession {
            inner: Session::new(),
        }
    }

    /// Whether an image is loaded.
    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Width of the current image, or 0 when empty.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.image().map_or(0, |img| img.width)
    }

    /// Height of the current image, or 0 when empty.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.image().map_or(0, |img| img.height)
    }

    /// Decode PNG, JPEG or BMP bytes and make them the current image.
    ///
    /// # Errors
    ///
    /// Throws an `Error` named `DecodeError` if the bytes cannot be decoded;
    /// the previous image (if any) is kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(to_js_error)?;
        Ok(())
    }

    /// Apply a transform described by a tagged object, e.g.
    /// `{ type: 'rotate', angle_degrees: 45 }`.
    pub fn apply(&mut self, request: JsValue) -> Result<(), JsValue> {
        let request: TransformRequest = serde_wasm_bindgen::from_value(request)?;
        self.run(request)
    }

    /// Stretch to exactly `width x height` pixels (each 1..=10000).
    ///
    /// Throws `InvalidParameter` for a size out of range.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.run(TransformRequest::Resize { width, height })
    }

    /// Keep the region `[x, x + width) × [y, y + height)`.
    ///
    /// Throws `InvalidRegion` if the region is empty or leaves the image;
    /// nothing is clamped.
    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<(), JsValue> {
        self.run(TransformRequest::Crop {
            x,
            y,
            width,
            height,
        })
    }

    /// Rotate counter-clockwise about the center; corners fill with black.
    pub fn rotate(&mut self, angle_degrees: f64) -> Result<(), JsValue> {
        self.run(TransformRequest::Rotate { angle_degrees })
    }

    /// Gaussian blur; even sizes are bumped to the next odd value.
    pub fn gaussian_blur(&mut self, kernel_size: u32) -> Result<(), JsValue> {
        self.run(TransformRequest::GaussianBlur { kernel_size })
    }

    /// Median blur; even sizes are bumped to the next odd value.
    pub fn median_blur(&mut self, kernel_size: u32) -> Result<(), JsValue> {
        self.run(TransformRequest::MedianBlur { kernel_size })
    }

    /// Edge-preserving noise reduction (bilateral, diameter 9, sigmas 75).
    pub fn denoise(&mut self) -> Result<(), JsValue> {
        self.run(TransformRequest::Denoise)
    }

    /// RGB copy of the current image for painting, or `undefined` when empty.
    pub fn display_image(&self) -> Option<JsImage> {
        self.inner.image().map(JsImage::from_buffer)
    }

    /// Row-major RGB bytes of the current image, or `undefined` when empty.
    pub fn display_pixels(&self) -> Option<Vec<u8>> {
        self.inner.display_rgb()
    }

    /// Encode the current image as `png`, `jpg`/`jpeg` or `bmp`.
    ///
    /// `quality` only affects JPEG output and defaults to 95.
    pub fn encode(&self, format: &str, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        let format = parse_format(format).ok_or_else(|| {
            to_js_error(SessionError::Encode(EncodeError::UnsupportedFormat(
                format.to_string(),
            )))
        })?;
        let mut options = EncodeOptions::default();
        if let Some(quality) = quality {
            options.jpeg_quality = quality;
        }
        self.inner.encode(format, &options).map_err(to_js_error)
    }

    /// Default values for the resize dialog: `{ type: 'resize', width, height }`.
    pub fn suggest_resize(&self) -> Result<JsValue, JsValue> {
        let image = self
            .inner
            .image()
            .ok_or_else(|| to_js_error(SessionError::NoImageLoaded))?;
        let request = suggest_resize(image, self.inner.limits());
        Ok(serde_wasm_bindgen::to_value(&request)?)
    }

    /// Default crop once the user picked a corner: the rest of the image.
    pub fn suggest_crop(&self, x: u32, y: u32) -> Result<JsValue, JsValue> {
        let image = self
            .inner
            .image()
            .ok_or_else(|| to_js_error(SessionError::NoImageLoaded))?;
        Ok(serde_wasm_bindgen::to_value(&suggest_crop(image, x, y))?)
    }
}

impl JsSession {
    fn run(&mut self, request: TransformRequest) -> Result<(), JsValue> {
        self.inner.apply(request).map_err(to_js_error)?;
        Ok(())
    }
}
