//! imgproc WASM - WebAssembly bindings for the imgproc editing session
//!
//! This crate exposes the imgproc-core session to a browser UI. The page
//! owns one `JsSession`, collects numbers from its dialogs, and repaints
//! from the RGB copy the session hands back after each transform.
//!
//! # Module Structure
//!
//! - `session` - `JsSession`, the current image and its transforms
//! - `types` - RGB image snapshots and error conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession } from '@imgproc/wasm';
//!
//! await init();
//!
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! session.rotate(90);
//!
//! const image = session.display_image();
//! ctx.putImageData(
//!   new ImageData(new Uint8ClampedArray(image.to_rgba()), image.width, image.height),
//!   0, 0,
//! );
//! ```
//!
//! Failures throw a JS `Error` whose `name` is the error kind
//! (`DecodeError`, `InvalidRegion`, `InvalidParameter`, ...).

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsSession;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
