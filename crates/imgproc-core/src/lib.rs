//! imgproc Core - single-image editing pipeline
//!
//! This crate provides the core of an interactive image editor: decoding and
//! encoding PNG/JPEG/BMP files, a library of pure transforms (resize, crop,
//! rotate, Gaussian blur, median blur, noise reduction), parameter
//! validation, and a [`Session`] that applies transforms one after another
//! to a single in-memory image.
//!
//! # Flow
//!
//! 1. A UI collects raw numbers and builds a [`TransformRequest`]
//! 2. [`Session::apply`] validates it against the current image
//! 3. The transform produces a new buffer, which replaces the old one
//! 4. The UI asks for [`Session::display_rgb`] and repaints
//!
//! Nothing here blocks on I/O except `load_file`/`save`, and nothing spawns
//! threads; every call completes before it returns.

pub mod decode;
pub mod encode;
pub mod format;
pub mod request;
pub mod session;
pub mod transform;
pub mod validate;

pub use decode::{DecodeError, ImageBuffer};
pub use encode::{EncodeError, EncodeOptions};
pub use format::ImageFormat;
pub use request::TransformRequest;
pub use session::{ErrorKind, Session, SessionError};
pub use transform::TransformError;
pub use validate::{clamp_crop, suggest_crop, suggest_resize, TransformLimits};
