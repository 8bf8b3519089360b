//! Image encoding for saving the session's buffer.
//!
//! This module provides functionality for:
//! - Encoding an [`ImageBuffer`](crate::decode::ImageBuffer) to PNG, JPEG or BMP bytes
//! - Writing an encoded image to disk, picking the format from the extension
//!
//! # Examples
//!
//! ```ignore
//! use imgproc_core::encode::{encode_file, EncodeOptions};
//!
//! encode_file(&image, Path::new("out.png"), &EncodeOptions::default())?;
//! ```

mod writer;

pub use writer::{encode, encode_file, EncodeError, EncodeOptions};
