//! Image decoding for the editing session.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and BMP files from bytes or from disk
//! - Applying EXIF orientation so pixels match what a viewer shows
//! - The [`ImageBuffer`] type every transform consumes and produces
//!
//! # Examples
//!
//! ```ignore
//! use imgproc_core::decode::decode_file;
//!
//! let image = decode_file(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode, decode_file, get_orientation};
pub use types::{DecodeError, ImageBuffer, Orientation, CHANNELS};
