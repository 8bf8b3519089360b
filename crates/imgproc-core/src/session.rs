//! The editing session: one image, replaced by each successful transform.
//!
//! # State Machine
//!
//! ```text
//! Empty  --load-->            Loaded(image)
//! Loaded --load-->            Loaded(new image)
//! Loaded --apply (ok)-->      Loaded(transformed image)
//! Loaded --apply (error)-->   Loaded(image, unchanged)
//! Empty  --apply-->           Empty, NoImageLoaded
//! ```
//!
//! There is no history: the previous buffer is dropped as soon as a
//! transform succeeds. Renderers get a copy through [`Session::display_rgb`]
//! so nothing they hold can observe the buffer being replaced.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::decode::{self, DecodeError, ImageBuffer};
use crate::encode::{self, EncodeError, EncodeOptions};
use crate::format::ImageFormat;
use crate::request::TransformRequest;
use crate::transform::{self, TransformError};
use crate::validate::TransformLimits;

/// Errors reported by [`Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A transform or save was requested before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Loading failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Saving failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Validation or the transform itself failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Coarse error categories for presenting failures to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DecodeError,
    EncodeError,
    NoImageLoaded,
    InvalidRegion,
    InvalidParameter,
    UnsupportedFormat,
    EmptyInput,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::EncodeError => "EncodeError",
            ErrorKind::NoImageLoaded => "NoImageLoaded",
            ErrorKind::InvalidRegion => "InvalidRegion",
            ErrorKind::InvalidParameter => "InvalidParameter",
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::EmptyInput => "EmptyInput",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SessionError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::NoImageLoaded => ErrorKind::NoImageLoaded,
            SessionError::Decode(_) => ErrorKind::DecodeError,
            SessionError::Encode(_) => ErrorKind::EncodeError,
            SessionError::Transform(err) => match err {
                TransformError::EmptyInput => ErrorKind::EmptyInput,
                TransformError::UnsupportedFormat { .. }
                | TransformError::BufferSizeMismatch { .. } => ErrorKind::UnsupportedFormat,
                TransformError::InvalidRegion { .. } => ErrorKind::InvalidRegion,
                TransformError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            },
        }
    }
}

/// Holder of the current image.
#[derive(Debug, Default)]
pub struct Session {
    image: Option<ImageBuffer>,
    limits: TransformLimits,
}

impl Session {
    /// Create an empty session with the default parameter limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with custom parameter limits.
    pub fn with_limits(limits: TransformLimits) -> Self {
        Self {
            image: None,
            limits,
        }
    }

    pub fn limits(&self) -> &TransformLimits {
        &self.limits
    }

    /// Whether an image is loaded.
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Borrow the current image, if any.
    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    /// Replace the current image with an already decoded buffer.
    ///
    /// # Errors
    ///
    /// Rejects buffers that are empty, not 3-channel, or ragged; the
    /// session is unchanged in that case.
    pub fn load_image(&mut self, image: ImageBuffer) -> Result<&ImageBuffer, SessionError> {
        transform::check_input(&image)?;
        debug!(width = image.width, height = image.height, "loaded image");
        Ok(self.image.insert(image))
    }

    /// Decode `bytes` and make the result the current image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&ImageBuffer, SessionError> {
        let image = decode::decode(bytes)?;
        self.load_image(image)
    }

    /// Read and decode a file and make the result the current image.
    pub fn load_file(&mut self, path: &Path) -> Result<&ImageBuffer, SessionError> {
        let image = decode::decode_file(path)?;
        debug!(path = %path.display(), "opened file");
        self.load_image(image)
    }

    /// Validate and run a transform, replacing the current image on success.
    ///
    /// On any error the current image is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `NoImageLoaded` if the session is empty
    /// - `Transform(_)` if validation or the transform fails
    pub fn apply(&mut self, request: TransformRequest) -> Result<&ImageBuffer, SessionError> {
        let current = self.image.as_ref().ok_or(SessionError::NoImageLoaded)?;

        let normalized = self.limits.validate(&request, current)?;
        let result = normalized.execute(current)?;

        debug!(
            transform = normalized.name(),
            from_width = current.width,
            from_height = current.height,
            width = result.width,
            height = result.height,
            "applied transform"
        );

        Ok(self.image.insert(result))
    }

    /// A fresh RGB copy of the current image for painting (stride = width * 3).
    pub fn display_rgb(&self) -> Option<Vec<u8>> {
        self.image.as_ref().map(ImageBuffer::to_rgb_bytes)
    }

    /// Encode the current image to the given format.
    pub fn encode(
        &self,
        format: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImageLoaded)?;
        Ok(encode::encode(image, format, options)?)
    }

    /// Save the current image, choosing the format from the file extension.
    pub fn save(&self, path: &Path, options: &EncodeOptions) -> Result<(), SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImageLoaded)?;
        encode::encode_file(image, path, options)?;
        debug!(path = %path.display(), "saved image");
        Ok(())
    }
}
