//! Captioning error.

use std::error::Error;
use std::fmt;

use image::{ImageError, ImageFormat};


/// Error that may occur during the captioning.
#[derive(Debug)]
pub enum CaptionError {
    // Errors related to the bound image.
    ImageNotReady,
    AlreadyLoaded,
    Decode(ImageError),

    // Errors related to the output.
    Encode(ImageError),
    UnsupportedFormat(ImageFormat),
}

impl Error for CaptionError {
    fn description(&self) -> &str { "captioning error" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            CaptionError::Decode(ref e) => Some(e),
            CaptionError::Encode(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for CaptionError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CaptionError::ImageNotReady => write!(fmt, "image is not loaded yet"),
            CaptionError::AlreadyLoaded => write!(fmt, "image has already been loaded"),
            CaptionError::Decode(ref e) => write!(fmt, "failed to decode the image: {}", e),
            CaptionError::Encode(ref e) => write!(fmt, "failed to encode the final image: {}", e),
            CaptionError::UnsupportedFormat(ref f) =>
                write!(fmt, "unsupported output format: {:?}", f),
        }
    }
}
