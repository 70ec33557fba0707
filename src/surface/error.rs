//! Error while binding an image to a surface.

use std::error::Error;
use std::fmt;


/// Error that may occur when resolving an image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// Image reference doesn't point to anything that could be an image.
    InvalidHandle(String),
    /// Explicitly empty path to the image.
    EmptyPath,
}

impl Error for BindError {
    fn description(&self) -> &str { "image binding error" }
}

impl fmt::Display for BindError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BindError::InvalidHandle(ref why) => write!(fmt, "not a valid image: {}", why),
            BindError::EmptyPath => write!(fmt, "empty image path"),
        }
    }
}
