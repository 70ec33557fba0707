//! Module implementing image captioning.

mod captioner;
mod error;
mod output;
mod render;


pub use self::captioner::Captioner;
pub use self::error::CaptionError;
pub use self::output::CaptionOutput;
