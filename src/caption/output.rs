//! Defines the output of a captioning operation.

use std::ops::Deref;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use mime::{self, Mime};


/// Encoded snapshot of the captioned surface.
#[derive(Clone, Debug)]
#[must_use = "unused caption output which must be used"]
pub struct CaptionOutput {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl CaptionOutput {
    #[inline]
    pub(super) fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        CaptionOutput{format, bytes}
    }
}

impl CaptionOutput {
    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw bytes of the output.
    ///
    /// See `CaptionOutput::format` for how to interpret it.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::Gif => Some(mime::IMAGE_GIF),
            ImageFormat::Jpeg => Some(mime::IMAGE_JPEG),
            ImageFormat::Png => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }

    /// Encode the output as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        let mime = self.mime_type().unwrap_or(mime::APPLICATION_OCTET_STREAM);
        format!("data:{};base64,{}", mime, BASE64.encode(&self.bytes))
    }
}

impl Deref for CaptionOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl Into<Vec<u8>> for CaptionOutput {
    fn into(self) -> Vec<u8> {
        self.into_bytes()
    }
}
