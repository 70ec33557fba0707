//! Module for loading fonts used to render captions.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use rusttype;

use model::DEFAULT_FONT;
use super::Loader;
use super::filesystem::{BytesLoader, PathLoader};


pub const FILE_EXTENSION: &'static str = "ttf";


macro_attr! {
    /// Font that can be used to render captions.
    #[derive(NewtypeDeref!, NewtypeFrom!)]
    pub struct Font(rusttype::Font<'static>);
}

impl Font {
    /// Parse font from the bytes of a TrueType/OpenType file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        rusttype::Font::try_from_vec(bytes).map(Font).ok_or(FontError::Parse)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({} glyphs)", self.glyph_count())
    }
}


/// Error while loading a font.
#[derive(Debug)]
pub enum FontError {
    /// Font file couldn't be found or read.
    File(io::Error),
    /// Font file didn't contain a usable font.
    Parse,
}

impl Error for FontError {
    fn description(&self) -> &str { "font loading error" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            FontError::File(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FontError::File(ref e) => write!(fmt, "cannot read font file: {}", e),
            FontError::Parse => write!(fmt, "invalid font data"),
        }
    }
}


/// Loader of fonts stored as `.ttf` files in a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(PathLoader::for_extension(directory, FILE_EXTENSION)),
        }
    }

    /// Load the font that captions are rendered with by default.
    #[inline]
    pub fn load_default(&self) -> Result<Font, FontError> {
        self.load(DEFAULT_FONT)
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load<'n>(&self, name: &'n str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name).map_err(|e| {
            error!("Failed to read font file for `{}`: {}", name, e);
            FontError::File(e)
        })?;
        let font = Font::from_bytes(bytes).map_err(|e| {
            error!("No usable font in the file for `{}` font resource", name); e
        })?;
        debug!("Font `{}` loaded successfully", name);
        Ok(font)
    }
}
