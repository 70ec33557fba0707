//! Module implementing the `Caption` type.

use std::fmt;

use super::position::Position;


/// Describes a single block of text rendered on the meme.
///
/// Use the provided `Caption::text_at` method to create it
/// with the optional fields left unset.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Caption {
    /// Text to render.
    ///
    /// Newline characters (`"\n"`) separate the lines.
    /// No other line breaking is performed.
    #[serde(default)]
    pub text: String,
    /// Which edge of the surface the caption is anchored to.
    pub position: Position,
    /// Explicit baseline of the caption's anchor line.
    ///
    /// If omitted, it's derived from the position and font size.
    #[serde(default)]
    pub y: Option<i32>,
    /// Explicit base font size, in pixels.
    ///
    /// If omitted, the configured default is used.
    #[serde(default)]
    pub font_size: Option<u32>,
}

impl Caption {
    /// Create an empty Caption at the particular position.
    #[inline]
    pub fn at(position: Position) -> Self {
        Caption{text: String::new(), position, y: None, font_size: None}
    }

    /// Create a Caption with a text at the particular position.
    #[inline]
    pub fn text_at<S: Into<String>>(position: Position, s: S) -> Self {
        Caption{text: s.into(), ..Caption::at(position)}
    }

    /// Set an explicit vertical anchor for the caption.
    #[inline]
    pub fn with_y(mut self, y: i32) -> Self {
        self.y = Some(y); self
    }

    /// Set an explicit base font size for the caption.
    #[inline]
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size); self
    }
}

impl Caption {
    /// Iterate over the physical lines of the caption text.
    ///
    /// An empty text still yields a single (empty) line.
    #[inline]
    pub fn lines<'c>(&'c self) -> ::std::str::Split<'c, char> {
        self.text.split('\n')
    }

    /// Whether the caption has any visible text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Debug for Caption {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{position:?}{{{y}{size}}}({text:?})",
            text = self.text,
            position = self.position,
            y = self.y.map(|y| format!("y={}", y)).unwrap_or_else(String::new),
            size = self.font_size.map(|s| format!(" {}px", s)).unwrap_or_else(String::new))
    }
}
