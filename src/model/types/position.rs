//! Module defining the caption position enum.

#![allow(missing_docs)]  // Because IterVariants! produces undocumented methods.

use std::fmt;


macro_attr! {
    /// Logical position of a caption on the surface.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
             Deserialize, IterVariants!(Positions))]
    #[serde(rename_all = "lowercase")]
    pub enum Position {
        /// Text grows downward from the top edge.
        Top,
        /// Text stacks upward from the bottom edge.
        Bottom,
    }
}

impl Position {
    /// Name of the position as used in textual representations.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match *self {
            Position::Top => "top",
            Position::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}
