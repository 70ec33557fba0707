//! Module defining constants relevant to the data model.

use super::types::Color;


/// Name of the default font.
pub const DEFAULT_FONT: &'static str = "Impact";

/// Default base size of the caption text, in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 48;

/// Extra space added to the font size to obtain the line height.
pub const DEFAULT_LEADING: u32 = 10;

/// Distance between the bottom edge of the surface
/// and the baseline of the last bottom caption line.
pub const DEFAULT_BOTTOM_INSET: u32 = 10;

/// Smallest font size that shrinking a line can produce.
pub const DEFAULT_MIN_FONT_SIZE: u32 = 8;

/// How much wider than the surface a line may measure before it's shrunk.
pub const FIT_RATIO: f32 = 1.1;

/// Maximum width of a drawn line, relative to the surface width.
pub const MAX_WIDTH_RATIO: f32 = 0.9;


/// Color of the caption text.
pub const TEXT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Color of the text outline and its shadow.
pub const OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);

/// Width of the outline stroke, in pixels.
pub const OUTLINE_WIDTH: f32 = 3.0;
/// Blur radius of the outline shadow.
pub const SHADOW_BLUR: f32 = 3.0;
/// Width of the stroke that sharpens the text edges.
pub const EDGE_WIDTH: f32 = 1.0;
