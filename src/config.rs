//! Module with captioning configuration.

use model::{DEFAULT_BOTTOM_INSET, DEFAULT_FONT_SIZE, DEFAULT_LEADING, DEFAULT_MIN_FONT_SIZE,
            EDGE_WIDTH, FIT_RATIO, MAX_WIDTH_RATIO, OUTLINE_WIDTH, SHADOW_BLUR};


/// Structure holding configuration for the `Captioner`.
///
/// It can be deserialized from any serde format;
/// fields that are missing take their default values.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Font size used when a caption doesn't specify one.
    pub base_font_size: u32,
    /// Extra vertical space between lines (added to font size).
    pub leading: u32,
    /// Distance of the bottom caption's baseline from the bottom edge.
    pub bottom_inset: u32,
    /// Lines measuring wider than `surface width * fit_ratio` are shrunk.
    pub fit_ratio: f32,
    /// Lines are condensed when drawn wider than `surface width * max_width_ratio`.
    pub max_width_ratio: f32,
    /// Lower bound for shrinking the font size.
    pub min_font_size: u32,
    /// How shrinking of one line affects the others.
    pub fit: Fit,
    /// Blur radius of the outline shadow.
    pub shadow_blur: f32,
    /// Width of the dark outline stroke.
    pub outline_width: f32,
    /// Width of the light stroke that sharpens glyph edges.
    pub edge_width: f32,
    /// Quality of JPEG snapshots (in %).
    pub jpeg_quality: u8,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            base_font_size: DEFAULT_FONT_SIZE,
            leading: DEFAULT_LEADING,
            bottom_inset: DEFAULT_BOTTOM_INSET,
            fit_ratio: FIT_RATIO,
            max_width_ratio: MAX_WIDTH_RATIO,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            fit: Fit::default(),
            shadow_blur: SHADOW_BLUR,
            outline_width: OUTLINE_WIDTH,
            edge_width: EDGE_WIDTH,
            jpeg_quality: 85,
        }
    }
}


/// Strategy of shrinking multi-line captions to fit the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    /// Lines are fitted in draw order, and a line that had to be shrunk
    /// lowers the font size for every line drawn after it.
    CarryOver,
    /// Every line is fitted on its own, starting from the base font size.
    PerLine,
    /// All lines share the size that fits the widest one.
    Uniform,
}

impl Default for Fit {
    fn default() -> Self {
        Fit::CarryOver
    }
}
