//! Module responsible for measuring & rasterizing text.

mod font;
mod stroke;

pub use self::stroke::{blur, outline, pad};


use image::GrayImage;


/// Capability of measuring how wide a piece of text would render.
pub trait TextMeasure {
    /// Compute the pixel width of given single-line text at given font size.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasure for F
    where F: Fn(&str, f32) -> f32
{
    #[inline]
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}


/// Capability of turning a line of text into a coverage mask.
pub trait Rasterizer: TextMeasure {
    /// Rasterize single-line text at given font size.
    ///
    /// `h_scale` condenses the glyphs horizontally (1.0 leaves them as they are).
    /// The resulting mask is positioned relative to the pen origin:
    /// the left end of the text on its baseline.
    fn rasterize(&self, text: &str, font_size: f32, h_scale: f32) -> Coverage;
}


/// Grayscale coverage of rasterized text,
/// together with its position relative to the pen origin.
#[derive(Clone, Debug)]
pub struct Coverage {
    /// Glyph coverage (0 = none, 255 = full).
    pub mask: GrayImage,
    /// Offset of the mask's top-left corner from the pen origin.
    pub offset: (i32, i32),
}

impl Coverage {
    /// Coverage that doesn't cover anything.
    #[inline]
    pub fn empty() -> Self {
        Coverage{mask: GrayImage::new(0, 0), offset: (0, 0)}
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask.width() == 0 || self.mask.height() == 0
    }
}


#[cfg(test)]
pub(crate) mod fake {
    //! Deterministic rasterizer for tests that don't have a real font file.

    use image::{GrayImage, Luma};

    use super::{Coverage, Rasterizer, TextMeasure};

    /// Draws every non-space character as a solid block
    /// of `advance * size` by `size * 0.7` pixels.
    #[derive(Clone, Copy, Debug)]
    pub struct BlockFont {
        pub advance: f32,
    }

    impl Default for BlockFont {
        fn default() -> Self {
            BlockFont{advance: 0.5}
        }
    }

    impl TextMeasure for BlockFont {
        fn text_width(&self, text: &str, font_size: f32) -> f32 {
            text.chars().count() as f32 * self.advance * font_size
        }
    }

    impl Rasterizer for BlockFont {
        fn rasterize(&self, text: &str, font_size: f32, h_scale: f32) -> Coverage {
            let width = (self.text_width(text, font_size) * h_scale).ceil() as u32;
            let height = (font_size * 0.7).ceil() as u32;
            if width == 0 || height == 0 {
                return Coverage::empty();
            }
            let glyph_width = self.advance * font_size * h_scale;
            let mask = GrayImage::from_fn(width, height, |x, _| {
                let idx = (x as f32 / glyph_width) as usize;
                match text.chars().nth(idx) {
                    Some(c) if !c.is_whitespace() => Luma([0xff]),
                    _ => Luma([0]),
                }
            });
            Coverage{mask, offset: (0, -(height as i32))}
        }
    }
}
