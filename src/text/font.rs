//! Text measurement & rasterization backed by `rusttype`.

use std::cmp;
use std::collections::HashSet;

use image::{GrayImage, Luma};
use itertools::Itertools;
use rusttype::{point, GlyphId, PositionedGlyph, Rect, Scale};

use resources::Font;
use super::{Coverage, Rasterizer, TextMeasure};


impl Font {
    /// Codepoints of the text that the font has no glyphs for, in ascending order.
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        let missing: HashSet<_> = text.chars()
            .filter(|c| !c.is_control())
            .filter(|&c| self.glyph(c).id() == GlyphId(0))
            .collect();
        missing.into_iter().sorted().collect()
    }

    fn layout_line(&self, text: &str, scale: Scale) -> Vec<PositionedGlyph<'static>> {
        self.layout(text, scale, point(0.0, 0.0)).collect()
    }
}

impl TextMeasure for Font {
    /// Compute text width as the final X position of the "caret"
    /// after laying out all the glyphs, starting from X=0.
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.layout_line(text, Scale::uniform(font_size)).last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }
}

impl Rasterizer for Font {
    fn rasterize(&self, text: &str, font_size: f32, h_scale: f32) -> Coverage {
        // Missing glyphs render as the font's "notdef" glyph (or nothing at all).
        let missing = self.missing_glyphs(text);
        if !missing.is_empty() {
            warn!("Missing glyphs for {} codepoint(s) in {:?}: {}", missing.len(), text,
                missing.iter().map(|&c| format!("{:#x}", c as u32)).join(", "));
        }
        let scale = Scale{x: font_size * h_scale, y: font_size};
        let glyphs = self.layout_line(text, scale);

        // Union of all the glyph bounding boxes determines the mask size.
        let bounds = glyphs.iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold(None, |acc: Option<Rect<i32>>, bb| Some(match acc {
                Some(r) => Rect{
                    min: point(cmp::min(r.min.x, bb.min.x), cmp::min(r.min.y, bb.min.y)),
                    max: point(cmp::max(r.max.x, bb.max.x), cmp::max(r.max.y, bb.max.y)),
                },
                None => bb,
            }));
        let bounds = match bounds {
            Some(b) => b,
            None => return Coverage::empty(),
        };
        trace!("Rasterizing {:?} at {}px into {}x{} mask",
            text, font_size, bounds.width(), bounds.height());

        let mut mask = GrayImage::new(bounds.width() as u32, bounds.height() as u32);
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, v| {
                    let x = (bb.min.x - bounds.min.x) as u32 + x;
                    let y = (bb.min.y - bounds.min.y) as u32 + y;
                    if x < mask.width() && y < mask.height() {
                        // Glyphs may overlap (e.g. due to kerning).
                        let alpha = (v * 255.0).round() as u8;
                        let Luma([prev]) = *mask.get_pixel(x, y);
                        mask.put_pixel(x, y, Luma([cmp::max(prev, alpha)]));
                    }
                });
            }
        }

        Coverage{mask, offset: (bounds.min.x, bounds.min.y)}
    }
}
