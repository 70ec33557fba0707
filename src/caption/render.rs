//! Module implementing the drawing of caption lines onto the surface.

use image::{GrayImage, Pixel, RgbaImage};

use config::Config;
use layout::LineLayout;
use model::{Color, OUTLINE_COLOR, TEXT_COLOR};
use text::{blur, outline, pad, Rasterizer};


/// Draw a single line of caption text onto the canvas.
///
/// The line is drawn in two passes. The first one lays down a dark outline
/// (casting a blurred shadow) and the light fill; the second one repeats
/// the fill together with a thin light stroke that sharpens glyph edges.
pub(super) fn draw_line<R>(canvas: &mut RgbaImage, line: &LineLayout,
                           rasterizer: &R, config: &Config)
    where R: Rasterizer + ?Sized
{
    if line.content.trim().is_empty() {
        return;
    }

    let font_size = line.font_size as f32;
    let width = rasterizer.text_width(&line.content, font_size);
    let max_width = canvas.width() as f32 * config.max_width_ratio;
    let h_scale = condensation(width, max_width);
    if h_scale < 1.0 {
        debug!("Condensing line {:?} to {:.0}% of its width", line.content, h_scale * 100.0);
    }

    let coverage = rasterizer.rasterize(&line.content, font_size, h_scale);
    if coverage.is_empty() {
        return;
    }

    // Masks are centered horizontally around the line's anchor,
    // with the pen origin on its baseline.
    let pen_x = line.x as f32 - width * h_scale / 2.0;
    let margin = stroke_margin(config);
    let origin = (
        pen_x.round() as i32 + coverage.offset.0 - margin as i32,
        line.y + coverage.offset.1 - margin as i32,
    );
    let fill = pad(&coverage.mask, margin);

    // First pass.
    let stroke = outline(&fill, config.outline_width);
    let shadow = blur(&union(&stroke, &fill), config.shadow_blur);
    paint(canvas, &shadow, origin, OUTLINE_COLOR);
    paint(canvas, &stroke, origin, OUTLINE_COLOR);
    paint(canvas, &fill, origin, TEXT_COLOR);

    // Second pass.
    let edge = outline(&fill, config.edge_width);
    paint(canvas, &edge, origin, TEXT_COLOR);
    paint(canvas, &fill, origin, TEXT_COLOR);
}


/// Horizontal scale that squeezes text of given width into the maximum width.
fn condensation(width: f32, max_width: f32) -> f32 {
    if width > max_width && width > 0.0 {
        (max_width / width).max(0.0)
    } else {
        1.0
    }
}

/// Space around the glyph mask that the stroke & shadow may extend into.
fn stroke_margin(config: &Config) -> u32 {
    let stroke = (config.outline_width.max(config.edge_width) / 2.0).max(0.0).ceil();
    // Gaussian tails are negligible past 3 sigmas, i.e. 1.5 blur radius.
    let shadow = (config.shadow_blur.max(0.0) * 1.5).ceil();
    (stroke + shadow) as u32 + 1
}

fn union(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut result = a.clone();
    for (r, p) in result.pixels_mut().zip(b.pixels()) {
        r[0] = r[0].max(p[0]);
    }
    result
}

/// Blend a color onto the canvas, using the mask as its alpha.
fn paint(canvas: &mut RgbaImage, mask: &GrayImage, origin: (i32, i32), color: Color) {
    let (canvas_width, canvas_height) = (canvas.width() as i32, canvas.height() as i32);
    for (x, y, alpha) in mask.enumerate_pixels() {
        if alpha[0] == 0 {
            continue;
        }
        let (cx, cy) = (origin.0 + x as i32, origin.1 + y as i32);
        if cx < 0 || cy < 0 || cx >= canvas_width || cy >= canvas_height {
            continue;
        }
        canvas.get_pixel_mut(cx as u32, cy as u32).blend(&color.to_rgba(alpha[0]));
    }
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use spectral::prelude::*;

    use config::Config;
    use layout::LineLayout;
    use text::fake::BlockFont;
    use super::{condensation, draw_line};

    const GRAY: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xff]);

    fn line(content: &str, font_size: u32, x: i32, y: i32) -> LineLayout {
        LineLayout{index: 0, content: content.to_owned(), font_size, x, y}
    }

    #[test]
    fn condensation_only_for_wide_text() {
        assert_that!(condensation(100.0, 180.0)).is_equal_to(1.0);
        assert_that!(condensation(180.0, 180.0)).is_equal_to(1.0);
        assert_that!(condensation(360.0, 180.0)).is_equal_to(0.5);
        assert_that!(condensation(0.0, 0.0)).is_equal_to(1.0);
    }

    #[test]
    fn fill_outline_and_untouched_background() {
        let mut canvas = RgbaImage::from_pixel(200, 100, GRAY);
        // 4 blocks of 10x14 px, spanning x in [80, 120) and y in [36, 50).
        draw_line(&mut canvas, &line("ABCD", 20, 100, 50), &BlockFont::default(), &Config::default());

        let fill = canvas.get_pixel(100, 43);
        assert!(fill[0] > 0xf0 && fill[3] == 0xff);
        let stroke = canvas.get_pixel(78, 43);
        assert!(stroke[0] < 0x10);
        assert_that!(*canvas.get_pixel(5, 5)).is_equal_to(GRAY);
        assert_that!(*canvas.get_pixel(195, 95)).is_equal_to(GRAY);
    }

    #[test]
    fn blank_line_draws_nothing() {
        let mut canvas = RgbaImage::from_pixel(50, 50, GRAY);
        draw_line(&mut canvas, &line("   ", 20, 25, 40), &BlockFont::default(), &Config::default());
        assert!(canvas.pixels().all(|p| *p == GRAY));
    }

    #[test]
    fn wide_line_is_condensed() {
        let mut canvas = RgbaImage::new(200, 60);
        // 400px wide at its natural scale; condensed into 180px (x in [10, 190)).
        draw_line(&mut canvas, &line(&"W".repeat(40), 20, 100, 40), &BlockFont::default(), &Config::default());

        assert!(canvas.get_pixel(12, 33)[0] > 0xf0);
        assert!(canvas.get_pixel(187, 33)[0] > 0xf0);
        assert_that!(canvas.get_pixel(0, 33)[3]).is_less_than(0x10);
        assert_that!(canvas.get_pixel(199, 33)[3]).is_less_than(0x10);
    }

    #[test]
    fn clipped_at_canvas_edges() {
        let mut canvas = RgbaImage::from_pixel(40, 40, GRAY);
        draw_line(&mut canvas, &line("HI", 30, 0, 10), &BlockFont::default(), &Config::default());
        assert!(canvas.get_pixel(0, 0)[0] > 0xf0);
    }
}
