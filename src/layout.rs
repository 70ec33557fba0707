//! Module implementing the caption layout: font sizes & anchors of text lines.

use std::cmp;

use config::{Config, Fit};
use model::{Caption, Position};
use text::TextMeasure;


/// Resolved placement of a single physical line of caption text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineLayout {
    /// Index of the line within the caption text.
    pub index: usize,
    /// Text of the line.
    pub content: String,
    /// Font size the line should be drawn with, in pixels.
    pub font_size: u32,
    /// Horizontal center of the line.
    pub x: i32,
    /// Baseline of the line.
    pub y: i32,
}


/// Compute the layout of caption's lines on a surface of given size.
///
/// Lines are returned in the order they appear in the caption text.
/// Fitting, however, proceeds in draw order: top captions are fitted
/// from the first line down, bottom captions from the last line up.
pub fn layout<M>(caption: &Caption,
                 surface_width: u32, surface_height: u32,
                 measure: &M, config: &Config) -> Vec<LineLayout>
    where M: TextMeasure + ?Sized
{
    let lines: Vec<&str> = caption.lines().collect();
    let last = lines.len() - 1;  // there's always at least one line

    let base_size = caption.font_size.unwrap_or(config.base_font_size);
    let x = (surface_width / 2) as i32;
    let y0 = caption.y.unwrap_or_else(|| match caption.position {
        Position::Top => clamp_i32(base_size),
        Position::Bottom =>
            clamp_i32(surface_height).saturating_sub(clamp_i32(config.bottom_inset)),
    });
    trace!("Laying out {} line(s) of {:?} caption at x={}, y0={}, {}px",
        lines.len(), caption.position, x, y0, base_size);

    let fitter = Fitter{
        budget: surface_width as f32 * config.fit_ratio,
        min_size: config.min_font_size,
        measure,
    };
    let uniform_size = match config.fit {
        Fit::Uniform => Some(lines.iter()
            .map(|line| fitter.fit(line, base_size))
            .min().unwrap_or(base_size)),
        _ => None,
    };

    let draw_order: Vec<usize> = match caption.position {
        Position::Top => (0..lines.len()).collect(),
        Position::Bottom => (0..lines.len()).rev().collect(),
    };

    let mut result = Vec::with_capacity(lines.len());
    let mut font_size = base_size;
    for i in draw_order {
        let line = lines[i];
        font_size = match (config.fit, uniform_size) {
            (_, Some(size)) => size,
            (Fit::CarryOver, _) => fitter.fit(line, font_size),
            _ => fitter.fit(line, base_size),
        };
        let line_height = clamp_i32(font_size.saturating_add(config.leading));

        // Anchors & sizes may come from untrusted input, so positions saturate.
        let y = match caption.position {
            Position::Top =>
                y0.saturating_add(clamp_i32(i as u32).saturating_mul(line_height)),
            Position::Bottom =>
                y0.saturating_sub(clamp_i32((last - i) as u32).saturating_mul(line_height)),
        };
        trace!("Line #{} {:?}: {}px at y={}", i, line, font_size, y);

        result.push(LineLayout{index: i, content: line.to_owned(), font_size, x, y});
    }

    result.sort_by_key(|l| l.index);
    result
}

#[inline]
fn clamp_i32(value: u32) -> i32 {
    cmp::min(value, i32::max_value() as u32) as i32
}


/// Shrinks font size of text lines so that they fit within a width budget.
struct Fitter<'m, M: TextMeasure + ?Sized + 'm> {
    budget: f32,
    min_size: u32,
    measure: &'m M,
}

impl<'m, M: TextMeasure + ?Sized> Fitter<'m, M> {
    /// Return the font size the line should use, given its current size.
    fn fit(&self, line: &str, font_size: u32) -> u32 {
        let width = self.measure.text_width(line, font_size as f32);
        if width <= self.budget {
            return font_size;
        }

        let shrunk = ((self.budget / width) * font_size as f32).floor() as u32;
        let result = cmp::min(cmp::max(shrunk, self.min_size), font_size);
        if shrunk < self.min_size {
            debug!("Line {:?} only fits at {}px, clamping to {}px", line, shrunk, result);
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use config::{Config, Fit};
    use model::{Caption, Position};
    use super::{layout, LineLayout};

    /// Every character is half as wide as the font size.
    fn half_em(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn sizes(lines: &[LineLayout]) -> Vec<u32> {
        lines.iter().map(|l| l.font_size).collect()
    }

    fn ys(lines: &[LineLayout]) -> Vec<i32> {
        lines.iter().map(|l| l.y).collect()
    }

    #[test]
    fn single_line_that_fits() {
        let caption = Caption::text_at(Position::Top, "HELLO");
        let lines = layout(&caption, 500, 300, &half_em, &Config::default());
        assert_that!(lines).has_length(1);
        assert_that!(lines[0]).is_equal_to(LineLayout{
            index: 0, content: "HELLO".into(), font_size: 48, x: 250, y: 48,
        });
    }

    #[test]
    fn single_line_that_overflows() {
        // 12 chars * 24px = 288px > 110px budget.
        let text: String = ::std::iter::repeat('W').take(12).collect();
        let caption = Caption::text_at(Position::Top, text.as_str());
        let lines = layout(&caption, 100, 300, &half_em, &Config::default());

        let size = lines[0].font_size;
        assert_that!(size).is_less_than(48);
        assert_that!(size).is_equal_to(18);
        assert_that!(half_em(&text, size as f32)).is_less_than_or_equal_to(110.0);
    }

    #[test]
    fn empty_text_occupies_a_line() {
        let caption = Caption::at(Position::Bottom);
        let lines = layout(&caption, 500, 300, &half_em, &Config::default());
        assert_that!(lines).has_length(1);
        assert_eq!("", lines[0].content);
        assert_eq!(290, lines[0].y);
    }

    #[test]
    fn top_lines_grow_downward() {
        let caption = Caption::text_at(Position::Top, "one\ntwo\nsix");
        let lines = layout(&caption, 500, 300, &half_em, &Config::default());
        assert_that!(ys(&lines)).is_equal_to(vec![48, 48 + 58, 48 + 2 * 58]);
        assert_that!(lines.iter().map(|l| l.index).collect::<Vec<_>>())
            .is_equal_to(vec![0, 1, 2]);
    }

    #[test]
    fn bottom_lines_stack_upward() {
        let caption = Caption::text_at(Position::Bottom, "one\ntwo\nsix");
        let lines = layout(&caption, 500, 300, &half_em, &Config::default());
        assert_that!(ys(&lines)).is_equal_to(vec![290 - 2 * 58, 290 - 58, 290]);
        assert_eq!("six", lines[2].content);
    }

    #[test]
    fn explicit_anchor_and_size() {
        let caption = Caption::text_at(Position::Top, "a\nb")
            .with_y(100).with_font_size(20);
        let lines = layout(&caption, 500, 300, &half_em, &Config::default());
        assert_that!(sizes(&lines)).is_equal_to(vec![20, 20]);
        assert_that!(ys(&lines)).is_equal_to(vec![100, 130]);
    }

    #[test]
    fn center_anchor() {
        let caption = Caption::text_at(Position::Top, "x");
        let lines = layout(&caption, 301, 300, &half_em, &Config::default());
        assert_eq!(150, lines[0].x);
    }

    #[test]
    fn carry_over_shrinks_later_lines() {
        // Budget is 110px; the long line needs 20 * 24 = 480px at 48px.
        let long: String = ::std::iter::repeat('x').take(20).collect();
        let text = format!("{}\nab", long);
        let caption = Caption::text_at(Position::Top, text.as_str());
        let lines = layout(&caption, 100, 300, &half_em, &Config::default());

        // floor(110 / 480 * 48) = 11
        assert_that!(sizes(&lines)).is_equal_to(vec![11, 11]);
        assert_that!(ys(&lines)).is_equal_to(vec![48, 48 + 21]);
    }

    #[test]
    fn carry_over_follows_draw_order() {
        // For bottom captions the last line is fitted first,
        // so a long first line doesn't affect it.
        let long: String = ::std::iter::repeat('x').take(20).collect();
        let text = format!("{}\nab", long);
        let caption = Caption::text_at(Position::Bottom, text.as_str());
        let lines = layout(&caption, 100, 300, &half_em, &Config::default());
        assert_that!(sizes(&lines)).is_equal_to(vec![11, 48]);
    }

    #[test]
    fn per_line_fit() {
        let long: String = ::std::iter::repeat('x').take(20).collect();
        let text = format!("{}\nab", long);
        let caption = Caption::text_at(Position::Top, text.as_str());
        let config = Config{fit: Fit::PerLine, ..Config::default()};
        let lines = layout(&caption, 100, 300, &half_em, &config);
        assert_that!(sizes(&lines)).is_equal_to(vec![11, 48]);
    }

    #[test]
    fn uniform_fit() {
        let long: String = ::std::iter::repeat('x').take(20).collect();
        let text = format!("ab\n{}", long);
        let caption = Caption::text_at(Position::Top, text.as_str());
        let config = Config{fit: Fit::Uniform, ..Config::default()};
        let lines = layout(&caption, 100, 300, &half_em, &config);
        assert_that!(sizes(&lines)).is_equal_to(vec![11, 11]);
    }

    #[test]
    fn shrinking_is_bounded() {
        let long: String = ::std::iter::repeat('x').take(1000).collect();
        let caption = Caption::text_at(Position::Top, long.as_str());
        let lines = layout(&caption, 100, 300, &half_em, &Config::default());
        assert_eq!(Config::default().min_font_size, lines[0].font_size);
    }

    #[test]
    fn extreme_anchor_saturates() {
        let top = Caption::text_at(Position::Top, "a\nb").with_y(i32::max_value() - 5);
        let lines = layout(&top, 500, 300, &half_em, &Config::default());
        assert_that!(ys(&lines)).is_equal_to(vec![i32::max_value() - 5, i32::max_value()]);

        let bottom = Caption::text_at(Position::Bottom, "a\nb").with_y(i32::min_value() + 5);
        let lines = layout(&bottom, 500, 300, &half_em, &Config::default());
        assert_that!(ys(&lines)).is_equal_to(vec![i32::min_value(), i32::min_value() + 5]);
    }

    #[test]
    fn extreme_font_size_saturates() {
        let caption = Caption::text_at(Position::Top, "\n").with_font_size(u32::max_value());
        let lines = layout(&caption, 500, 300, &half_em, &Config::default());
        assert_that!(sizes(&lines)).is_equal_to(vec![u32::max_value(), u32::max_value()]);
        assert_that!(ys(&lines)).is_equal_to(vec![i32::max_value(), i32::max_value()]);
    }
}
