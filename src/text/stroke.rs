//! Mask operations used for the stroke & shadow treatment of text.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{dilate, erode};


/// Extend the mask with transparent margin of given size on every side.
pub fn pad(mask: &GrayImage, margin: u32) -> GrayImage {
    let mut result = GrayImage::new(mask.width() + 2 * margin, mask.height() + 2 * margin);
    for (x, y, p) in mask.enumerate_pixels() {
        result.put_pixel(x + margin, y + margin, *p);
    }
    result
}

/// Compute the band that a stroke of given width traces along the mask's contour.
///
/// Like a vector stroke, the band straddles the contour:
/// half of it lies outside of the glyphs, half inside.
pub fn outline(mask: &GrayImage, width: f32) -> GrayImage {
    let half = (width / 2.0).max(0.0);
    let outer = dilate(mask, Norm::LInf, half.ceil() as u8);
    let inner = erode(mask, Norm::LInf, half.floor() as u8);

    let mut band = outer;
    for (b, i) in band.pixels_mut().zip(inner.pixels()) {
        if i[0] > 0 {
            *b = Luma([0]);
        }
    }
    band
}

/// Soften the mask with a gaussian blur of given radius.
///
/// The radius is interpreted as twice the standard deviation,
/// same as the shadow blur of 2D canvas contexts.
pub fn blur(mask: &GrayImage, radius: f32) -> GrayImage {
    if radius <= 0.0 {
        return mask.clone();
    }
    gaussian_blur_f32(mask, radius / 2.0)
}
