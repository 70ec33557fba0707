//! Module defining the drawing surface & the image sources bound to it.

mod binder;
mod error;
mod source;

pub use self::binder::{bind, resolve, Binding};
pub use self::error::BindError;
pub use self::source::{CrossOrigin, ImageRef, ImageSource};


use std::fmt;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use image::imageops::{self, FilterType};


/// Raster target that memes are composited onto.
///
/// Besides its current pixel size, a surface may carry a *declared* size,
/// fixed when it was constructed. If present, images bound to the surface
/// are scaled to it, rather than the surface adapting to the image.
#[derive(Clone)]
pub struct Surface {
    buffer: RgbaImage,
    declared: Option<(u32, u32)>,
}

impl Surface {
    /// Create a transparent surface of given pixel size.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Surface{buffer: RgbaImage::new(width, height), declared: None}
    }

    /// Create a transparent surface with the size declared up front.
    #[inline]
    pub fn declared(width: u32, height: u32) -> Self {
        Surface{buffer: RgbaImage::new(width, height), declared: Some((width, height))}
    }
}

impl Surface {
    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Size declared when creating the surface, if any.
    #[inline]
    pub fn declared_size(&self) -> Option<(u32, u32)> {
        self.declared
    }

    /// Change the pixel size of the surface.
    ///
    /// As with HTML canvas, this discards the current content.
    pub fn resize(&mut self, width: u32, height: u32) {
        trace!("Resizing surface from {}x{} to {}x{}",
            self.width(), self.height(), width, height);
        self.buffer = RgbaImage::new(width, height);
    }

    /// Make the whole surface transparent again.
    pub fn clear(&mut self) {
        for p in self.buffer.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.buffer
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.buffer
    }

    #[inline]
    pub fn into_image(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.buffer)
    }
}

impl Surface {
    /// Paint an image at the surface origin, scaled to given size.
    ///
    /// Parts that don't fit the surface are clipped.
    pub fn draw_image(&mut self, img: &DynamicImage, width: u32, height: u32) {
        let (orig_width, orig_height) = img.dimensions();
        let rgba = if (orig_width, orig_height) != (width, height) {
            debug!("Scaling image from {}x{} to {}x{}",
                orig_width, orig_height, width, height);
            img.resize_exact(width, height, FilterType::Lanczos3).to_rgba8()
        } else {
            img.to_rgba8()
        };
        imageops::overlay(&mut self.buffer, &rgba, 0, 0);
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("Surface");
        ds.field("width", &self.width());
        ds.field("height", &self.height());
        if let Some(ref declared) = self.declared {
            ds.field("declared", declared);
        }
        ds.finish()
    }
}
