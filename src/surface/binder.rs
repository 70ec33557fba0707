//! Module negotiating dimensions between a surface & an image bound to it.

use super::Surface;
use super::source::{CrossOrigin, ImageSource};


/// Outcome of binding an image source to a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Image was already loaded; dimensions are final.
    /// Contains the size the image will be drawn at.
    Ready(u32, u32),
    /// Image is still loading.
    /// Dimensions will be negotiated by `resolve` once it's decoded.
    Pending,
}

impl Binding {
    #[inline]
    pub fn is_ready(&self) -> bool {
        match *self { Binding::Ready(..) => true, _ => false }
    }
}


/// Associate an image source with a surface.
///
/// If the image is already decoded, its dimensions are negotiated right away.
pub fn bind(surface: &mut Surface, image: &mut ImageSource) -> Binding {
    // Allow reading back the pixels of images from foreign origins,
    // so that the rendered surface can always be exported.
    image.cross_origin = Some(CrossOrigin::Anonymous);

    if image.is_loaded() {
        match resolve(surface, image) {
            Some((width, height)) => Binding::Ready(width, height),
            None => Binding::Pending,
        }
    } else {
        debug!("Image {:?} not loaded yet, deferring size negotiation", image);
        Binding::Pending
    }
}

/// Negotiate the dimensions of surface & a loaded image.
///
/// If the surface has a declared size, the image is scaled to it
/// (and the surface is left untouched). Otherwise, the surface
/// is resized to match the natural size of the image.
///
/// Returns the size the image will be drawn at,
/// or `None` if the image isn't loaded.
pub fn resolve(surface: &mut Surface, image: &mut ImageSource) -> Option<(u32, u32)> {
    let (natural_width, natural_height) = try_opt!(image.natural_size());

    match surface.declared_size() {
        Some((width, height)) => {
            debug!("Scaling {}x{} image to declared surface size of {}x{}",
                natural_width, natural_height, width, height);
            image.set_size(width, height);
        }
        None => {
            debug!("Resizing surface to natural image size of {}x{}",
                natural_width, natural_height);
            surface.resize(natural_width, natural_height);
            image.set_size(natural_width, natural_height);
        }
    }
    image.size()
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};
    use spectral::prelude::*;

    use surface::{CrossOrigin, ImageSource, Surface};
    use super::{bind, resolve, Binding};

    fn image_of(width: u32, height: u32) -> ImageSource {
        ImageSource::loaded(DynamicImage::ImageRgba8(RgbaImage::new(width, height))).unwrap()
    }

    #[test]
    fn declared_surface_scales_image() {
        for &(w, h) in [(64, 64), (1000, 20), (3, 700)].iter() {
            let mut surface = Surface::declared(400, 300);
            let mut image = image_of(w, h);

            let binding = bind(&mut surface, &mut image);

            assert_that!(binding).is_equal_to(Binding::Ready(400, 300));
            assert_that!(image.size()).is_equal_to(Some((400, 300)));
            assert_that!(image.natural_size()).is_equal_to(Some((w, h)));
            assert_that!(surface.dimensions()).is_equal_to((400, 300));
        }
    }

    #[test]
    fn undeclared_surface_takes_image_size() {
        for &(w, h) in [(64, 64), (1000, 20), (500, 300)].iter() {
            let mut surface = Surface::new(300, 150);
            let mut image = image_of(w, h);

            let binding = bind(&mut surface, &mut image);

            assert_that!(binding).is_equal_to(Binding::Ready(w, h));
            assert_that!(surface.dimensions()).is_equal_to((w, h));
        }
    }

    #[test]
    fn pending_image_defers_negotiation() {
        let mut surface = Surface::new(300, 150);
        let mut image = ImageSource::resolve("meme.png").unwrap();

        assert_that!(bind(&mut surface, &mut image)).is_equal_to(Binding::Pending);
        assert_that!(image.cross_origin()).is_equal_to(Some(CrossOrigin::Anonymous));
        assert_that!(surface.dimensions()).is_equal_to((300, 150));
        assert_that!(resolve(&mut surface, &mut image)).is_none();

        image.complete(DynamicImage::ImageRgba8(RgbaImage::new(120, 80)));
        assert_that!(resolve(&mut surface, &mut image)).is_equal_to(Some((120, 80)));
        assert_that!(surface.dimensions()).is_equal_to((120, 80));
    }
}
