//! Module which defines the captioning session.

use std::fmt;

use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

use config::Config;
use events::{Event, EventBus, Subscription};
use layout::{layout, LineLayout};
use model::{Caption, Position};
use resources::Font;
use surface::{self, Binding, ImageSource, Surface};
use text::Rasterizer;
use super::error::CaptionError;
use super::output::CaptionOutput;
use super::render;


/// Captioning session.
///
/// Owns the surface that memes are rendered onto, the image bound to it,
/// and the event bus that signals when the image has loaded
/// and when rendering has finished.
pub struct Captioner<R: Rasterizer = Font> {
    rasterizer: R,
    config: Config,
    surface: Surface,
    image: Option<ImageSource>,
    events: EventBus,
}

// Constructors.
impl<R: Rasterizer> Captioner<R> {
    /// Create a session that renders onto given surface, using default configuration.
    #[inline]
    pub fn new(surface: Surface, rasterizer: R) -> Self {
        Self::with_config(surface, rasterizer, Config::default())
    }

    pub fn with_config(surface: Surface, rasterizer: R, config: Config) -> Self {
        Captioner{rasterizer, config, surface, image: None, events: EventBus::new()}
    }
}

// Accessors.
impl<R: Rasterizer> Captioner<R> {
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    #[inline]
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Image that's bound to the surface, if any.
    #[inline]
    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    #[inline]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Register a callback for given captioning event.
    #[inline]
    pub fn on<F>(&self, event: Event, callback: F) -> Subscription
        where F: Fn() + Send + Sync + 'static
    {
        self.events.subscribe(event, callback)
    }

    /// Unregister a callback previously registered with `on`.
    #[inline]
    pub fn off(&self, subscription: &Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }
}

// Binding the image.
impl<R: Rasterizer> Captioner<R> {
    /// Bind an image to the session's surface.
    ///
    /// If the image is already loaded, dimensions are negotiated
    /// and the `ImageLoad` event fires immediately. Otherwise, this happens
    /// once the decoded image is delivered through `image_decoded`
    /// (or `load_image`).
    pub fn set_image(&mut self, mut image: ImageSource) -> Binding {
        let binding = surface::bind(&mut self.surface, &mut image);
        self.image = Some(image);
        if let Binding::Ready(width, height) = binding {
            debug!("Bound image is ready at {}x{}", width, height);
            self.events.emit(Event::ImageLoad);
        }
        binding
    }

    /// Deliver the decoded image for a pending image source.
    ///
    /// Returns the size the image will be drawn at.
    pub fn image_decoded(&mut self, img: DynamicImage) -> Result<(u32, u32), CaptionError> {
        let size = {
            let image = self.image.as_mut().ok_or(CaptionError::ImageNotReady)?;
            if !image.complete(img) {
                warn!("Image {:?} was already loaded, ignoring another decoded image", image);
                return Err(CaptionError::AlreadyLoaded);
            }
            surface::resolve(&mut self.surface, image).ok_or(CaptionError::ImageNotReady)?
        };
        debug!("Bound image has loaded at {}x{}", size.0, size.1);
        self.events.emit(Event::ImageLoad);
        Ok(size)
    }

    /// Decode the pending image source synchronously and deliver the result.
    pub fn load_image(&mut self) -> Result<(u32, u32), CaptionError> {
        let img = {
            let image = self.image.as_ref().ok_or(CaptionError::ImageNotReady)?;
            if image.is_loaded() {
                return Err(CaptionError::AlreadyLoaded);
            }
            image.decode().map_err(|e| {
                error!("Failed to decode image {:?}: {}", image, e);
                CaptionError::Decode(e)
            })?
        };
        self.image_decoded(img)
    }
}

// Rendering.
impl<R: Rasterizer> Captioner<R> {
    /// Render the image with given top & bottom captions.
    ///
    /// Missing captions are treated as empty.
    /// Returns the layout of all the lines that were drawn,
    /// top caption's lines first.
    pub fn render(&mut self, top: Option<&str>, bottom: Option<&str>)
                  -> Result<Vec<LineLayout>, CaptionError> {
        let captions = [
            Caption::text_at(Position::Top, top.unwrap_or("")),
            Caption::text_at(Position::Bottom, bottom.unwrap_or("")),
        ];
        self.render_captions(&captions)
    }

    /// Render the image with arbitrary captions.
    ///
    /// The `AfterRender` event fires once all of them have been drawn.
    pub fn render_captions(&mut self, captions: &[Caption]) -> Result<Vec<LineLayout>, CaptionError> {
        let (img, (width, height)) = match self.image {
            Some(ref image) => match (image.image(), image.size()) {
                (Some(img), Some(size)) => (img, size),
                _ => return Err(CaptionError::ImageNotReady),
            },
            None => return Err(CaptionError::ImageNotReady),
        };
        debug!("Rendering {} caption(s) over {}x{} image", captions.len(), width, height);

        self.surface.clear();
        self.surface.draw_image(img, width, height);

        let (surface_width, surface_height) = self.surface.dimensions();
        let mut lines = Vec::new();
        for caption in captions {
            let caption_lines = layout(
                caption, surface_width, surface_height, &self.rasterizer, &self.config);
            for line in &caption_lines {
                render::draw_line(self.surface.pixels_mut(), line, &self.rasterizer, &self.config);
            }
            lines.extend(caption_lines);
        }

        self.events.emit(Event::AfterRender);
        Ok(lines)
    }
}

// Exporting.
impl<R: Rasterizer> Captioner<R> {
    /// Encode the current content of the surface in given image format.
    ///
    /// Only PNG & JPEG are supported.
    pub fn snapshot(&self, format: ImageFormat) -> Result<CaptionOutput, CaptionError> {
        let (width, height) = self.surface.dimensions();
        let mut bytes = Vec::new();
        let result = match format {
            ImageFormat::Png => {
                trace!("Encoding {}x{} surface as PNG", width, height);
                PngEncoder::new(&mut bytes).write_image(
                    self.surface.pixels().as_raw(), width, height, ExtendedColorType::Rgba8)
            }
            ImageFormat::Jpeg => {
                let quality = self.config.jpeg_quality;
                trace!("Encoding {}x{} surface as JPEG (quality: {})", width, height, quality);
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgba8(self.surface.pixels().clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
                    rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            }
            f => return Err(CaptionError::UnsupportedFormat(f)),
        };
        result.map_err(|e| {
            error!("Failed to encode the surface as {:?}: {}", format, e);
            CaptionError::Encode(e)
        })?;
        Ok(CaptionOutput::new(format, bytes))
    }
}

impl<R: Rasterizer> fmt::Debug for Captioner<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Captioner")
            .field("config", &self.config)
            .field("surface", &self.surface)
            .field("image", &self.image)
            .field("events", &self.events)
            .finish()
    }
}
