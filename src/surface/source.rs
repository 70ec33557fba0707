//! Module implementing the image sources that can be bound to a surface.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{self, DynamicImage, GenericImageView, ImageResult};

use super::error::BindError;


/// Reference to an image, in one of the forms it can be supplied in.
pub enum ImageRef {
    /// Path to an image file.
    Path(PathBuf),
    /// Encoded image bytes (in any format the `image` crate can guess).
    Bytes(Vec<u8>),
    /// Image that is already decoded.
    Decoded(DynamicImage),
}

impl<'p> From<&'p str> for ImageRef {
    fn from(input: &'p str) -> Self {
        ImageRef::Path(input.into())
    }
}
impl<'p> From<&'p Path> for ImageRef {
    fn from(input: &'p Path) -> Self {
        ImageRef::Path(input.to_owned())
    }
}
impl From<PathBuf> for ImageRef {
    fn from(input: PathBuf) -> Self {
        ImageRef::Path(input)
    }
}
impl From<Vec<u8>> for ImageRef {
    fn from(input: Vec<u8>) -> Self {
        ImageRef::Bytes(input)
    }
}
impl From<DynamicImage> for ImageRef {
    fn from(input: DynamicImage) -> Self {
        ImageRef::Decoded(input)
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ImageRef::Path(ref p) => write!(fmt, "ImageRef::Path({})", p.display()),
            ImageRef::Bytes(ref b) => write!(fmt, "ImageRef::Bytes(<{} bytes>)", b.len()),
            ImageRef::Decoded(ref img) => {
                let (width, height) = img.dimensions();
                write!(fmt, "ImageRef::Decoded({}x{})", width, height)
            }
        }
    }
}


/// Policy for reading pixels of images coming from other origins.
///
/// Bound images are always marked `Anonymous`, so that the rendered
/// surface can be read back for snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossOrigin {
    /// Image pixels may be read back without credentials.
    Anonymous,
}


/// Image drawn as the background of the meme.
///
/// Sources start out either already loaded (when created from a decoded image)
/// or pending, in which case they become loaded exactly once,
/// when the decoded image is delivered via `complete`.
pub struct ImageSource {
    state: State,
    size: Option<(u32, u32)>,
    pub(crate) cross_origin: Option<CrossOrigin>,
}

enum State {
    Pending(ImageRef),
    Loaded(DynamicImage),
}

impl ImageSource {
    /// Resolve an image reference into an image source.
    ///
    /// Only the shape of the reference is checked here;
    /// whether it actually decodes is only known after `decode`.
    pub fn resolve<R: Into<ImageRef>>(image_ref: R) -> Result<Self, BindError> {
        let state = match image_ref.into() {
            ImageRef::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(BindError::EmptyPath);
                }
                State::Pending(ImageRef::Path(path))
            }
            ImageRef::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(BindError::InvalidHandle("no image data".into()));
                }
                State::Pending(ImageRef::Bytes(bytes))
            }
            ImageRef::Decoded(img) => {
                let (width, height) = img.dimensions();
                if width == 0 || height == 0 {
                    return Err(BindError::InvalidHandle(
                        format!("image has no pixels ({}x{})", width, height)));
                }
                State::Loaded(img)
            }
        };
        Ok(ImageSource{state, size: None, cross_origin: None})
    }

    /// Create an image source from a decoded image.
    #[inline]
    pub fn loaded(img: DynamicImage) -> Result<Self, BindError> {
        Self::resolve(ImageRef::Decoded(img))
    }
}

impl ImageSource {
    #[inline]
    pub fn is_loaded(&self) -> bool {
        match self.state { State::Loaded(..) => true, _ => false }
    }

    /// The decoded image, if it's been loaded.
    #[inline]
    pub fn image(&self) -> Option<&DynamicImage> {
        match self.state { State::Loaded(ref img) => Some(img), _ => None }
    }

    /// Original size of the image, known only once it's loaded.
    #[inline]
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image().map(|img| img.dimensions())
    }

    /// Size the image is drawn at.
    ///
    /// Unless changed by binding to a surface, this is the natural size.
    #[inline]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size.or_else(|| self.natural_size())
    }

    #[inline]
    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    #[inline]
    pub fn cross_origin(&self) -> Option<CrossOrigin> {
        self.cross_origin
    }
}

impl ImageSource {
    /// Decode the image this (pending) source refers to.
    ///
    /// Decoding doesn't change the source; deliver the result via `complete`.
    pub fn decode(&self) -> ImageResult<DynamicImage> {
        match self.state {
            State::Loaded(ref img) => Ok(img.clone()),
            State::Pending(ImageRef::Path(ref path)) => {
                trace!("Opening image {}", path.display());
                image::open(path)
            }
            State::Pending(ImageRef::Bytes(ref bytes)) => {
                trace!("Decoding image from {} bytes", bytes.len());
                image::load_from_memory(bytes)
            }
            State::Pending(ImageRef::Decoded(ref img)) => Ok(img.clone()),
        }
    }

    /// Mark the source as loaded with given decoded image.
    ///
    /// Returns false (and leaves the source intact) if it was already loaded.
    pub fn complete(&mut self, img: DynamicImage) -> bool {
        if self.is_loaded() {
            return false;
        }
        self.state = State::Loaded(img);
        true
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("ImageSource");
        match self.state {
            State::Pending(ref r) => { ds.field("pending", r); }
            State::Loaded(..) => { ds.field("natural_size", &self.natural_size()); }
        }
        if let Some(ref size) = self.size {
            ds.field("size", size);
        }
        ds.finish()
    }
}
