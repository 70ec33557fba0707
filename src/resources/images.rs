//! Module for loading the background images that captions go over.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use image::ImageFormat;

use surface::ImageSource;
use super::Loader;
use super::filesystem::PathLoader;


lazy_static! {
    /// Map of image file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "gif" => ImageFormat::Gif,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}


/// Loader of background images stored as files in a directory.
///
/// Loaded images are pending sources that still need to be decoded.
#[derive(Debug)]
pub struct ImageLoader {
    inner: PathLoader,
}

impl ImageLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        ImageLoader{
            inner: PathLoader::for_extensions(directory, IMAGE_FORMAT_EXTENSIONS.keys()),
        }
    }

    /// Image format of given file, as guessed from its extension.
    pub fn format_of<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
        let extension = path.as_ref().extension().and_then(|e| e.to_str())
            .map(|s| s.trim().to_lowercase());
        extension.and_then(|ext| IMAGE_FORMAT_EXTENSIONS.get(ext.as_str()).cloned())
    }
}

impl Loader for ImageLoader {
    type Item = ImageSource;
    type Err = io::Error;

    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        let path = self.inner.load(name)?;
        trace!("Image `{}` found at {}", name, path.display());
        ImageSource::resolve(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }
}
