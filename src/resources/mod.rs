//! Module handling the resources used for rendering memes.

mod filesystem;
mod fonts;
mod images;


pub use self::filesystem::{BytesLoader, PathLoader};
pub use self::fonts::{Font, FontError, FontLoader, FILE_EXTENSION as FONT_FILE_EXTENSION};
pub use self::images::{ImageLoader, IMAGE_FORMAT_EXTENSIONS};


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err>;
}
