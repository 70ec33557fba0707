//! Module defining the model types.

mod caption;
mod color;
mod position;

pub use self::caption::Caption;
pub use self::color::Color;
pub use self::position::Position;
