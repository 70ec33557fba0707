//!
//! memer  -- Captions on demand
//!

             extern crate antidote;
             extern crate base64;
#[macro_use] extern crate enum_derive;
             extern crate glob;
             extern crate image;
             extern crate imageproc;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate macro_attr;
#[macro_use] extern crate maplit;
             extern crate mime;
#[macro_use] extern crate newtype_derive;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate try_opt;


#[cfg(test)]              extern crate serde_json;
#[cfg(test)] #[macro_use] extern crate spectral;


mod caption;
mod config;
mod events;
mod layout;
mod model;
mod resources;
mod surface;
mod text;


pub use caption::*;
pub use config::{Config, Fit};
pub use events::{Event, EventBus, Subscription, SubscriptionId};
pub use layout::{layout, LineLayout};
pub use model::*;
pub use resources::*;
pub use surface::{Binding, BindError, CrossOrigin, ImageRef, ImageSource, Surface};
pub use text::{Coverage, Rasterizer, TextMeasure};
