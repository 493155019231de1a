//! Value types used by images, drivers and textures.

mod color_format;
mod common;
mod texture;

pub use color_format::*;
pub use common::*;
pub use texture::*;
