//! # gl-texture
//!
//! OpenGL texture objects for a rendering engine.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`Texture`] - A native texture created from a CPU [`Image`] or as a render target,
//!   with format negotiation, mip chain generation and lock/unlock for CPU access
//! - [`Driver`] - Capabilities, texture creation flags and the texture binding cache
//! - [`GlContext`] - The native call surface, implemented by the in-memory
//!   [`SoftwareContext`] and, with the `glow-backend` feature, by `GlowContext`
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use gl_texture::{ColorFormat, Dimension2d, Driver, DriverConfig, Image, LockMode, SoftwareContext, Texture};
//!
//! let mut driver = Driver::new(SoftwareContext::new(), DriverConfig::default());
//! let image = Arc::new(Image::new(ColorFormat::A8R8G8B8, Dimension2d::new(64, 64)));
//! let mut texture = Texture::from_image(&mut driver, "checker", &image, None)?;
//!
//! if let Some(texels) = texture.lock(&mut driver, LockMode::ReadWrite, 0) {
//!     texels[..4].copy_from_slice(&[0, 0, 255, 255]);
//! }
//! texture.unlock(&mut driver);
//! texture.destroy(&mut driver);
//! # Ok::<(), gl_texture::TextureError>(())
//! ```

pub mod backend;
pub mod cpu_image;
pub mod driver;
pub mod error;
pub mod texture;
pub mod types;

// Re-export main types for convenience
pub use backend::{GlContext, SoftwareContext};
#[cfg(feature = "glow-backend")]
pub use backend::GlowContext;
pub use cpu_image::{Color, Image};
pub use driver::{
    Driver, DriverConfig, DriverFeatures, GlExtensions, ScopedTextureBinding, TextureCache,
    TextureCreationFlags,
};
pub use error::{TextureError, TextureResult};
pub use texture::{best_color_format, GlFormat, Texture};
pub use types::{
    ColorFormat, Dimension2d, LockMode, MipStrategy, TextureKind, TextureStates, WrapMode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the texture subsystem.
///
/// Only logs the version; the crate never installs a logger itself.
pub fn init() {
    log::info!("gl-texture v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init() {
        init();
    }
}
