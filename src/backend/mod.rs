//! Native graphics API abstraction.
//!
//! # Available Backends
//!
//! - `software` (always built): in-memory OpenGL emulation for tests and headless tools
//! - `glow-backend`: real OpenGL through the `glow` crate
//!
//! Each backend implements [`GlContext`], the handful of texture entry points
//! the texture object drives.

pub mod consts;
pub mod software;
pub mod traits;

#[cfg(feature = "glow-backend")]
pub mod glow_backend;

pub use software::{GlCall, SoftwareContext, SoftwareLevel, SoftwareTexture, TextureObject};
pub use traits::*;

#[cfg(feature = "glow-backend")]
pub use glow_backend::GlowContext;
