//! Common utilities for texture integration tests.
//!
//! Every test runs against [`SoftwareContext`]; helpers here build drivers with
//! specific capability sets and produce test images through the `image` crate.

#![allow(dead_code)]

use std::sync::Arc;

use gl_texture::backend::GlCall;
use gl_texture::{
    ColorFormat, Dimension2d, Driver, DriverConfig, DriverFeatures, GlExtensions, Image,
    SoftwareContext, TextureCreationFlags,
};

/// Install a test logger once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Driver Profiles
// ============================================================================

/// Capability profiles used across the tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// GL 3.0 with framebuffer objects and every extension the mapper looks at.
    Modern,
    /// GL 1.4 style driver: legacy automatic mipmaps, power-of-two textures only.
    Legacy,
    /// No automatic mipmaps at all; chains are built on the CPU.
    Minimal,
}

impl Profile {
    pub fn config(self) -> DriverConfig {
        let flags = TextureCreationFlags::ALWAYS_32_BIT | TextureCreationFlags::CREATE_MIP_MAPS;
        match self {
            Profile::Modern => DriverConfig::default().with_creation_flags(flags),
            Profile::Legacy => DriverConfig::default()
                .with_version(104)
                .with_features(DriverFeatures::MIP_MAP_AUTO_UPDATE)
                .with_extensions(GlExtensions::SGIS_GENERATE_MIPMAP)
                .with_creation_flags(flags),
            Profile::Minimal => DriverConfig::default()
                .with_features(DriverFeatures::TEXTURE_NPOT)
                .with_extensions(GlExtensions::empty())
                .with_creation_flags(flags),
        }
    }
}

/// A driver for `profile`.
pub fn driver(profile: Profile) -> Driver<SoftwareContext> {
    init_logging();
    Driver::new(SoftwareContext::new(), profile.config())
}

/// A driver with an explicit configuration.
pub fn driver_with(config: DriverConfig) -> Driver<SoftwareContext> {
    init_logging();
    Driver::new(SoftwareContext::new(), config)
}

// ============================================================================
// Test Images
// ============================================================================

/// Checkerboard of `cell`-sized red and blue squares, decoded through the `image` crate.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Arc<Image> {
    let rgba = image::RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    });
    Arc::new(Image::from(&image::DynamicImage::ImageRgba8(rgba)))
}

/// Image whose red channel encodes the row index and green channel the column.
pub fn row_pattern(width: u32, height: u32) -> Arc<Image> {
    let rgba = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([y as u8, x as u8, 0, 255])
    });
    Arc::new(Image::from(&image::DynamicImage::ImageRgba8(rgba)))
}

/// A DXT1 image of `size` filled with a recognizable byte pattern.
pub fn dxt1(size: Dimension2d) -> Arc<Image> {
    let len = ColorFormat::Dxt1.data_size(size);
    let data = (0..len).map(|i| i as u8).collect();
    Arc::new(Image::from_data(ColorFormat::Dxt1, size, data).expect("valid DXT1 data"))
}

// ============================================================================
// Call Log Helpers
// ============================================================================

/// Position of the first recorded call matching `predicate`.
pub fn position(calls: &[GlCall], predicate: impl Fn(&GlCall) -> bool) -> Option<usize> {
    calls.iter().position(predicate)
}

/// Number of recorded calls matching `predicate`.
pub fn count(calls: &[GlCall], predicate: impl Fn(&GlCall) -> bool) -> usize {
    calls.iter().filter(|call| predicate(call)).count()
}
