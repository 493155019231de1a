//! Driver: capabilities, texture creation flags and shared context state.
//!
//! The driver owns the native context and the texture binding cache. Textures
//! do not hold on to it; every texture operation borrows the driver for the
//! duration of the call.

mod binding;

pub use binding::{ScopedTextureBinding, TextureCache};

use bitflags::bitflags;

use crate::backend::{consts, GlContext};
use crate::cpu_image::Image;
use crate::types::{ColorFormat, Dimension2d};

bitflags! {
    /// Driver-level features relevant to textures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DriverFeatures: u32 {
        /// The driver can regenerate mip levels itself.
        const MIP_MAP_AUTO_UPDATE = 1 << 0;
        /// Framebuffer objects (and with them `glGenerateMipmap`) are available.
        const FRAMEBUFFER_OBJECT = 1 << 1;
        /// Textures may have non-power-of-two sizes.
        const TEXTURE_NPOT = 1 << 2;
        /// S3TC/DXT compressed textures can be uploaded.
        const TEXTURE_COMPRESSED_DXT = 1 << 3;
    }
}

bitflags! {
    /// OpenGL extensions the format mapper and readback path look at.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GlExtensions: u32 {
        const ARB_TEXTURE_RG = 1 << 0;
        const ARB_TEXTURE_FLOAT = 1 << 1;
        const ARB_HALF_FLOAT_PIXEL = 1 << 2;
        const EXT_PACKED_DEPTH_STENCIL = 1 << 3;
        const MESA_PACK_INVERT = 1 << 4;
        const SGIS_GENERATE_MIPMAP = 1 << 5;
    }
}

bitflags! {
    /// Flags that shape how new textures are created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureCreationFlags: u32 {
        /// Store textures with 16 bits per texel where possible.
        const ALWAYS_16_BIT = 1 << 0;
        /// Never demote 16-bit sources below 32 bits.
        const ALWAYS_32_BIT = 1 << 1;
        /// Prefer quality in driver hints.
        const OPTIMIZED_FOR_QUALITY = 1 << 2;
        /// Prefer speed in driver hints and texel formats.
        const OPTIMIZED_FOR_SPEED = 1 << 3;
        /// Give new textures a mip chain.
        const CREATE_MIP_MAPS = 1 << 4;
        /// Drop the alpha channel from new textures.
        const NO_ALPHA_CHANNEL = 1 << 5;
        /// Keep the uploaded CPU image alive after upload.
        const KEEP_CPU_COPY = 1 << 6;
    }
}

/// Capabilities and settings of a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// GL version as `major * 100 + minor`, e.g. `210` for 2.1.
    pub version: u16,
    /// Largest texture side the driver accepts.
    pub max_texture_size: u32,
    /// Supported driver features.
    pub features: DriverFeatures,
    /// Supported extensions.
    pub extensions: GlExtensions,
    /// Texture creation flags in effect.
    pub creation_flags: TextureCreationFlags,
    /// Map plain RGB/RGBA internal formats to their sRGB variants.
    pub handle_srgb: bool,
    /// Color format of the back buffer, used for render targets without an explicit format.
    pub color_format: ColorFormat,
    /// Number of texture units tracked by the binding cache.
    pub texture_units: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            version: 300,
            max_texture_size: 4096,
            features: DriverFeatures::all(),
            extensions: GlExtensions::ARB_TEXTURE_RG
                | GlExtensions::ARB_TEXTURE_FLOAT
                | GlExtensions::ARB_HALF_FLOAT_PIXEL
                | GlExtensions::EXT_PACKED_DEPTH_STENCIL,
            creation_flags: TextureCreationFlags::ALWAYS_32_BIT
                | TextureCreationFlags::CREATE_MIP_MAPS
                | TextureCreationFlags::KEEP_CPU_COPY,
            handle_srgb: false,
            color_format: ColorFormat::A8R8G8B8,
            texture_units: 8,
        }
    }
}

impl DriverConfig {
    /// Set the GL version (`major * 100 + minor`).
    pub fn with_version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    /// Set the maximum texture size.
    pub fn with_max_texture_size(mut self, size: u32) -> Self {
        self.max_texture_size = size;
        self
    }

    /// Replace the feature set.
    pub fn with_features(mut self, features: DriverFeatures) -> Self {
        self.features = features;
        self
    }

    /// Replace the extension set.
    pub fn with_extensions(mut self, extensions: GlExtensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Replace the texture creation flags.
    pub fn with_creation_flags(mut self, flags: TextureCreationFlags) -> Self {
        self.creation_flags = flags;
        self
    }

    /// Enable or disable sRGB internal formats.
    pub fn with_srgb(mut self, handle_srgb: bool) -> Self {
        self.handle_srgb = handle_srgb;
        self
    }

    /// Set the back buffer color format.
    pub fn with_color_format(mut self, format: ColorFormat) -> Self {
        self.color_format = format;
        self
    }

    /// Set the number of tracked texture units.
    pub fn with_texture_units(mut self, units: u32) -> Self {
        self.texture_units = units;
        self
    }
}

/// A rendering context plus everything textures need to know about it.
#[derive(Debug)]
pub struct Driver<C: GlContext> {
    gl: C,
    config: DriverConfig,
    texture_cache: TextureCache<C::Texture>,
}

impl<C: GlContext> Driver<C> {
    /// Wrap a native context.
    pub fn new(gl: C, config: DriverConfig) -> Self {
        log::debug!(
            "creating driver: GL version {}, max texture size {}, {} texture units",
            config.version,
            config.max_texture_size,
            config.texture_units
        );
        let texture_cache = TextureCache::new(config.texture_units.max(1));
        Self {
            gl,
            config,
            texture_cache,
        }
    }

    /// The native context.
    pub fn gl(&self) -> &C {
        &self.gl
    }

    /// The native context, mutably.
    ///
    /// Binding textures directly bypasses the binding cache; use
    /// [`Driver::set_texture`] for that.
    pub fn gl_mut(&mut self) -> &mut C {
        &mut self.gl
    }

    /// Driver settings.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Returns true if every feature in `feature` is supported.
    pub fn query_feature(&self, feature: DriverFeatures) -> bool {
        self.config.features.contains(feature)
    }

    /// Returns true if every extension in `extension` is available.
    pub fn query_gl_feature(&self, extension: GlExtensions) -> bool {
        self.config.extensions.contains(extension)
    }

    /// Returns true if the creation flag is set.
    pub fn texture_creation_flag(&self, flag: TextureCreationFlags) -> bool {
        self.config.creation_flags.contains(flag)
    }

    /// Set or clear a creation flag for textures created from now on.
    ///
    /// `ALWAYS_16_BIT` and `ALWAYS_32_BIT` exclude each other; enabling one clears the other.
    pub fn set_texture_creation_flag(&mut self, flag: TextureCreationFlags, enabled: bool) {
        if enabled {
            if flag.contains(TextureCreationFlags::ALWAYS_16_BIT) {
                self.config
                    .creation_flags
                    .remove(TextureCreationFlags::ALWAYS_32_BIT);
            }
            if flag.contains(TextureCreationFlags::ALWAYS_32_BIT) {
                self.config
                    .creation_flags
                    .remove(TextureCreationFlags::ALWAYS_16_BIT);
            }
        }
        self.config.creation_flags.set(flag, enabled);
    }

    /// Largest texture side the driver accepts.
    pub fn max_texture_size(&self) -> u32 {
        self.config.max_texture_size
    }

    /// GL version as `major * 100 + minor`.
    pub fn version(&self) -> u16 {
        self.config.version
    }

    /// Returns true if sRGB internal formats are in use.
    pub fn handle_srgb(&self) -> bool {
        self.config.handle_srgb
    }

    /// Color format of the back buffer.
    pub fn color_format(&self) -> ColorFormat {
        self.config.color_format
    }

    /// Allocate a zeroed CPU image.
    pub fn create_image(&self, format: ColorFormat, size: Dimension2d) -> Image {
        Image::new(format, size)
    }

    /// The binding cache.
    pub fn texture_cache(&self) -> &TextureCache<C::Texture> {
        &self.texture_cache
    }

    /// Texture bound to `unit`, as tracked by the cache.
    pub fn bound_texture(&self, unit: u32) -> Option<C::Texture> {
        self.texture_cache.get(unit)
    }

    /// Bind `texture` to `unit` through the cache.
    pub fn set_texture(&mut self, unit: u32, texture: Option<C::Texture>) -> bool {
        self.texture_cache.set(&mut self.gl, unit, texture)
    }

    /// Forget `texture` in every unit, unbinding it natively.
    pub fn remove_texture(&mut self, texture: C::Texture) {
        self.texture_cache.remove(&mut self.gl, texture);
    }

    /// Check for a pending native error and log it.
    ///
    /// Returns true if an error was pending.
    pub fn test_gl_error(&mut self) -> bool {
        let code = self.gl.get_error();
        if code == consts::NO_ERROR {
            return false;
        }
        log::error!("GL error: {} ({:#06x})", consts::error_name(code), code);
        true
    }

    /// Give back the native context.
    pub fn into_inner(self) -> C {
        self.gl
    }
}
