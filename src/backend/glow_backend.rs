//! OpenGL backend on top of `glow`.
//!
//! Requires the `glow-backend` feature and a context that is current on the
//! calling thread for the whole lifetime of the wrapper.

use glow::HasContext;

use super::{consts, GlContext};
use crate::driver::{DriverConfig, DriverFeatures, GlExtensions};

/// A live `glow` context.
pub struct GlowContext {
    gl: glow::Context,
}

impl GlowContext {
    /// Wrap a context. The context must stay current while this wrapper is used.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Access the raw context.
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }
}

impl std::fmt::Debug for GlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version = self.gl.version();
        f.debug_struct("GlowContext")
            .field("major", &version.major)
            .field("minor", &version.minor)
            .finish_non_exhaustive()
    }
}

// SAFETY (all blocks below): glow exposes raw GL entry points as unsafe. The
// wrapper is only constructed around a current context and every pointer
// argument is a live slice whose length matches the size passed alongside it.
impl GlContext for GlowContext {
    type Texture = glow::Texture;

    fn create_texture(&mut self) -> Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn delete_texture(&mut self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { self.gl.active_texture(consts::TEXTURE0 + unit) }
    }

    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(target, texture) }
    }

    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(target, parameter, value) }
    }

    fn hint(&mut self, target: u32, mode: u32) {
        unsafe { self.gl.hint(target, mode) }
    }

    fn enable(&mut self, capability: u32) {
        unsafe { self.gl.enable(capability) }
    }

    fn pixel_store_i32(&mut self, parameter: u32, value: i32) {
        unsafe { self.gl.pixel_store_i32(parameter, value) }
    }

    fn tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) {
        unsafe {
            self.gl.tex_image_2d(
                target,
                level,
                internal_format,
                width,
                height,
                0,
                format,
                ty,
                glow::PixelUnpackData::Slice(pixels),
            )
        }
    }

    fn tex_sub_image_2d(
        &mut self,
        target: u32,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &[u8],
    ) {
        unsafe {
            self.gl.tex_sub_image_2d(
                target,
                level,
                x_offset,
                y_offset,
                width,
                height,
                format,
                ty,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn compressed_tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        data: &[u8],
    ) {
        unsafe {
            self.gl.compressed_tex_image_2d(
                target,
                level,
                internal_format,
                width,
                height,
                0,
                data.len() as i32,
                data,
            )
        }
    }

    fn compressed_tex_sub_image_2d(
        &mut self,
        target: u32,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: u32,
        data: &[u8],
    ) {
        unsafe {
            self.gl.compressed_tex_sub_image_2d(
                target,
                level,
                x_offset,
                y_offset,
                width,
                height,
                format,
                glow::CompressedPixelUnpackData::Slice(data),
            )
        }
    }

    fn generate_mipmap(&mut self, target: u32) {
        unsafe { self.gl.generate_mipmap(target) }
    }

    fn get_tex_image(&mut self, target: u32, level: i32, format: u32, ty: u32, pixels: &mut [u8]) {
        unsafe {
            self.gl
                .get_tex_image(target, level, format, ty, glow::PixelPackData::Slice(Some(pixels)))
        }
    }

    fn get_error(&mut self) -> u32 {
        unsafe { self.gl.get_error() }
    }
}

impl DriverConfig {
    /// Read version, limits and extension support from a live context.
    ///
    /// Creation flags, sRGB handling and the back buffer format keep their defaults.
    pub fn detect(gl: &glow::Context) -> Self {
        let version = gl.version();
        let extensions = gl.supported_extensions();
        let has = |names: &[&str]| names.iter().any(|n| extensions.contains(*n));
        let at_least = |major: u32, minor: u32| (version.major, version.minor) >= (major, minor);

        let mut ext = GlExtensions::empty();
        ext.set(
            GlExtensions::ARB_TEXTURE_RG,
            at_least(3, 0) || has(&["GL_ARB_texture_rg"]),
        );
        ext.set(
            GlExtensions::ARB_TEXTURE_FLOAT,
            at_least(3, 0) || has(&["GL_ARB_texture_float"]),
        );
        ext.set(
            GlExtensions::ARB_HALF_FLOAT_PIXEL,
            at_least(3, 0) || has(&["GL_ARB_half_float_pixel"]),
        );
        ext.set(
            GlExtensions::EXT_PACKED_DEPTH_STENCIL,
            at_least(3, 0) || has(&["GL_EXT_packed_depth_stencil"]),
        );
        ext.set(GlExtensions::MESA_PACK_INVERT, has(&["GL_MESA_pack_invert"]));
        ext.set(
            GlExtensions::SGIS_GENERATE_MIPMAP,
            has(&["GL_SGIS_generate_mipmap"]),
        );

        let mut features = DriverFeatures::empty();
        features.set(
            DriverFeatures::FRAMEBUFFER_OBJECT,
            at_least(3, 0) || has(&["GL_ARB_framebuffer_object", "GL_EXT_framebuffer_object"]),
        );
        features.set(
            DriverFeatures::MIP_MAP_AUTO_UPDATE,
            features.contains(DriverFeatures::FRAMEBUFFER_OBJECT)
                || ext.contains(GlExtensions::SGIS_GENERATE_MIPMAP),
        );
        features.set(
            DriverFeatures::TEXTURE_NPOT,
            at_least(2, 0) || has(&["GL_ARB_texture_non_power_of_two"]),
        );
        features.set(
            DriverFeatures::TEXTURE_COMPRESSED_DXT,
            has(&["GL_EXT_texture_compression_s3tc"]),
        );

        let max_texture_size = unsafe { gl.get_parameter_i32(consts::MAX_TEXTURE_SIZE) };

        let config = DriverConfig::default()
            .with_version((version.major * 100 + version.minor) as u16)
            .with_max_texture_size(max_texture_size.max(1) as u32)
            .with_features(features)
            .with_extensions(ext);
        log::debug!(
            "detected GL {}.{}: max texture size {}, features {:?}, extensions {:?}",
            version.major,
            version.minor,
            config.max_texture_size,
            config.features,
            config.extensions
        );
        config
    }
}
