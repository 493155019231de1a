//! Pushing CPU images to the GPU.

use super::{GlFormat, Texture};
use crate::backend::{consts, GlContext};
use crate::cpu_image::Image;
use crate::driver::{Driver, DriverFeatures, GlExtensions, ScopedTextureBinding, TextureCreationFlags};
use crate::types::{MipStrategy, TextureKind};

impl<C: GlContext> Texture<C> {
    /// Upload the CPU image for `level` (the main image for level 0, the mip
    /// image otherwise).
    ///
    /// A new texture gets full storage and, for level 0, its mip strategy and
    /// mip chain. Existing textures are updated in place and keep their
    /// internal format.
    pub(super) fn upload(
        &mut self,
        driver: &mut Driver<C>,
        new_texture: bool,
        mip_data: Option<&[u8]>,
        level: u32,
    ) {
        let Some(handle) = self.handle else {
            return;
        };
        let has_image = if level == 0 {
            self.image.is_some()
        } else {
            self.mip_image.is_some()
        };
        if !has_image {
            log::error!("no image for texture '{}' to upload", self.name);
            return;
        }

        let old_internal_format = self.gl_format.internal_format;
        self.gl_format = GlFormat::from_color_format(self.color_format, driver.config());
        if !new_texture {
            self.gl_format.internal_format = old_internal_format;
        }

        let mut gl = ScopedTextureBinding::new(driver, handle);
        if gl.test_gl_error() {
            log::error!("could not bind texture '{}'", self.name);
        }

        if level == 0 && new_texture {
            self.select_mip_strategy(&mut gl, mip_data.is_some());

            // bilinear without mipmaps until the chain exists
            let native = gl.gl_mut();
            native.tex_parameter_i32(
                consts::TEXTURE_2D,
                consts::TEXTURE_MIN_FILTER,
                consts::LINEAR as i32,
            );
            native.tex_parameter_i32(
                consts::TEXTURE_2D,
                consts::TEXTURE_MAG_FILTER,
                consts::LINEAR as i32,
            );
            self.states.bilinear_filter = true;
            self.states.trilinear_filter = false;
            self.states.mip_map_status = false;
        }

        let image = if level == 0 {
            self.image.as_deref()
        } else {
            self.mip_image.as_ref()
        };
        if let Some(image) = image {
            upload_image(
                gl.gl_mut(),
                image,
                self.gl_format,
                self.kind == TextureKind::Compressed,
                new_texture,
                level,
            );
        }
        log::trace!(
            "uploaded level {} of texture '{}' ({})",
            level,
            self.name,
            if new_texture { "new" } else { "update" }
        );

        if level == 0 && new_texture {
            let main = self.image.clone();
            let image_chain = main.as_deref().and_then(Image::mip_map_data);
            let mip_data = if self.kind == TextureKind::Compressed && mip_data.is_none() {
                if image_chain.is_none() {
                    self.mip_strategy = MipStrategy::None;
                }
                image_chain
            } else {
                mip_data
            };

            self.regenerate_bound(&mut gl, mip_data);

            if self.mip_strategy.has_mip_maps() {
                let native = gl.gl_mut();
                native.tex_parameter_i32(
                    consts::TEXTURE_2D,
                    consts::TEXTURE_MIN_FILTER,
                    consts::LINEAR_MIPMAP_NEAREST as i32,
                );
                native.tex_parameter_i32(
                    consts::TEXTURE_2D,
                    consts::TEXTURE_MAG_FILTER,
                    consts::LINEAR as i32,
                );
                self.states.bilinear_filter = true;
                self.states.trilinear_filter = false;
                self.states.mip_map_status = true;
            }
        }

        if gl.test_gl_error() {
            log::error!("could not upload texture '{}'", self.name);
        }
    }

    /// Let the driver build mipmaps when it can and no levels were supplied.
    fn select_mip_strategy(&mut self, driver: &mut Driver<C>, has_mip_data: bool) {
        if self.kind == TextureKind::Compressed
            || !self.mip_strategy.has_mip_maps()
            || has_mip_data
            || !driver.query_feature(DriverFeatures::MIP_MAP_AUTO_UPDATE)
        {
            return;
        }

        let hint = if driver.texture_creation_flag(TextureCreationFlags::OPTIMIZED_FOR_SPEED) {
            consts::FASTEST
        } else if driver.texture_creation_flag(TextureCreationFlags::OPTIMIZED_FOR_QUALITY) {
            consts::NICEST
        } else {
            consts::DONT_CARE
        };

        if driver.query_feature(DriverFeatures::FRAMEBUFFER_OBJECT) {
            driver.gl_mut().hint(consts::GENERATE_MIPMAP_HINT, hint);
            self.mip_strategy = MipStrategy::HardwareFbo;
        } else if driver.query_gl_feature(GlExtensions::SGIS_GENERATE_MIPMAP) {
            let gl = driver.gl_mut();
            gl.hint(consts::GENERATE_MIPMAP_HINT, hint);
            gl.tex_parameter_i32(consts::TEXTURE_2D, consts::GENERATE_MIPMAP, 1);
            self.mip_strategy = MipStrategy::HardwareLegacy;
        }
        log::trace!(
            "texture '{}' uses {:?} mipmaps",
            self.name,
            self.mip_strategy
        );
    }
}

/// Issue the native upload call for one level of `image`.
fn upload_image<C: GlContext>(
    gl: &mut C,
    image: &Image,
    format: GlFormat,
    compressed: bool,
    new_texture: bool,
    level: u32,
) {
    let size = image.dimension();
    let (width, height) = (size.width as i32, size.height as i32);
    let level = level as i32;
    let data = image.data();

    match (compressed, new_texture) {
        (true, true) => {
            let len = image.color_format().data_size(size).min(data.len());
            gl.compressed_tex_image_2d(
                consts::TEXTURE_2D,
                level,
                format.internal_format as i32,
                width,
                height,
                &data[..len],
            );
        }
        (true, false) => {
            let len = image.color_format().data_size(size).min(data.len());
            gl.compressed_tex_sub_image_2d(
                consts::TEXTURE_2D,
                level,
                0,
                0,
                width,
                height,
                format.pixel_format,
                &data[..len],
            );
        }
        (false, true) => gl.tex_image_2d(
            consts::TEXTURE_2D,
            level,
            format.internal_format as i32,
            width,
            height,
            format.pixel_format,
            format.pixel_type,
            Some(data),
        ),
        (false, false) => gl.tex_sub_image_2d(
            consts::TEXTURE_2D,
            level,
            0,
            0,
            width,
            height,
            format.pixel_format,
            format.pixel_type,
            data,
        ),
    }
}
