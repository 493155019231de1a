//! Mip chain regeneration.

use super::Texture;
use crate::backend::{consts, GlContext};
use crate::cpu_image::Image;
use crate::driver::{Driver, ScopedTextureBinding};
use crate::types::{Dimension2d, MipStrategy, TextureKind};

impl<C: GlContext> Texture<C> {
    /// Rebuild mip levels 1.. of the texture.
    ///
    /// With `mip_data` the levels are taken from it, packed back to back.
    /// Without it the driver generates them when it can; otherwise they are
    /// resampled from the CPU image. Compressed textures need `mip_data`.
    pub fn regenerate_mip_map_levels(&mut self, driver: &mut Driver<C>, mip_data: Option<&[u8]>) {
        let Some(handle) = self.handle else {
            return;
        };
        let mut gl = ScopedTextureBinding::new(driver, handle);
        self.regenerate_bound(&mut gl, mip_data);
        if gl.test_gl_error() {
            log::error!("could not regenerate mipmaps of texture '{}'", self.name);
        }
    }

    /// Mip regeneration with this texture already bound.
    pub(super) fn regenerate_bound(&mut self, driver: &mut Driver<C>, mip_data: Option<&[u8]>) {
        if !self.mip_strategy.has_mip_maps() {
            return;
        }
        let image = self.image.clone();

        if mip_data.is_none() {
            if self.kind == TextureKind::Compressed {
                return;
            }
            match self.mip_strategy {
                // the driver rebuilt the chain during the level-0 upload
                MipStrategy::HardwareLegacy => return,
                MipStrategy::HardwareFbo => {
                    let gl = driver.gl_mut();
                    gl.enable(consts::TEXTURE_2D);
                    gl.generate_mipmap(consts::TEXTURE_2D);
                    log::trace!("generated mipmaps of '{}' on the GPU", self.name);
                    return;
                }
                _ => {}
            }
            match image.as_deref() {
                Some(image) if image.dimension() != Dimension2d::new(1, 1) => {}
                _ => return,
            }
        }

        let compressed = self.kind == TextureKind::Compressed;
        let base = image.as_deref().map_or(self.size, Image::dimension);
        let bytes_per_pixel = image
            .as_deref()
            .map_or(self.color_format.bytes_per_pixel(), Image::bytes_per_pixel)
            as usize;
        let format = self.gl_format;

        if base.is_empty() {
            return;
        }

        let mut scratch = Vec::new();
        let mut offset = 0;
        let mut size = base;
        let mut level = 0;
        loop {
            size = size.next_mip_level();
            level += 1;
            let len = if compressed {
                self.color_format.data_size(size)
            } else {
                size.area() * bytes_per_pixel
            };

            let texels: &[u8] = match (mip_data, image.as_deref()) {
                (Some(data), _) => match data.get(offset..offset + len) {
                    Some(texels) => texels,
                    None => {
                        log::error!(
                            "mip data of texture '{}' ends before level {} ({} bytes given)",
                            self.name,
                            level,
                            data.len()
                        );
                        break;
                    }
                },
                (None, Some(image)) => {
                    scratch.resize(len, 0);
                    if !image.copy_to_scaling_raw(
                        &mut scratch,
                        size.width,
                        size.height,
                        image.color_format(),
                    ) {
                        break;
                    }
                    &scratch
                }
                (None, None) => break,
            };
            offset += len;

            let gl = driver.gl_mut();
            if compressed {
                gl.compressed_tex_image_2d(
                    consts::TEXTURE_2D,
                    level,
                    format.internal_format as i32,
                    size.width as i32,
                    size.height as i32,
                    texels,
                );
            } else {
                gl.tex_image_2d(
                    consts::TEXTURE_2D,
                    level,
                    format.internal_format as i32,
                    size.width as i32,
                    size.height as i32,
                    format.pixel_format,
                    format.pixel_type,
                    Some(texels),
                );
            }

            if size.width <= 1 && size.height <= 1 {
                break;
            }
        }
        log::trace!("uploaded {} mip levels of '{}'", level, self.name);
    }
}
