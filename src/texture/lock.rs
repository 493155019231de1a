//! CPU access to texture levels.
//!
//! `lock` hands out the CPU buffer for one level, reading it back from the
//! GPU when no trustworthy CPU copy exists. `unlock` pushes writes back and
//! releases temporary buffers.
//!
//! Level 0 is read back with its rows reversed against GPU storage, last
//! uploaded row first. Buffers created by `lock` are flipped back before they
//! are uploaded again, so a write followed by another lock sees the written
//! rows in place. Mip levels are read back unflipped.

use std::sync::Arc;

use super::{LockState, Texture};
use crate::backend::{consts, GlContext};
use crate::cpu_image::Image;
use crate::driver::{Driver, GlExtensions, ScopedTextureBinding};
use crate::types::{ColorFormat, LockMode, MipStrategy, TextureKind};

impl<C: GlContext> Texture<C> {
    /// Lock mip `level` for CPU access.
    ///
    /// Returns the level's texels, in the texture's current
    /// [`color_format`](Texture::color_format), or `None` for compressed
    /// textures and when already locked.
    pub fn lock(&mut self, driver: &mut Driver<C>, mode: LockMode, level: u32) -> Option<&mut [u8]> {
        if self.kind == TextureKind::Compressed {
            log::debug!("compressed texture '{}' cannot be locked", self.name);
            return None;
        }
        let handle = self.handle?;
        if let Some(lock) = self.lock {
            log::warn!(
                "texture '{}' is already locked at level {}",
                self.name,
                lock.level
            );
            return None;
        }

        if mode.writes() && level > 0 {
            // edited levels must not be overwritten by the driver
            if self.mip_strategy == MipStrategy::HardwareLegacy {
                let mut gl = ScopedTextureBinding::new(driver, handle);
                gl.gl_mut()
                    .tex_parameter_i32(consts::TEXTURE_2D, consts::GENERATE_MIPMAP, 0);
            }
            if self.mip_strategy.is_automatic() {
                self.mip_strategy = MipStrategy::Manual;
            }
        }

        let has_copy = if level == 0 {
            self.image.is_some()
        } else {
            self.mip_image.is_some()
        };
        let mut flip_rows = false;
        if !has_copy || self.kind == TextureKind::RenderTarget {
            if !has_copy {
                let format = ColorFormat::A8R8G8B8;
                if level == 0 {
                    self.image = Some(Arc::new(driver.create_image(format, self.size)));
                } else {
                    let size = self.size.mip_level(level);
                    self.mip_image = Some(driver.create_image(format, size));
                }
                self.color_format = format;
                flip_rows = level == 0;
            }
            if mode.reads() {
                self.read_back(driver, handle, level);
            }
        }

        self.lock = Some(LockState {
            level,
            mode,
            flip_rows,
        });
        log::trace!("locked level {} of texture '{}' ({:?})", level, self.name, mode);

        if level == 0 {
            self.image
                .as_mut()
                .map(|image| Arc::make_mut(image).data_mut())
        } else {
            self.mip_image.as_mut().map(Image::data_mut)
        }
    }

    /// Release the lock, uploading the level unless it was locked read-only.
    pub fn unlock(&mut self, driver: &mut Driver<C>) {
        if self.kind == TextureKind::Compressed {
            return;
        }
        let Some(lock) = self.lock.take() else {
            log::warn!("texture '{}' unlocked without a lock", self.name);
            return;
        };

        if lock.mode.writes() {
            if lock.flip_rows {
                if let Some(image) = self.image.as_mut() {
                    Arc::make_mut(image).flip_vertical();
                }
            }
            self.upload(driver, false, None, lock.level);
        }

        if lock.level > 0 {
            self.mip_image = None;
        } else if !self.keep_cpu_copy {
            self.image = None;
        }
        self.color_format = self
            .image
            .as_deref()
            .map_or(ColorFormat::A8R8G8B8, Image::color_format);
        log::trace!("unlocked level {} of texture '{}'", lock.level, self.name);
    }

    /// Download `level` from the GPU into its CPU buffer.
    fn read_back(&mut self, driver: &mut Driver<C>, handle: C::Texture, level: u32) {
        let pack_invert = level == 0 && driver.query_gl_feature(GlExtensions::MESA_PACK_INVERT);
        let image = if level == 0 {
            self.image.as_mut().map(Arc::make_mut)
        } else {
            self.mip_image.as_mut()
        };
        let Some(image) = image else {
            return;
        };

        let mut gl = ScopedTextureBinding::new(driver, handle);
        if pack_invert {
            gl.gl_mut().pixel_store_i32(consts::PACK_INVERT_MESA, 1);
        }
        gl.gl_mut().get_tex_image(
            consts::TEXTURE_2D,
            level as i32,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            image.data_mut(),
        );
        if pack_invert {
            gl.gl_mut().pixel_store_i32(consts::PACK_INVERT_MESA, 0);
        } else if level == 0 {
            image.flip_vertical();
        }
        if gl.test_gl_error() {
            log::error!("could not read back level {} of texture '{}'", level, self.name);
        }
        log::trace!("read back level {} of texture '{}'", level, self.name);
    }
}
