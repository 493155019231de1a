//! GPU texture objects.
//!
//! A [`Texture`] owns one native texture object plus, optionally, a CPU mirror
//! of its base level. It is created either from a CPU [`Image`] or as an empty
//! render target, and afterwards supports lock/unlock cycles for CPU access and
//! mip chain regeneration.
//!
//! Textures do not hold the driver. Every operation takes `&mut Driver<C>` and
//! binds through the driver's binding cache, restoring the previous binding
//! before it returns. A texture must be released with [`Texture::destroy`].

mod format;
mod lock;
mod mipmap;
mod upload;

pub use format::{best_color_format, GlFormat};

use format::render_target_has_alpha;

use std::sync::Arc;

use crate::backend::{consts, GlContext};
use crate::cpu_image::Image;
use crate::driver::{Driver, DriverFeatures, ScopedTextureBinding, TextureCreationFlags};
use crate::error::{TextureError, TextureResult};
use crate::types::{
    ColorFormat, Dimension2d, LockMode, MipStrategy, TextureKind, TextureStates, WrapMode,
};

/// Bookkeeping for an active lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LockState {
    pub level: u32,
    pub mode: LockMode,
    /// The locked buffer is in flipped row order and must be flipped back before upload.
    pub flip_rows: bool,
}

/// A native texture object and its CPU-side state.
pub struct Texture<C: GlContext> {
    name: String,
    original_size: Dimension2d,
    size: Dimension2d,
    pitch: u32,
    color_format: ColorFormat,
    gl_format: GlFormat,
    handle: Option<C::Texture>,
    image: Option<Arc<Image>>,
    mip_image: Option<Image>,
    kind: TextureKind,
    mip_strategy: MipStrategy,
    has_alpha: bool,
    keep_cpu_copy: bool,
    lock: Option<LockState>,
    states: TextureStates,
}

impl<C: GlContext> Texture<C> {
    /// Create a texture from a CPU image and upload it.
    ///
    /// The image is clamped to the driver's maximum texture size and, if the
    /// driver lacks non-power-of-two support, rescaled to power-of-two sides.
    /// Block-compressed images are uploaded as-is and must already have an
    /// acceptable size. `mip_data` holds levels 1.. back to back.
    pub fn from_image(
        driver: &mut Driver<C>,
        name: impl Into<String>,
        source: &Arc<Image>,
        mip_data: Option<&[u8]>,
    ) -> TextureResult<Self> {
        let name = name.into();
        let source_size = source.dimension();
        if source_size.is_empty() {
            log::error!("invalid size of image for texture '{}': {}", name, source_size);
            return Err(TextureError::InvalidImageSize(source_size));
        }

        let original_size = source_size.clamped_to(driver.max_texture_size());
        if original_size.is_empty() {
            log::error!(
                "image for texture '{}' clamps to an empty size: {} -> {}",
                name,
                source_size,
                original_size
            );
            return Err(TextureError::InvalidImageSize(original_size));
        }
        let size =
            original_size.optimal_size(!driver.query_feature(DriverFeatures::TEXTURE_NPOT));
        let source_format = source.color_format();
        let color_format = if source_format.is_compressed() {
            source_format
        } else {
            best_color_format(source_format, driver.config().creation_flags)
        };

        let mip_strategy = if driver.texture_creation_flag(TextureCreationFlags::CREATE_MIP_MAPS) {
            MipStrategy::Manual
        } else {
            MipStrategy::None
        };

        let (kind, image, keep_cpu_copy) = if color_format.is_compressed() {
            if !driver.query_feature(DriverFeatures::TEXTURE_COMPRESSED_DXT) {
                log::error!("DXT texture compression not available for '{}'", name);
                return Err(TextureError::CompressionUnsupported);
            }
            if original_size != size || source_size != size {
                log::error!(
                    "invalid size of image for compressed texture '{}': {} would need {}",
                    name,
                    source_size,
                    size
                );
                return Err(TextureError::InvalidCompressedSize {
                    original: source_size,
                    optimal: size,
                });
            }
            (TextureKind::Compressed, Arc::clone(source), false)
        } else {
            let mut image = driver.create_image(color_format, size);
            if source_size == size {
                source.copy_to(&mut image);
            } else {
                source.copy_to_scaling(&mut image);
            }
            let keep = driver.texture_creation_flag(TextureCreationFlags::KEEP_CPU_COPY);
            (TextureKind::Standard, Arc::new(image), keep)
        };

        let handle = create_handle(driver, &name)?;
        let mut texture = Self {
            name,
            original_size,
            size,
            pitch: image.pitch(),
            color_format,
            gl_format: GlFormat::default(),
            handle: Some(handle),
            image: Some(image),
            mip_image: None,
            kind,
            mip_strategy,
            has_alpha: color_format.has_alpha(),
            keep_cpu_copy,
            lock: None,
            states: TextureStates::default(),
        };
        log::debug!(
            "creating texture '{}': {} -> {} as {:?}",
            texture.name,
            source_size,
            size,
            color_format
        );

        texture.upload(driver, true, mip_data, 0);
        if !texture.keep_cpu_copy {
            texture.image = None;
        }
        Ok(texture)
    }

    /// Create an empty texture the GPU renders into.
    ///
    /// `ColorFormat::Unknown` picks the best match for the back buffer format.
    pub fn render_target(
        driver: &mut Driver<C>,
        name: impl Into<String>,
        size: Dimension2d,
        format: ColorFormat,
    ) -> TextureResult<Self> {
        let name = name.into();
        if size.is_empty() {
            log::error!("invalid render target size for '{}': {}", name, size);
            return Err(TextureError::InvalidRenderTargetSize(size));
        }
        let color_format = match format {
            ColorFormat::Unknown => {
                best_color_format(driver.color_format(), driver.config().creation_flags)
            }
            other => other,
        };
        let gl_format = GlFormat::from_color_format(color_format, driver.config());
        let handle = create_handle(driver, &name)?;

        let states = TextureStates {
            wrap_u: WrapMode::ClampToEdge,
            wrap_v: WrapMode::ClampToEdge,
            bilinear_filter: gl_format.filtering != consts::NEAREST,
            ..TextureStates::default()
        };

        {
            let mut gl = ScopedTextureBinding::new(driver, handle);
            let native = gl.gl_mut();
            native.tex_parameter_i32(
                consts::TEXTURE_2D,
                consts::TEXTURE_MIN_FILTER,
                gl_format.filtering as i32,
            );
            native.tex_parameter_i32(
                consts::TEXTURE_2D,
                consts::TEXTURE_WRAP_S,
                consts::CLAMP_TO_EDGE as i32,
            );
            native.tex_parameter_i32(
                consts::TEXTURE_2D,
                consts::TEXTURE_WRAP_T,
                consts::CLAMP_TO_EDGE as i32,
            );
            native.tex_image_2d(
                consts::TEXTURE_2D,
                0,
                gl_format.internal_format as i32,
                size.width as i32,
                size.height as i32,
                gl_format.pixel_format,
                gl_format.pixel_type,
                None,
            );
            if gl.test_gl_error() {
                log::error!("could not allocate render target '{}'", name);
            }
        }
        log::debug!(
            "created render target '{}': {} as {:?}",
            name,
            size,
            color_format
        );

        Ok(Self {
            name,
            original_size: size,
            size,
            pitch: size.width * color_format.bytes_per_pixel(),
            color_format,
            gl_format,
            handle: Some(handle),
            image: None,
            mip_image: None,
            kind: TextureKind::RenderTarget,
            mip_strategy: MipStrategy::None,
            has_alpha: render_target_has_alpha(color_format),
            keep_cpu_copy: false,
            lock: None,
            states,
        })
    }

    /// Release the native texture.
    ///
    /// The texture is first removed from every unit of the binding cache, then
    /// the native object is deleted and finally the CPU copies are dropped.
    pub fn destroy(mut self, driver: &mut Driver<C>) {
        if let Some(handle) = self.handle.take() {
            driver.remove_texture(handle);
            driver.gl_mut().delete_texture(handle);
            log::debug!("destroyed texture '{}'", self.name);
        }
        self.mip_image = None;
        self.image = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size requested by the source, after clamping to the driver maximum.
    pub fn original_size(&self) -> Dimension2d {
        self.original_size
    }

    /// Size of the GPU storage.
    pub fn size(&self) -> Dimension2d {
        self.size
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn color_format(&self) -> ColorFormat {
        self.color_format
    }

    /// Native format used for uploads.
    pub fn gl_format(&self) -> GlFormat {
        self.gl_format
    }

    /// Native texture object, `None` once destroyed.
    pub fn handle(&self) -> Option<C::Texture> {
        self.handle
    }

    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    pub fn mip_strategy(&self) -> MipStrategy {
        self.mip_strategy
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn has_mip_maps(&self) -> bool {
        self.mip_strategy.has_mip_maps()
    }

    pub fn is_render_target(&self) -> bool {
        self.kind == TextureKind::RenderTarget
    }

    pub fn is_compressed(&self) -> bool {
        self.kind == TextureKind::Compressed
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Returns true if the CPU image outlives uploads.
    pub fn keeps_cpu_copy(&self) -> bool {
        self.keep_cpu_copy
    }

    /// CPU mirror of level 0, if one is held.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_deref()
    }

    /// Filter and wrap state last applied to this texture.
    pub fn states(&self) -> &TextureStates {
        &self.states
    }

    /// Mutable state cache, for renderers that apply sampler state themselves.
    pub fn states_mut(&mut self) -> &mut TextureStates {
        &mut self.states
    }
}

impl<C: GlContext> std::fmt::Debug for Texture<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("color_format", &self.color_format)
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("mip_strategy", &self.mip_strategy)
            .finish_non_exhaustive()
    }
}

impl<C: GlContext> Drop for Texture<C> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle {
            log::warn!(
                "texture '{}' dropped without destroy, native texture {:?} leaked",
                self.name,
                handle
            );
        }
    }
}

fn create_handle<C: GlContext>(driver: &mut Driver<C>, name: &str) -> TextureResult<C::Texture> {
    driver.gl_mut().create_texture().map_err(|err| {
        log::error!("could not create texture object for '{}': {}", name, err);
        TextureError::HandleCreationFailed(err)
    })
}
