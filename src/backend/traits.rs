//! Native call surface the texture adapter drives.
//!
//! Both the `glow` backend and the in-memory software backend implement this.
//! The methods mirror the OpenGL entry points one to one; enum arguments are the
//! raw values from [`consts`](super::consts).

use std::fmt::Debug;

/// The subset of an OpenGL context used by textures.
///
/// All calls act on the texture bound to `target` on the active texture unit,
/// exactly like the native API.
pub trait GlContext {
    /// Native texture object name.
    type Texture: Copy + Eq + Debug;

    /// `glGenTextures` for a single name.
    fn create_texture(&mut self) -> Result<Self::Texture, String>;

    /// `glDeleteTextures` for a single name.
    fn delete_texture(&mut self, texture: Self::Texture);

    /// `glActiveTexture(GL_TEXTURE0 + unit)`.
    fn active_texture(&mut self, unit: u32);

    /// `glBindTexture`. `None` binds the default texture.
    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>);

    /// `glTexParameteri`.
    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32);

    /// `glHint`.
    fn hint(&mut self, target: u32, mode: u32);

    /// `glEnable`.
    fn enable(&mut self, capability: u32);

    /// `glPixelStorei`.
    fn pixel_store_i32(&mut self, parameter: u32, value: i32);

    /// `glTexImage2D`. `None` allocates storage without initial data.
    #[allow(clippy::too_many_arguments)]
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
    );

    /// `glTexSubImage2D`.
    #[allow(clippy::too_many_arguments)]
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
    );

    /// `glCompressedTexImage2D`. The image size is `data.len()`.
    fn compressed_tex_image_2d(
        &mut self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        data: &[u8],
    );

    /// `glCompressedTexSubImage2D`.
    #[allow(clippy::too_many_arguments)]
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
    );

    /// `glGenerateMipmap`.
    fn generate_mipmap(&mut self, target: u32);

    /// `glGetTexImage` into `pixels`.
    fn get_tex_image(&mut self, target: u32, level: i32, format: u32, ty: u32, pixels: &mut [u8]);

    /// `glGetError`.
    fn get_error(&mut self) -> u32;
}
