//! Software GL backend for testing and headless tools.
//!
//! This backend keeps texture objects in memory and follows the OpenGL rules
//! the texture adapter depends on: per-unit bindings, level storage, sticky
//! error codes, `GL_GENERATE_MIPMAP`, `glGenerateMipmap` and
//! `GL_PACK_INVERT_MESA`. Every call is recorded so tests can check ordering.

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;

use super::consts;
use super::GlContext;
use crate::cpu_image::convert_texels;
use crate::types::ColorFormat;

/// Texture name handed out by [`SoftwareContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoftwareTexture(NonZeroU32);

impl SoftwareTexture {
    /// Raw texture name.
    pub fn id(&self) -> u32 {
        self.0.get()
    }
}

/// A recorded native call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlCall {
    CreateTexture(SoftwareTexture),
    DeleteTexture(SoftwareTexture),
    ActiveTexture(u32),
    BindTexture(Option<SoftwareTexture>),
    TexParameter { parameter: u32, value: i32 },
    Hint { target: u32, mode: u32 },
    Enable(u32),
    PixelStore { parameter: u32, value: i32 },
    TexImage2d {
        level: i32,
        width: i32,
        height: i32,
        internal_format: i32,
        with_data: bool,
    },
    TexSubImage2d { level: i32, width: i32, height: i32 },
    CompressedTexImage2d {
        level: i32,
        width: i32,
        height: i32,
        size: usize,
    },
    CompressedTexSubImage2d {
        level: i32,
        width: i32,
        height: i32,
        size: usize,
    },
    GenerateMipmap,
    GetTexImage { level: i32 },
}

/// One stored mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareLevel {
    pub width: u32,
    pub height: u32,
    pub internal_format: i32,
    /// Client format the data was specified in (the internal format for compressed levels).
    pub format: u32,
    /// Client type the data was specified in (0 for compressed levels).
    pub ty: u32,
    pub compressed: bool,
    pub data: Vec<u8>,
}

/// State of one texture object.
#[derive(Debug, Clone, Default)]
pub struct TextureObject {
    levels: BTreeMap<i32, SoftwareLevel>,
    parameters: HashMap<u32, i32>,
}

impl TextureObject {
    /// Stored data for `level`.
    pub fn level(&self, level: i32) -> Option<&SoftwareLevel> {
        self.levels.get(&level)
    }

    /// Number of defined levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Sizes of all defined levels, base first.
    pub fn level_sizes(&self) -> Vec<(u32, u32)> {
        self.levels.values().map(|l| (l.width, l.height)).collect()
    }

    /// Last value set for a texture parameter.
    pub fn parameter(&self, parameter: u32) -> Option<i32> {
        self.parameters.get(&parameter).copied()
    }

    fn auto_generates(&self) -> bool {
        self.parameter(consts::GENERATE_MIPMAP).unwrap_or(0) != 0
    }

    /// Rebuild levels 1.. from level 0 by point sampling.
    fn rebuild_chain(&mut self) -> bool {
        let Some(base) = self.levels.get(&0).cloned() else {
            return false;
        };
        if base.compressed {
            return false;
        }
        let Some(texel) = texel_size(base.format, base.ty) else {
            return false;
        };
        self.levels.retain(|&level, _| level == 0);

        let mut previous = base;
        let mut level = 0;
        while previous.width > 1 || previous.height > 1 {
            let width = (previous.width / 2).max(1);
            let height = (previous.height / 2).max(1);
            let mut data = Vec::with_capacity(width as usize * height as usize * texel);
            for y in 0..height {
                let sy = (y * 2).min(previous.height - 1) as usize;
                for x in 0..width {
                    let sx = (x * 2).min(previous.width - 1) as usize;
                    let offset = (sy * previous.width as usize + sx) * texel;
                    data.extend_from_slice(&previous.data[offset..offset + texel]);
                }
            }
            level += 1;
            let next = SoftwareLevel {
                width,
                height,
                data,
                ..previous.clone()
            };
            self.levels.insert(level, next.clone());
            previous = next;
        }
        true
    }
}

/// In-memory OpenGL context.
#[derive(Debug, Default)]
pub struct SoftwareContext {
    textures: HashMap<u32, TextureObject>,
    next_texture_id: u32,
    active_unit: u32,
    bindings: Vec<Option<SoftwareTexture>>,
    hints: HashMap<u32, u32>,
    enabled: Vec<u32>,
    pack_invert: bool,
    error: u32,
    calls: Vec<GlCall>,
}

impl SoftwareContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a live texture object.
    pub fn texture(&self, texture: SoftwareTexture) -> Option<&TextureObject> {
        self.textures.get(&texture.id())
    }

    /// Number of live texture objects.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Texture bound to `unit`.
    pub fn bound_texture(&self, unit: u32) -> Option<SoftwareTexture> {
        self.bindings.get(unit as usize).copied().flatten()
    }

    /// Currently active texture unit.
    pub fn active_unit(&self) -> u32 {
        self.active_unit
    }

    /// Mode last set for a hint target.
    pub fn hint_mode(&self, target: u32) -> Option<u32> {
        self.hints.get(&target).copied()
    }

    /// Returns true if `capability` was enabled.
    pub fn is_enabled(&self, capability: u32) -> bool {
        self.enabled.contains(&capability)
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<GlCall> {
        std::mem::take(&mut self.calls)
    }

    /// Raise an error as if the last call had failed.
    pub fn inject_error(&mut self, code: u32) {
        self.record_error(code);
    }

    /// Overwrite a level's texels directly, as rendering into the texture would.
    ///
    /// Returns false if the texture or level does not exist or `data` has the wrong size.
    pub fn write_level(&mut self, texture: SoftwareTexture, level: i32, data: &[u8]) -> bool {
        let Some(stored) = self
            .textures
            .get_mut(&texture.id())
            .and_then(|object| object.levels.get_mut(&level))
        else {
            return false;
        };
        if stored.data.len() != data.len() {
            return false;
        }
        stored.data.copy_from_slice(data);
        true
    }

    fn record_error(&mut self, code: u32) {
        // GL keeps the first error until it is queried
        if self.error == consts::NO_ERROR {
            self.error = code;
        }
    }

    fn bound_object(&mut self, target: u32) -> Option<&mut TextureObject> {
        if target != consts::TEXTURE_2D {
            self.record_error(consts::INVALID_ENUM);
            return None;
        }
        let Some(texture) = self.bound_texture(self.active_unit) else {
            self.record_error(consts::INVALID_OPERATION);
            return None;
        };
        self.textures.get_mut(&texture.id())
    }
}

/// Bytes per texel for a client format/type pair.
fn texel_size(format: u32, ty: u32) -> Option<usize> {
    match ty {
        consts::UNSIGNED_SHORT_5_6_5 | consts::UNSIGNED_SHORT_1_5_5_5_REV => return Some(2),
        consts::UNSIGNED_INT_8_8_8_8_REV | consts::UNSIGNED_INT_24_8 => return Some(4),
        _ => {}
    }
    let components = match format {
        consts::RED | consts::DEPTH_COMPONENT => 1,
        consts::RG => 2,
        consts::RGB | consts::BGR => 3,
        consts::RGBA | consts::BGRA => 4,
        _ => return None,
    };
    let component_size = match ty {
        consts::UNSIGNED_BYTE => 1,
        consts::UNSIGNED_SHORT | consts::HALF_FLOAT => 2,
        consts::FLOAT => 4,
        _ => return None,
    };
    Some(components * component_size)
}

/// Collapse format/type pairs with identical little-endian byte layout.
fn canonical_layout(format: u32, ty: u32) -> (u32, u32) {
    match (format, ty) {
        (consts::BGRA | consts::RGBA, consts::UNSIGNED_INT_8_8_8_8_REV) => {
            (format, consts::UNSIGNED_BYTE)
        }
        _ => (format, ty),
    }
}

/// Engine color format with the byte layout of a client format/type pair.
fn packed_color_format(format: u32, ty: u32) -> Option<ColorFormat> {
    match canonical_layout(format, ty) {
        (consts::BGRA, consts::UNSIGNED_BYTE) => Some(ColorFormat::A8R8G8B8),
        (consts::BGR, consts::UNSIGNED_BYTE) => Some(ColorFormat::R8G8B8),
        (consts::BGRA, consts::UNSIGNED_SHORT_1_5_5_5_REV) => Some(ColorFormat::A1R5G5B5),
        (consts::RGB, consts::UNSIGNED_SHORT_5_6_5) => Some(ColorFormat::R5G6B5),
        _ => None,
    }
}

/// Convert `count` texels between client layouts, as the GL does on pack and unpack.
///
/// Returns false if the pair has no conversion.
fn convert_layout(
    from: (u32, u32),
    src: &[u8],
    to: (u32, u32),
    dst: &mut [u8],
    count: usize,
) -> bool {
    let from = canonical_layout(from.0, from.1);
    let to = canonical_layout(to.0, to.1);
    if from == to {
        let Some(texel) = texel_size(from.0, from.1) else {
            return false;
        };
        let len = count * texel;
        dst[..len].copy_from_slice(&src[..len]);
        return true;
    }
    match (from, to) {
        ((consts::RGBA, consts::UNSIGNED_BYTE), (consts::BGRA, consts::UNSIGNED_BYTE))
        | ((consts::BGRA, consts::UNSIGNED_BYTE), (consts::RGBA, consts::UNSIGNED_BYTE)) => {
            for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)).take(count) {
                d.copy_from_slice(&[s[2], s[1], s[0], s[3]]);
            }
            true
        }
        _ => match (
            packed_color_format(from.0, from.1),
            packed_color_format(to.0, to.1),
        ) {
            (Some(src_format), Some(dst_format)) => {
                convert_texels(src_format, src, dst_format, dst, count)
            }
            _ => false,
        },
    }
}

impl GlContext for SoftwareContext {
    type Texture = SoftwareTexture;

    fn create_texture(&mut self) -> Result<Self::Texture, String> {
        self.next_texture_id = self
            .next_texture_id
            .checked_add(1)
            .ok_or_else(|| "texture name space exhausted".to_string())?;
        let id = NonZeroU32::new(self.next_texture_id)
            .ok_or_else(|| "texture name space exhausted".to_string())?;
        let texture = SoftwareTexture(id);
        self.textures.insert(id.get(), TextureObject::default());
        self.calls.push(GlCall::CreateTexture(texture));
        log::trace!("SoftwareContext: created texture {}", id);
        Ok(texture)
    }

    fn delete_texture(&mut self, texture: Self::Texture) {
        self.calls.push(GlCall::DeleteTexture(texture));
        if self.textures.remove(&texture.id()).is_none() {
            self.record_error(consts::INVALID_VALUE);
            return;
        }
        // deleting a bound texture reverts that unit to the default texture
        for binding in &mut self.bindings {
            if *binding == Some(texture) {
                *binding = None;
            }
        }
        log::trace!("SoftwareContext: deleted texture {}", texture.id());
    }

    fn active_texture(&mut self, unit: u32) {
        self.calls.push(GlCall::ActiveTexture(unit));
        self.active_unit = unit;
    }

    fn bind_texture(&mut self, target: u32, texture: Option<Self::Texture>) {
        self.calls.push(GlCall::BindTexture(texture));
        if target != consts::TEXTURE_2D {
            self.record_error(consts::INVALID_ENUM);
            return;
        }
        if let Some(texture) = texture {
            if !self.textures.contains_key(&texture.id()) {
                self.record_error(consts::INVALID_OPERATION);
                return;
            }
        }
        let unit = self.active_unit as usize;
        if self.bindings.len() <= unit {
            self.bindings.resize(unit + 1, None);
        }
        self.bindings[unit] = texture;
    }

    fn tex_parameter_i32(&mut self, target: u32, parameter: u32, value: i32) {
        self.calls.push(GlCall::TexParameter { parameter, value });
        if let Some(object) = self.bound_object(target) {
            object.parameters.insert(parameter, value);
        }
    }

    fn hint(&mut self, target: u32, mode: u32) {
        self.calls.push(GlCall::Hint { target, mode });
        self.hints.insert(target, mode);
    }

    fn enable(&mut self, capability: u32) {
        self.calls.push(GlCall::Enable(capability));
        if !self.enabled.contains(&capability) {
            self.enabled.push(capability);
        }
    }

    fn pixel_store_i32(&mut self, parameter: u32, value: i32) {
        self.calls.push(GlCall::PixelStore { parameter, value });
        if parameter == consts::PACK_INVERT_MESA {
            self.pack_invert = value != 0;
        }
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
        self.calls.push(GlCall::TexImage2d {
            level,
            width,
            height,
            internal_format,
            with_data: pixels.is_some(),
        });
        if level < 0 || width < 0 || height < 0 {
            self.record_error(consts::INVALID_VALUE);
            return;
        }
        let Some(texel) = texel_size(format, ty) else {
            self.record_error(consts::INVALID_ENUM);
            return;
        };
        let expected = width as usize * height as usize * texel;
        let data = match pixels {
            Some(pixels) if pixels.len() < expected => {
                self.record_error(consts::INVALID_VALUE);
                return;
            }
            Some(pixels) => pixels[..expected].to_vec(),
            None => vec![0; expected],
        };
        let Some(object) = self.bound_object(target) else {
            return;
        };
        object.levels.insert(
            level,
            SoftwareLevel {
                width: width as u32,
                height: height as u32,
                internal_format,
                format,
                ty,
                compressed: false,
                data,
            },
        );
        if level == 0 && object.auto_generates() {
            object.rebuild_chain();
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
        self.calls.push(GlCall::TexSubImage2d {
            level,
            width,
            height,
        });
        let Some(texel) = texel_size(format, ty) else {
            self.record_error(consts::INVALID_ENUM);
            return;
        };
        let Some(object) = self.bound_object(target) else {
            return;
        };
        let Some(stored) = object.levels.get_mut(&level) else {
            self.record_error(consts::INVALID_OPERATION);
            return;
        };
        let stored_layout = (stored.format, stored.ty);
        let Some(stored_texel) = texel_size(stored.format, stored.ty) else {
            self.record_error(consts::INVALID_OPERATION);
            return;
        };
        if stored.compressed {
            self.record_error(consts::INVALID_OPERATION);
            return;
        }
        if x_offset < 0
            || y_offset < 0
            || width < 0
            || height < 0
            || (x_offset + width) as u32 > stored.width
            || (y_offset + height) as u32 > stored.height
            || pixels.len() < width as usize * height as usize * texel
        {
            self.record_error(consts::INVALID_VALUE);
            return;
        }

        let count = width as usize * height as usize;
        let mut converted = vec![0; count * stored_texel];
        if !convert_layout((format, ty), pixels, stored_layout, &mut converted, count) {
            log::trace!(
                "SoftwareContext: no conversion from {:#x}/{:#x} to {:#x}/{:#x}",
                format,
                ty,
                stored_layout.0,
                stored_layout.1
            );
            self.record_error(consts::INVALID_OPERATION);
            return;
        }
        let row = width as usize * stored_texel;
        let stored_pitch = stored.width as usize * stored_texel;
        for y in 0..height as usize {
            let src = y * row;
            let dst = (y + y_offset as usize) * stored_pitch + x_offset as usize * stored_texel;
            stored.data[dst..dst + row].copy_from_slice(&converted[src..src + row]);
        }
        if level == 0 && object.auto_generates() {
            object.rebuild_chain();
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
        self.calls.push(GlCall::CompressedTexImage2d {
            level,
            width,
            height,
            size: data.len(),
        });
        if level < 0 || width < 0 || height < 0 {
            self.record_error(consts::INVALID_VALUE);
            return;
        }
        let Some(object) = self.bound_object(target) else {
            return;
        };
        object.levels.insert(
            level,
            SoftwareLevel {
                width: width as u32,
                height: height as u32,
                internal_format,
                format: internal_format as u32,
                ty: 0,
                compressed: true,
                data: data.to_vec(),
            },
        );
    }

    fn compressed_tex_sub_image_2d(
        &mut self,
        target: u32,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        _format: u32,
        data: &[u8],
    ) {
        self.calls.push(GlCall::CompressedTexSubImage2d {
            level,
            width,
            height,
            size: data.len(),
        });
        let Some(object) = self.bound_object(target) else {
            return;
        };
        let Some(stored) = object.levels.get_mut(&level) else {
            self.record_error(consts::INVALID_OPERATION);
            return;
        };
        // only whole-level replacement is emulated
        if !stored.compressed
            || x_offset != 0
            || y_offset != 0
            || width as u32 != stored.width
            || height as u32 != stored.height
            || data.len() != stored.data.len()
        {
            self.record_error(consts::INVALID_OPERATION);
            return;
        }
        stored.data.copy_from_slice(data);
    }

    fn generate_mipmap(&mut self, target: u32) {
        self.calls.push(GlCall::GenerateMipmap);
        let Some(object) = self.bound_object(target) else {
            return;
        };
        if !object.rebuild_chain() {
            self.record_error(consts::INVALID_OPERATION);
        }
    }

    fn get_tex_image(&mut self, target: u32, level: i32, format: u32, ty: u32, pixels: &mut [u8]) {
        self.calls.push(GlCall::GetTexImage { level });
        let pack_invert = self.pack_invert;
        let Some(texel) = texel_size(format, ty) else {
            self.record_error(consts::INVALID_ENUM);
            return;
        };
        let Some(object) = self.bound_object(target) else {
            return;
        };
        let Some(stored) = object.levels.get(&level) else {
            self.record_error(consts::INVALID_VALUE);
            return;
        };
        let width = stored.width as usize;
        let height = stored.height as usize;
        if stored.compressed || pixels.len() < width * height * texel {
            self.record_error(consts::INVALID_OPERATION);
            return;
        }
        let Some(stored_texel) = texel_size(stored.format, stored.ty) else {
            self.record_error(consts::INVALID_OPERATION);
            return;
        };

        let stored_layout = (stored.format, stored.ty);
        let src_pitch = width * stored_texel;
        let dst_pitch = width * texel;
        let converted = (0..height).all(|y| {
            let src_row = if pack_invert { height - 1 - y } else { y };
            let src = &stored.data[src_row * src_pitch..(src_row + 1) * src_pitch];
            let dst = &mut pixels[y * dst_pitch..(y + 1) * dst_pitch];
            convert_layout(stored_layout, src, (format, ty), dst, width)
        });
        if !converted {
            log::trace!(
                "SoftwareContext: no conversion from {:#x}/{:#x} to {:#x}/{:#x}",
                stored_layout.0,
                stored_layout.1,
                format,
                ty
            );
            self.record_error(consts::INVALID_OPERATION);
        }
    }

    fn get_error(&mut self) -> u32 {
        std::mem::replace(&mut self.error, consts::NO_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_texture() -> (SoftwareContext, SoftwareTexture) {
        let mut gl = SoftwareContext::new();
        let texture = gl.create_texture().unwrap();
        gl.active_texture(0);
        gl.bind_texture(consts::TEXTURE_2D, Some(texture));
        (gl, texture)
    }

    #[test]
    fn test_upload_and_read_back() {
        let (mut gl, _) = context_with_texture();
        let data: Vec<u8> = (0..16).collect();
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::RGBA as i32,
            2,
            2,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            Some(&data),
        );
        let mut out = vec![0; 16];
        gl.get_tex_image(
            consts::TEXTURE_2D,
            0,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            &mut out,
        );
        assert_eq!(out, data);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn test_pack_invert_reverses_rows() {
        let (mut gl, _) = context_with_texture();
        let data = [1, 1, 1, 1, 2, 2, 2, 2];
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::RGBA as i32,
            1,
            2,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            Some(&data),
        );
        gl.pixel_store_i32(consts::PACK_INVERT_MESA, 1);
        let mut out = [0; 8];
        gl.get_tex_image(
            consts::TEXTURE_2D,
            0,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            &mut out,
        );
        assert_eq!(out, [2, 2, 2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_packed_levels_convert_on_read_and_write() {
        let (mut gl, texture) = context_with_texture();
        // opaque red in A1R5G5B5
        let red = 0xfc00u16.to_le_bytes();
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::RGBA as i32,
            1,
            1,
            consts::BGRA,
            consts::UNSIGNED_SHORT_1_5_5_5_REV,
            Some(&red),
        );
        let mut out = [0; 4];
        gl.get_tex_image(
            consts::TEXTURE_2D,
            0,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            &mut out,
        );
        assert_eq!(out, [0x00, 0x00, 0xff, 0xff]);

        // opaque blue, sent as 32-bit texels
        gl.tex_sub_image_2d(
            consts::TEXTURE_2D,
            0,
            0,
            0,
            1,
            1,
            consts::BGRA,
            consts::UNSIGNED_INT_8_8_8_8_REV,
            &[0xff, 0x00, 0x00, 0xff],
        );
        assert_eq!(gl.get_error(), consts::NO_ERROR);
        let level = gl.texture(texture).unwrap().level(0).unwrap();
        assert_eq!(level.data, 0x801fu16.to_le_bytes().to_vec());
    }

    #[test]
    fn test_unconvertible_readback_is_an_error() {
        let (mut gl, _) = context_with_texture();
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::R32F as i32,
            1,
            1,
            consts::RED,
            consts::FLOAT,
            Some(&[0; 4]),
        );
        let mut out = [0; 4];
        gl.get_tex_image(
            consts::TEXTURE_2D,
            0,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            &mut out,
        );
        assert_eq!(gl.get_error(), consts::INVALID_OPERATION);
    }

    #[test]
    fn test_generate_mipmap_builds_chain() {
        let (mut gl, texture) = context_with_texture();
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            consts::RGBA as i32,
            8,
            2,
            consts::BGRA,
            consts::UNSIGNED_BYTE,
            None,
        );
        gl.generate_mipmap(consts::TEXTURE_2D);
        let object = gl.texture(texture).unwrap();
        assert_eq!(object.level_sizes(), vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn test_errors_are_sticky_until_queried() {
        let mut gl = SoftwareContext::new();
        // nothing bound
        gl.tex_parameter_i32(consts::TEXTURE_2D, consts::TEXTURE_MIN_FILTER, 0);
        gl.bind_texture(0x1234, None);
        assert_eq!(gl.get_error(), consts::INVALID_OPERATION);
        assert_eq!(gl.get_error(), consts::NO_ERROR);
    }

    #[test]
    fn test_delete_unbinds() {
        let (mut gl, texture) = context_with_texture();
        gl.delete_texture(texture);
        assert_eq!(gl.bound_texture(0), None);
        assert_eq!(gl.texture_count(), 0);
    }
}
