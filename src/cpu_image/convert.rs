//! Texel conversion between the packed color formats.

use bytemuck::{Pod, Zeroable};

use crate::types::ColorFormat;

/// An 8-bit-per-channel color, laid out in memory like an `A8R8G8B8` texel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Bytes in `A8R8G8B8` order (B, G, R, A).
    pub fn to_bytes(self) -> [u8; 4] {
        bytemuck::cast(self)
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        bytemuck::cast(bytes)
    }
}

/// Returns true if texels of `format` can be decoded and encoded as [`Color`].
pub fn is_convertible(format: ColorFormat) -> bool {
    matches!(
        format,
        ColorFormat::A1R5G5B5 | ColorFormat::R5G6B5 | ColorFormat::R8G8B8 | ColorFormat::A8R8G8B8
    )
}

fn expand5(v: u16) -> u8 {
    let v = (v & 0x1f) as u8;
    (v << 3) | (v >> 2)
}

fn expand6(v: u16) -> u8 {
    let v = (v & 0x3f) as u8;
    (v << 2) | (v >> 4)
}

/// Decode one texel. `bytes` must hold at least one texel of `format`.
pub fn read_color(format: ColorFormat, bytes: &[u8]) -> Option<Color> {
    match format {
        ColorFormat::A8R8G8B8 => Some(Color::new(bytes[3], bytes[2], bytes[1], bytes[0])),
        ColorFormat::R8G8B8 => Some(Color::new(0xff, bytes[2], bytes[1], bytes[0])),
        ColorFormat::A1R5G5B5 => {
            let v = u16::from_le_bytes([bytes[0], bytes[1]]);
            let a = if v & 0x8000 != 0 { 0xff } else { 0 };
            Some(Color::new(a, expand5(v >> 10), expand5(v >> 5), expand5(v)))
        }
        ColorFormat::R5G6B5 => {
            let v = u16::from_le_bytes([bytes[0], bytes[1]]);
            Some(Color::new(0xff, expand5(v >> 11), expand6(v >> 5), expand5(v)))
        }
        _ => None,
    }
}

/// Encode one texel. Returns false for formats without a conversion.
pub fn write_color(format: ColorFormat, color: Color, out: &mut [u8]) -> bool {
    match format {
        ColorFormat::A8R8G8B8 => out[..4].copy_from_slice(&color.to_bytes()),
        ColorFormat::R8G8B8 => out[..3].copy_from_slice(&[color.b, color.g, color.r]),
        ColorFormat::A1R5G5B5 => {
            let v = (if color.a >= 0x80 { 0x8000 } else { 0 })
                | ((color.r as u16 >> 3) << 10)
                | ((color.g as u16 >> 3) << 5)
                | (color.b as u16 >> 3);
            out[..2].copy_from_slice(&v.to_le_bytes());
        }
        ColorFormat::R5G6B5 => {
            let v = ((color.r as u16 >> 3) << 11)
                | ((color.g as u16 >> 2) << 5)
                | (color.b as u16 >> 3);
            out[..2].copy_from_slice(&v.to_le_bytes());
        }
        _ => return false,
    }
    true
}

/// Copy `count` texels from `src` to `dst`, converting between formats.
///
/// Identical formats are copied bytewise, which also covers formats without a
/// [`Color`] conversion. Returns false if no conversion exists.
pub fn convert_texels(
    src_format: ColorFormat,
    src: &[u8],
    dst_format: ColorFormat,
    dst: &mut [u8],
    count: usize,
) -> bool {
    if src_format == dst_format {
        let len = count * src_format.bytes_per_pixel() as usize;
        dst[..len].copy_from_slice(&src[..len]);
        return true;
    }
    if !is_convertible(src_format) || !is_convertible(dst_format) {
        return false;
    }
    let src_bpp = src_format.bytes_per_pixel() as usize;
    let dst_bpp = dst_format.bytes_per_pixel() as usize;
    for (s, d) in src
        .chunks_exact(src_bpp)
        .zip(dst.chunks_exact_mut(dst_bpp))
        .take(count)
    {
        if let Some(color) = read_color(src_format, s) {
            write_color(dst_format, color, d);
        }
    }
    true
}
