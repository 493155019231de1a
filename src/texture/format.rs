//! Mapping from engine color formats to native texture formats.

use crate::backend::consts;
use crate::driver::{DriverConfig, GlExtensions, TextureCreationFlags};
use crate::types::ColorFormat;

/// Native format description of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlFormat {
    /// Internal (GPU storage) format.
    pub internal_format: u32,
    /// Minification filter matching the format.
    pub filtering: u32,
    /// Client pixel format of uploaded data.
    pub pixel_format: u32,
    /// Client pixel type of uploaded data.
    pub pixel_type: u32,
}

impl Default for GlFormat {
    fn default() -> Self {
        Self {
            internal_format: consts::RGBA,
            filtering: consts::LINEAR,
            pixel_format: consts::BGRA,
            pixel_type: consts::UNSIGNED_BYTE,
        }
    }
}

impl GlFormat {
    const FALLBACK: Self = Self {
        internal_format: consts::RGBA,
        filtering: consts::LINEAR,
        pixel_format: consts::RGBA,
        pixel_type: consts::UNSIGNED_BYTE,
    };

    const fn new(internal_format: u32, pixel_format: u32, pixel_type: u32) -> Self {
        Self {
            internal_format,
            filtering: consts::LINEAR,
            pixel_format,
            pixel_type,
        }
    }

    const fn nearest(internal_format: u32, pixel_format: u32, pixel_type: u32) -> Self {
        Self {
            internal_format,
            filtering: consts::NEAREST,
            pixel_format,
            pixel_type,
        }
    }

    /// Native format for `format` on a driver with `config`.
    ///
    /// Formats the driver cannot store are logged and mapped to 8-bit RGBA so
    /// the texture stays creatable.
    pub fn from_color_format(format: ColorFormat, config: &DriverConfig) -> Self {
        let has = |extension: GlExtensions| config.extensions.contains(extension);
        let rg = has(GlExtensions::ARB_TEXTURE_RG);
        let float = has(GlExtensions::ARB_TEXTURE_FLOAT);
        let half_type = if has(GlExtensions::ARB_HALF_FLOAT_PIXEL) {
            consts::HALF_FLOAT
        } else {
            consts::FLOAT
        };

        let mapped = match format {
            ColorFormat::A1R5G5B5 => Some(Self::new(
                consts::RGBA,
                consts::BGRA,
                consts::UNSIGNED_SHORT_1_5_5_5_REV,
            )),
            ColorFormat::R5G6B5 => Some(Self::new(
                consts::RGB,
                consts::RGB,
                consts::UNSIGNED_SHORT_5_6_5,
            )),
            ColorFormat::R8G8B8 => Some(Self::new(consts::RGB, consts::BGR, consts::UNSIGNED_BYTE)),
            ColorFormat::A8R8G8B8 => {
                let ty = if config.version > 101 {
                    consts::UNSIGNED_INT_8_8_8_8_REV
                } else {
                    consts::UNSIGNED_BYTE
                };
                Some(Self::new(consts::RGBA, consts::BGRA, ty))
            }
            ColorFormat::Dxt1 => Some(Self::compressed(consts::COMPRESSED_RGBA_S3TC_DXT1_EXT)),
            ColorFormat::Dxt2 | ColorFormat::Dxt3 => {
                Some(Self::compressed(consts::COMPRESSED_RGBA_S3TC_DXT3_EXT))
            }
            ColorFormat::Dxt4 | ColorFormat::Dxt5 => {
                Some(Self::compressed(consts::COMPRESSED_RGBA_S3TC_DXT5_EXT))
            }
            ColorFormat::D16 => Some(Self::new(
                consts::DEPTH_COMPONENT16,
                consts::DEPTH_COMPONENT,
                consts::UNSIGNED_BYTE,
            )),
            ColorFormat::D32 => Some(Self::new(
                consts::DEPTH_COMPONENT32,
                consts::DEPTH_COMPONENT,
                consts::UNSIGNED_BYTE,
            )),
            ColorFormat::D24S8 if has(GlExtensions::EXT_PACKED_DEPTH_STENCIL) => Some(Self::new(
                consts::DEPTH_STENCIL,
                consts::DEPTH_STENCIL,
                consts::UNSIGNED_INT_24_8,
            )),
            ColorFormat::R8 if rg => Some(Self::new(consts::R8, consts::RED, consts::UNSIGNED_BYTE)),
            ColorFormat::R8G8 if rg => Some(Self::new(consts::RG8, consts::RG, consts::UNSIGNED_BYTE)),
            ColorFormat::R16 if rg => {
                Some(Self::new(consts::R16, consts::RED, consts::UNSIGNED_SHORT))
            }
            ColorFormat::R16G16 if rg => {
                Some(Self::new(consts::RG16, consts::RG, consts::UNSIGNED_SHORT))
            }
            ColorFormat::R16F if rg => Some(Self::nearest(consts::R16F, consts::RED, half_type)),
            ColorFormat::G16R16F if rg => Some(Self::nearest(consts::RG16F, consts::RG, half_type)),
            ColorFormat::A16B16G16R16F if float => {
                Some(Self::nearest(consts::RGBA16F, consts::RGBA, half_type))
            }
            ColorFormat::R32F if rg => Some(Self::nearest(consts::R32F, consts::RED, consts::FLOAT)),
            ColorFormat::G32R32F if rg => {
                Some(Self::nearest(consts::RG32F, consts::RG, consts::FLOAT))
            }
            ColorFormat::A32B32G32R32F if float => {
                Some(Self::nearest(consts::RGBA32F, consts::RGBA, consts::FLOAT))
            }
            _ => None,
        };

        let mut gl_format = mapped.unwrap_or_else(|| {
            log::error!("{:?} color format is not supported", format);
            Self::FALLBACK
        });

        if config.handle_srgb {
            gl_format.internal_format = match gl_format.internal_format {
                consts::RGBA => consts::SRGB_ALPHA,
                consts::RGB => consts::SRGB,
                other => other,
            };
        }
        gl_format
    }

    const fn compressed(internal_format: u32) -> Self {
        Self::new(internal_format, consts::BGRA, internal_format)
    }
}

/// Storage format for an uncompressed source of `format` under the given creation flags.
///
/// 16-bit sources stay 16-bit unless `ALWAYS_32_BIT` is set; 32/24-bit sources
/// drop to `A1R5G5B5` with `ALWAYS_16_BIT` or `OPTIMIZED_FOR_SPEED`. Everything
/// else becomes `A8R8G8B8`. `NO_ALPHA_CHANNEL` then strips alpha.
pub fn best_color_format(format: ColorFormat, flags: TextureCreationFlags) -> ColorFormat {
    let demote = flags.intersects(
        TextureCreationFlags::ALWAYS_16_BIT | TextureCreationFlags::OPTIMIZED_FOR_SPEED,
    );
    let format = match format {
        ColorFormat::A1R5G5B5 | ColorFormat::R5G6B5
            if !flags.contains(TextureCreationFlags::ALWAYS_32_BIT) =>
        {
            ColorFormat::A1R5G5B5
        }
        ColorFormat::A8R8G8B8 | ColorFormat::R8G8B8 if demote => ColorFormat::A1R5G5B5,
        _ => ColorFormat::A8R8G8B8,
    };
    if flags.contains(TextureCreationFlags::NO_ALPHA_CHANNEL) {
        match format {
            ColorFormat::A1R5G5B5 => ColorFormat::R5G6B5,
            ColorFormat::A8R8G8B8 => ColorFormat::R8G8B8,
            other => other,
        }
    } else {
        format
    }
}

/// Alpha presence of a render target. Unlike images, compressed formats do not count.
pub(crate) fn render_target_has_alpha(format: ColorFormat) -> bool {
    matches!(
        format,
        ColorFormat::A8R8G8B8
            | ColorFormat::A1R5G5B5
            | ColorFormat::A16B16G16R16F
            | ColorFormat::A32B32G32R32F
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LIN: u32 = consts::LINEAR;
    const NEAR: u32 = consts::NEAREST;

    #[rstest]
    #[case::a1r5g5b5(ColorFormat::A1R5G5B5, consts::RGBA, LIN, consts::BGRA, consts::UNSIGNED_SHORT_1_5_5_5_REV)]
    #[case::r5g6b5(ColorFormat::R5G6B5, consts::RGB, LIN, consts::RGB, consts::UNSIGNED_SHORT_5_6_5)]
    #[case::r8g8b8(ColorFormat::R8G8B8, consts::RGB, LIN, consts::BGR, consts::UNSIGNED_BYTE)]
    #[case::a8r8g8b8(ColorFormat::A8R8G8B8, consts::RGBA, LIN, consts::BGRA, consts::UNSIGNED_INT_8_8_8_8_REV)]
    #[case::dxt1(ColorFormat::Dxt1, consts::COMPRESSED_RGBA_S3TC_DXT1_EXT, LIN, consts::BGRA, consts::COMPRESSED_RGBA_S3TC_DXT1_EXT)]
    #[case::dxt2(ColorFormat::Dxt2, consts::COMPRESSED_RGBA_S3TC_DXT3_EXT, LIN, consts::BGRA, consts::COMPRESSED_RGBA_S3TC_DXT3_EXT)]
    #[case::dxt3(ColorFormat::Dxt3, consts::COMPRESSED_RGBA_S3TC_DXT3_EXT, LIN, consts::BGRA, consts::COMPRESSED_RGBA_S3TC_DXT3_EXT)]
    #[case::dxt4(ColorFormat::Dxt4, consts::COMPRESSED_RGBA_S3TC_DXT5_EXT, LIN, consts::BGRA, consts::COMPRESSED_RGBA_S3TC_DXT5_EXT)]
    #[case::dxt5(ColorFormat::Dxt5, consts::COMPRESSED_RGBA_S3TC_DXT5_EXT, LIN, consts::BGRA, consts::COMPRESSED_RGBA_S3TC_DXT5_EXT)]
    #[case::d16(ColorFormat::D16, consts::DEPTH_COMPONENT16, LIN, consts::DEPTH_COMPONENT, consts::UNSIGNED_BYTE)]
    #[case::d32(ColorFormat::D32, consts::DEPTH_COMPONENT32, LIN, consts::DEPTH_COMPONENT, consts::UNSIGNED_BYTE)]
    #[case::d24s8(ColorFormat::D24S8, consts::DEPTH_STENCIL, LIN, consts::DEPTH_STENCIL, consts::UNSIGNED_INT_24_8)]
    #[case::r8(ColorFormat::R8, consts::R8, LIN, consts::RED, consts::UNSIGNED_BYTE)]
    #[case::r8g8(ColorFormat::R8G8, consts::RG8, LIN, consts::RG, consts::UNSIGNED_BYTE)]
    #[case::r16(ColorFormat::R16, consts::R16, LIN, consts::RED, consts::UNSIGNED_SHORT)]
    #[case::r16g16(ColorFormat::R16G16, consts::RG16, LIN, consts::RG, consts::UNSIGNED_SHORT)]
    #[case::r16f(ColorFormat::R16F, consts::R16F, NEAR, consts::RED, consts::HALF_FLOAT)]
    #[case::g16r16f(ColorFormat::G16R16F, consts::RG16F, NEAR, consts::RG, consts::HALF_FLOAT)]
    #[case::rgba16f(ColorFormat::A16B16G16R16F, consts::RGBA16F, NEAR, consts::RGBA, consts::HALF_FLOAT)]
    #[case::r32f(ColorFormat::R32F, consts::R32F, NEAR, consts::RED, consts::FLOAT)]
    #[case::g32r32f(ColorFormat::G32R32F, consts::RG32F, NEAR, consts::RG, consts::FLOAT)]
    #[case::rgba32f(ColorFormat::A32B32G32R32F, consts::RGBA32F, NEAR, consts::RGBA, consts::FLOAT)]
    #[case::unknown(ColorFormat::Unknown, consts::RGBA, LIN, consts::RGBA, consts::UNSIGNED_BYTE)]
    fn test_format_table(
        #[case] format: ColorFormat,
        #[case] internal_format: u32,
        #[case] filtering: u32,
        #[case] pixel_format: u32,
        #[case] pixel_type: u32,
    ) {
        let gl = GlFormat::from_color_format(format, &DriverConfig::default());
        assert_eq!(
            gl,
            GlFormat {
                internal_format,
                filtering,
                pixel_format,
                pixel_type,
            }
        );
    }

    #[test]
    fn test_float_formats_use_nearest() {
        let config = DriverConfig::default();
        assert_eq!(
            GlFormat::from_color_format(ColorFormat::G32R32F, &config).filtering,
            consts::NEAREST
        );
        assert_eq!(
            GlFormat::from_color_format(ColorFormat::R8, &config).filtering,
            consts::LINEAR
        );
    }

    #[test]
    fn test_old_driver_uses_plain_bytes() {
        let config = DriverConfig::default().with_version(101);
        let gl = GlFormat::from_color_format(ColorFormat::A8R8G8B8, &config);
        assert_eq!(gl.pixel_type, consts::UNSIGNED_BYTE);
    }

    #[test]
    fn test_half_float_without_extension() {
        let config = DriverConfig::default().with_extensions(
            GlExtensions::ARB_TEXTURE_RG | GlExtensions::ARB_TEXTURE_FLOAT,
        );
        let gl = GlFormat::from_color_format(ColorFormat::A16B16G16R16F, &config);
        assert_eq!(gl.internal_format, consts::RGBA16F);
        assert_eq!(gl.pixel_type, consts::FLOAT);
    }

    #[rstest]
    #[case::rg(ColorFormat::R8G8)]
    #[case::float(ColorFormat::A32B32G32R32F)]
    #[case::depth_stencil(ColorFormat::D24S8)]
    #[case::unknown(ColorFormat::Unknown)]
    fn test_unsupported_falls_back(#[case] format: ColorFormat) {
        let config = DriverConfig::default().with_extensions(GlExtensions::empty());
        let gl = GlFormat::from_color_format(format, &config);
        assert_eq!(
            gl,
            GlFormat {
                internal_format: consts::RGBA,
                filtering: consts::LINEAR,
                pixel_format: consts::RGBA,
                pixel_type: consts::UNSIGNED_BYTE,
            }
        );
    }

    #[test]
    fn test_srgb_remap() {
        let config = DriverConfig::default().with_srgb(true);
        assert_eq!(
            GlFormat::from_color_format(ColorFormat::A8R8G8B8, &config).internal_format,
            consts::SRGB_ALPHA
        );
        assert_eq!(
            GlFormat::from_color_format(ColorFormat::R8G8B8, &config).internal_format,
            consts::SRGB
        );
        assert_eq!(
            GlFormat::from_color_format(ColorFormat::R16F, &config).internal_format,
            consts::R16F
        );
    }

    #[rstest]
    #[case::keep_16(ColorFormat::R5G6B5, TextureCreationFlags::empty(), ColorFormat::A1R5G5B5)]
    #[case::promote_16(ColorFormat::A1R5G5B5, TextureCreationFlags::ALWAYS_32_BIT, ColorFormat::A8R8G8B8)]
    #[case::demote_32(ColorFormat::R8G8B8, TextureCreationFlags::ALWAYS_16_BIT, ColorFormat::A1R5G5B5)]
    #[case::speed(ColorFormat::A8R8G8B8, TextureCreationFlags::OPTIMIZED_FOR_SPEED, ColorFormat::A1R5G5B5)]
    #[case::float(ColorFormat::R32F, TextureCreationFlags::ALWAYS_16_BIT, ColorFormat::A8R8G8B8)]
    #[case::no_alpha(ColorFormat::A8R8G8B8, TextureCreationFlags::NO_ALPHA_CHANNEL, ColorFormat::R8G8B8)]
    #[case::no_alpha_16(
        ColorFormat::A1R5G5B5,
        TextureCreationFlags::NO_ALPHA_CHANNEL,
        ColorFormat::R5G6B5
    )]
    fn test_best_color_format(
        #[case] source: ColorFormat,
        #[case] flags: TextureCreationFlags,
        #[case] expected: ColorFormat,
    ) {
        assert_eq!(best_color_format(source, flags), expected);
    }
}
