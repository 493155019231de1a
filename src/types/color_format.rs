//! Engine-level color formats.

use super::Dimension2d;

/// Color format of an image or texture, as the engine sees it.
///
/// Packed formats name their channels from the most significant bit down,
/// so `A8R8G8B8` is a little-endian `u32` laid out as B, G, R, A bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ColorFormat {
    // Packed 16/24/32-bit formats
    /// 16-bit, 1 bit alpha and 5 bits per color channel.
    A1R5G5B5,
    /// 16-bit, no alpha, 6 bits for green.
    R5G6B5,
    /// 24-bit, stored as B, G, R bytes.
    R8G8B8,
    /// 32-bit, stored as B, G, R, A bytes.
    #[default]
    A8R8G8B8,

    // Block-compressed formats
    /// DXT1, 8 bytes per 4x4 block.
    Dxt1,
    /// DXT2 (premultiplied DXT3), 16 bytes per block.
    Dxt2,
    /// DXT3, 16 bytes per block.
    Dxt3,
    /// DXT4 (premultiplied DXT5), 16 bytes per block.
    Dxt4,
    /// DXT5, 16 bytes per block.
    Dxt5,

    // Floating point formats
    /// 16-bit float red channel.
    R16F,
    /// 16-bit float red and green channels.
    G16R16F,
    /// 16-bit float RGBA.
    A16B16G16R16F,
    /// 32-bit float red channel.
    R32F,
    /// 32-bit float red and green channels.
    G32R32F,
    /// 32-bit float RGBA.
    A32B32G32R32F,

    // Unsigned normalized single/dual channel formats
    /// 8-bit red channel.
    R8,
    /// 8-bit red and green channels.
    R8G8,
    /// 16-bit red channel.
    R16,
    /// 16-bit red and green channels.
    R16G16,

    // Depth/stencil formats
    /// 16-bit depth.
    D16,
    /// 32-bit depth.
    D32,
    /// 24-bit depth with 8-bit stencil.
    D24S8,

    /// No known format.
    Unknown,
}

impl ColorFormat {
    /// Bits per texel. Compressed formats report their average rate.
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            Self::Dxt1 => 4,
            Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5 | Self::R8 => 8,
            Self::A1R5G5B5 | Self::R5G6B5 | Self::R16F | Self::R8G8 | Self::R16 | Self::D16 => 16,
            Self::R8G8B8 => 24,
            Self::A8R8G8B8
            | Self::G16R16F
            | Self::R32F
            | Self::R16G16
            | Self::D32
            | Self::D24S8 => 32,
            Self::A16B16G16R16F | Self::G32R32F => 64,
            Self::A32B32G32R32F => 128,
            Self::Unknown => 0,
        }
    }

    /// Bytes per texel for uncompressed formats, 0 for compressed ones.
    pub fn bytes_per_pixel(&self) -> u32 {
        if self.is_compressed() {
            0
        } else {
            self.bits_per_pixel() / 8
        }
    }

    /// Returns true for the DXT block-compressed formats.
    pub fn is_compressed(&self) -> bool {
        matches!(
            self,
            Self::Dxt1 | Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5
        )
    }

    /// Returns true for depth and depth/stencil formats.
    pub fn is_depth(&self) -> bool {
        matches!(self, Self::D16 | Self::D32 | Self::D24S8)
    }

    /// Returns true if textures of this format carry an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::A8R8G8B8
                | Self::A1R5G5B5
                | Self::Dxt1
                | Self::Dxt2
                | Self::Dxt3
                | Self::Dxt4
                | Self::Dxt5
                | Self::A16B16G16R16F
                | Self::A32B32G32R32F
        )
    }

    /// Bytes per 4x4 block for compressed formats.
    pub fn block_size(&self) -> Option<u32> {
        match self {
            Self::Dxt1 => Some(8),
            Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5 => Some(16),
            _ => None,
        }
    }

    /// Byte size of one image of `size` in this format.
    pub fn data_size(&self, size: Dimension2d) -> usize {
        match self.block_size() {
            Some(block) => {
                let blocks_x = size.width.div_ceil(4) as usize;
                let blocks_y = size.height.div_ceil(4) as usize;
                blocks_x * blocks_y * block as usize
            }
            None => size.area() * self.bytes_per_pixel() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_data_size() {
        let size = Dimension2d::new(16, 8);
        assert_eq!(ColorFormat::Dxt1.data_size(size), 4 * 2 * 8);
        assert_eq!(ColorFormat::Dxt5.data_size(size), 4 * 2 * 16);
        // partial blocks round up
        assert_eq!(ColorFormat::Dxt1.data_size(Dimension2d::new(1, 1)), 8);
        assert_eq!(ColorFormat::Dxt3.data_size(Dimension2d::new(5, 2)), 2 * 16);
    }

    #[test]
    fn test_uncompressed_data_size() {
        let size = Dimension2d::new(3, 2);
        assert_eq!(ColorFormat::A8R8G8B8.data_size(size), 24);
        assert_eq!(ColorFormat::R8G8B8.data_size(size), 18);
        assert_eq!(ColorFormat::A32B32G32R32F.data_size(size), 96);
        assert_eq!(ColorFormat::Dxt1.bytes_per_pixel(), 0);
    }

    #[test]
    fn test_format_classes() {
        assert!(ColorFormat::Dxt4.is_compressed());
        assert!(!ColorFormat::R16F.is_compressed());
        assert!(ColorFormat::D24S8.is_depth());
        assert!(ColorFormat::A1R5G5B5.has_alpha());
        assert!(!ColorFormat::R5G6B5.has_alpha());
    }
}
