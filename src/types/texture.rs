//! Texture state types.

/// What a texture was created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Uploaded from an uncompressed CPU image.
    Standard,
    /// Uploaded from block-compressed data. Cannot be locked or rescaled.
    Compressed,
    /// Storage written by the GPU pipeline. Never trusts a CPU mirror.
    RenderTarget,
}

/// How the mip chain of a texture is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MipStrategy {
    /// The texture has no mip levels.
    None,
    /// The driver regenerates mips on every level-0 upload (`GENERATE_MIPMAP` parameter).
    HardwareLegacy,
    /// The driver builds the chain on request (`glGenerateMipmap`).
    HardwareFbo,
    /// Levels are supplied by the caller or resampled from the CPU image.
    Manual,
}

impl MipStrategy {
    /// Returns true if the texture carries mip levels at all.
    pub fn has_mip_maps(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns true if the driver produces the levels.
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::HardwareLegacy | Self::HardwareFbo)
    }
}

/// Access requested when locking a texture level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockMode {
    /// Read and write; changes are uploaded on unlock.
    #[default]
    ReadWrite,
    /// Read only; unlock does not upload.
    ReadOnly,
    /// Write only; no readback is done when the GPU holds the only copy.
    WriteOnly,
}

impl LockMode {
    /// Returns true if unlocking must push data back to the GPU.
    pub fn writes(&self) -> bool {
        !matches!(self, Self::ReadOnly)
    }

    /// Returns true if the locked buffer must hold current texel data.
    pub fn reads(&self) -> bool {
        !matches!(self, Self::WriteOnly)
    }
}

/// Texture coordinate wrap mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// Filtering and wrap state last applied to a texture.
///
/// Kept so the material renderer can skip redundant parameter calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureStates {
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
    pub bilinear_filter: bool,
    pub trilinear_filter: bool,
    pub anisotropic_filter: u8,
    pub mip_map_status: bool,
}
