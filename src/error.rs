//! Texture error types.

use thiserror::Error;

use crate::types::Dimension2d;

/// Errors that abort texture construction or image creation.
///
/// Everything past construction (upload, lock, mip generation) logs and
/// carries on instead of returning one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    #[error("invalid size of image for texture: {0}")]
    InvalidImageSize(Dimension2d),
    #[error("DXT texture compression not available")]
    CompressionUnsupported,
    #[error("invalid size of image for compressed texture: {original} would need scaling to {optimal}, size of image must be power of two")]
    InvalidCompressedSize {
        original: Dimension2d,
        optimal: Dimension2d,
    },
    #[error("image data has {actual} bytes, expected {expected}")]
    InvalidImageData { expected: usize, actual: usize },
    #[error("invalid render target size: {0}")]
    InvalidRenderTargetSize(Dimension2d),
    #[error("failed to create texture object: {0}")]
    HandleCreationFailed(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextureError::CompressionUnsupported;
        assert_eq!(err.to_string(), "DXT texture compression not available");

        let err = TextureError::InvalidImageSize(Dimension2d::new(0, 16));
        assert_eq!(err.to_string(), "invalid size of image for texture: 0x16");
    }
}
