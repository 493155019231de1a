//! Common types shared across the texture system.

use std::fmt;

/// Width and height of an image or texture level, in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension2d {
    pub width: u32,
    pub height: u32,
}

impl Dimension2d {
    /// Create a new dimension.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of texels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size the driver will accept for this dimension.
    ///
    /// With `require_power_of_two` each side is rounded up to the next power
    /// of two, otherwise the dimension is returned unchanged.
    pub fn optimal_size(&self, require_power_of_two: bool) -> Self {
        if !require_power_of_two {
            return *self;
        }
        Self {
            width: self.width.max(1).next_power_of_two(),
            height: self.height.max(1).next_power_of_two(),
        }
    }

    /// Shrink to fit `max` on both sides while keeping the aspect ratio.
    ///
    /// The wider side decides which axis gets pinned to `max`; the other is
    /// scaled and truncated, but never below one texel.
    pub fn clamped_to(&self, max: u32) -> Self {
        if self.is_empty() {
            return *self;
        }
        let ratio = self.width as f32 / self.height as f32;
        if self.width > max && ratio >= 1.0 {
            Self::new(max, ((max as f32 / ratio) as u32).max(1))
        } else if self.height > max {
            Self::new(((max as f32 * ratio) as u32).max(1), max)
        } else {
            *self
        }
    }

    /// Size of mip `level` below this dimension (halved per level, floor, minimum 1).
    pub fn mip_level(&self, level: u32) -> Self {
        let mut size = *self;
        for _ in 0..level {
            size = size.next_mip_level();
        }
        size
    }

    /// One mip level down.
    pub fn next_mip_level(&self) -> Self {
        Self {
            width: if self.width > 1 { self.width >> 1 } else { self.width },
            height: if self.height > 1 { self.height >> 1 } else { self.height },
        }
    }
}

impl fmt::Display for Dimension2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimension2d {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_size_power_of_two() {
        let size = Dimension2d::new(100, 33);
        assert_eq!(size.optimal_size(true), Dimension2d::new(128, 64));
        assert_eq!(size.optimal_size(false), size);
        assert_eq!(Dimension2d::new(64, 1).optimal_size(true), Dimension2d::new(64, 1));
    }

    #[test]
    fn test_clamped_to_keeps_aspect() {
        assert_eq!(
            Dimension2d::new(8192, 2048).clamped_to(4096),
            Dimension2d::new(4096, 1024)
        );
        assert_eq!(
            Dimension2d::new(1000, 4000).clamped_to(2000),
            Dimension2d::new(500, 2000)
        );
        assert_eq!(Dimension2d::new(10, 10).clamped_to(16), Dimension2d::new(10, 10));
    }

    #[test]
    fn test_clamped_to_keeps_thin_sides() {
        assert_eq!(Dimension2d::new(9, 1).clamped_to(4), Dimension2d::new(4, 1));
        assert_eq!(Dimension2d::new(1, 300).clamped_to(16), Dimension2d::new(1, 16));
    }

    #[test]
    fn test_mip_level() {
        let size = Dimension2d::new(16, 4);
        assert_eq!(size.mip_level(1), Dimension2d::new(8, 2));
        assert_eq!(size.mip_level(3), Dimension2d::new(2, 1));
        assert_eq!(size.mip_level(10), Dimension2d::new(1, 1));
    }
}
