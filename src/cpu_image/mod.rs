//! CPU-side images.
//!
//! An [`Image`] is a plain pixel buffer with a color format, a dimension and a
//! pitch. Textures use it as the upload source, as the CPU mirror of level 0
//! and as scratch space for manual mip generation.

mod convert;

pub use convert::{convert_texels, is_convertible, read_color, write_color, Color};

use crate::error::{TextureError, TextureResult};
use crate::types::{ColorFormat, Dimension2d};

/// A CPU pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    format: ColorFormat,
    size: Dimension2d,
    pitch: u32,
    data: Vec<u8>,
    mip_maps: Option<Vec<u8>>,
}

impl Image {
    /// Allocate a zeroed image.
    pub fn new(format: ColorFormat, size: Dimension2d) -> Self {
        Self {
            format,
            size,
            pitch: size.width * format.bytes_per_pixel(),
            data: vec![0; format.data_size(size)],
            mip_maps: None,
        }
    }

    /// Wrap existing pixel data. `data` must be exactly one image of `size`.
    pub fn from_data(format: ColorFormat, size: Dimension2d, data: Vec<u8>) -> TextureResult<Self> {
        let expected = format.data_size(size);
        if data.len() != expected {
            return Err(TextureError::InvalidImageData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            format,
            size,
            pitch: size.width * format.bytes_per_pixel(),
            data,
            mip_maps: None,
        })
    }

    /// Attach a pre-built mip chain (levels 1.. packed back to back).
    pub fn with_mip_maps(mut self, mip_maps: Vec<u8>) -> Self {
        self.mip_maps = Some(mip_maps);
        self
    }

    pub fn dimension(&self) -> Dimension2d {
        self.size
    }

    pub fn color_format(&self) -> ColorFormat {
        self.format
    }

    /// Bytes per row. Zero for compressed images.
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        self.format.bytes_per_pixel()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn has_mip_maps(&self) -> bool {
        self.mip_maps.is_some()
    }

    pub fn mip_map_data(&self) -> Option<&[u8]> {
        self.mip_maps.as_deref()
    }

    fn texel_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height || self.format.is_compressed() {
            return None;
        }
        Some(y as usize * self.pitch as usize + (x * self.bytes_per_pixel()) as usize)
    }

    /// Decode the texel at `(x, y)`. `None` if out of range or not convertible.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let offset = self.texel_offset(x, y)?;
        read_color(self.format, &self.data[offset..])
    }

    /// Encode `color` at `(x, y)`. Returns false if out of range or not convertible.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.texel_offset(x, y) {
            Some(offset) => write_color(self.format, color, &mut self.data[offset..]),
            None => false,
        }
    }

    /// Set every texel to `color`.
    pub fn fill(&mut self, color: Color) {
        let bpp = self.bytes_per_pixel() as usize;
        if bpp == 0 || !is_convertible(self.format) {
            return;
        }
        let mut texel = [0u8; 4];
        write_color(self.format, color, &mut texel);
        for chunk in self.data.chunks_exact_mut(bpp) {
            chunk.copy_from_slice(&texel[..bpp]);
        }
    }

    /// Copy into `target` without scaling, converting the color format.
    ///
    /// The overlapping top-left region is copied when sizes differ.
    pub fn copy_to(&self, target: &mut Image) {
        if self.format.is_compressed() || target.format.is_compressed() {
            if self.format == target.format && self.data.len() == target.data.len() {
                target.data.copy_from_slice(&self.data);
            } else {
                log::error!("cannot copy compressed image data between different layouts");
            }
            return;
        }
        let width = self.size.width.min(target.size.width) as usize;
        let height = self.size.height.min(target.size.height) as usize;
        let src_pitch = self.pitch as usize;
        let dst_pitch = target.pitch as usize;
        for y in 0..height {
            let src = &self.data[y * src_pitch..];
            let dst = &mut target.data[y * dst_pitch..];
            if !convert_texels(self.format, src, target.format, dst, width) {
                log::error!(
                    "no conversion from {:?} to {:?}",
                    self.format,
                    target.format
                );
                return;
            }
        }
    }

    /// Copy into `target`, scaling to its dimension and converting the color format.
    pub fn copy_to_scaling(&self, target: &mut Image) {
        if self.size == target.size {
            self.copy_to(target);
            return;
        }
        let size = target.size;
        let format = target.format;
        self.copy_to_scaling_raw(&mut target.data, size.width, size.height, format);
    }

    /// Scale into a raw buffer of `width` x `height` texels in `format`.
    ///
    /// Uses nearest sampling. Returns false if the data is compressed, no
    /// conversion exists, or `target` is too small.
    pub fn copy_to_scaling_raw(
        &self,
        target: &mut [u8],
        width: u32,
        height: u32,
        format: ColorFormat,
    ) -> bool {
        if self.format.is_compressed() || format.is_compressed() {
            log::error!("cannot scale compressed image data");
            return false;
        }
        if width == 0 || height == 0 || self.size.is_empty() {
            return false;
        }
        if self.format != format && !(is_convertible(self.format) && is_convertible(format)) {
            log::error!("no conversion from {:?} to {:?}", self.format, format);
            return false;
        }
        let dst_bpp = format.bytes_per_pixel() as usize;
        let dst_pitch = width as usize * dst_bpp;
        if target.len() < dst_pitch * height as usize {
            log::error!(
                "scaling target holds {} bytes, need {}",
                target.len(),
                dst_pitch * height as usize
            );
            return false;
        }
        let src_bpp = self.bytes_per_pixel() as usize;
        let src_pitch = self.pitch as usize;
        for y in 0..height as usize {
            let sy = y * self.size.height as usize / height as usize;
            for x in 0..width as usize {
                let sx = x * self.size.width as usize / width as usize;
                let src = &self.data[sy * src_pitch + sx * src_bpp..];
                let dst = &mut target[y * dst_pitch + x * dst_bpp..];
                convert_texels(self.format, src, format, dst, 1);
            }
        }
        true
    }

    /// Reverse the row order in place.
    pub fn flip_vertical(&mut self) {
        let pitch = self.pitch as usize;
        if pitch == 0 {
            return;
        }
        let height = self.size.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - y) * pitch);
            top[y * pitch..(y + 1) * pitch].swap_with_slice(&mut bottom[..pitch]);
        }
    }

    /// Convert to an `image` crate RGBA buffer. `None` for formats without a conversion.
    pub fn to_rgba8(&self) -> Option<::image::RgbaImage> {
        if !is_convertible(self.format) {
            return None;
        }
        let mut rgba = Vec::with_capacity(self.size.area() * 4);
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let c = self.pixel(x, y)?;
                rgba.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        ::image::RgbaImage::from_raw(self.size.width, self.size.height, rgba)
    }
}

impl From<&::image::DynamicImage> for Image {
    /// Decode into an `A8R8G8B8` image.
    fn from(img: &::image::DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let size = Dimension2d::new(rgba.width(), rgba.height());
        let data = rgba
            .pixels()
            .flat_map(|p| {
                let [r, g, b, a] = p.0;
                Color::new(a, r, g, b).to_bytes()
            })
            .collect();
        Self {
            format: ColorFormat::A8R8G8B8,
            size,
            pitch: size.width * 4,
            data,
            mip_maps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(format: ColorFormat, width: u32, height: u32) -> Image {
        let mut image = Image::new(format, Dimension2d::new(width, height));
        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, Color::new(0xff, (x * 16) as u8, (y * 16) as u8, 0));
            }
        }
        image
    }

    #[test]
    fn test_from_data_checks_length() {
        let err = Image::from_data(ColorFormat::A8R8G8B8, Dimension2d::new(2, 2), vec![0; 15]);
        assert_eq!(
            err,
            Err(TextureError::InvalidImageData {
                expected: 16,
                actual: 15
            })
        );
        let dxt = Image::from_data(ColorFormat::Dxt1, Dimension2d::new(4, 4), vec![0; 8]);
        assert!(dxt.is_ok());
    }

    #[test]
    fn test_copy_to_converts_format() {
        let src = gradient(ColorFormat::A8R8G8B8, 4, 4);
        let mut dst = Image::new(ColorFormat::R8G8B8, Dimension2d::new(4, 4));
        src.copy_to(&mut dst);
        assert_eq!(dst.pixel(3, 2), Some(Color::new(0xff, 48, 32, 0)));
    }

    #[test]
    fn test_copy_to_scaling_nearest() {
        let src = gradient(ColorFormat::A8R8G8B8, 4, 4);
        let mut dst = Image::new(ColorFormat::A8R8G8B8, Dimension2d::new(2, 2));
        src.copy_to_scaling(&mut dst);
        assert_eq!(dst.pixel(1, 1), src.pixel(2, 2));

        let mut up = Image::new(ColorFormat::A8R8G8B8, Dimension2d::new(8, 8));
        src.copy_to_scaling(&mut up);
        assert_eq!(up.pixel(7, 7), src.pixel(3, 3));
        assert_eq!(up.pixel(1, 0), src.pixel(0, 0));
    }

    #[test]
    fn test_copy_to_scaling_raw_rejects_small_target() {
        let src = gradient(ColorFormat::A8R8G8B8, 4, 4);
        let mut small = vec![0u8; 3];
        assert!(!src.copy_to_scaling_raw(&mut small, 2, 2, ColorFormat::A8R8G8B8));
    }

    #[test]
    fn test_flip_vertical() {
        let mut image = gradient(ColorFormat::A8R8G8B8, 2, 3);
        let top = image.pixel(1, 0);
        let bottom = image.pixel(1, 2);
        image.flip_vertical();
        assert_eq!(image.pixel(1, 0), bottom);
        assert_eq!(image.pixel(1, 2), top);
        assert_eq!(image.pixel(0, 1), gradient(ColorFormat::A8R8G8B8, 2, 3).pixel(0, 1));
    }

    #[test]
    fn test_dynamic_image_round_trip() {
        let mut rgba = ::image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, ::image::Rgba([10, 20, 30, 40]));
        rgba.put_pixel(1, 0, ::image::Rgba([50, 60, 70, 80]));
        let image = Image::from(&::image::DynamicImage::ImageRgba8(rgba.clone()));

        assert_eq!(image.color_format(), ColorFormat::A8R8G8B8);
        assert_eq!(image.data()[..4], [30, 20, 10, 40]);
        assert_eq!(image.to_rgba8(), Some(rgba));
    }
}
