//! Raster image domain — the RGBA pixel buffer every other layer works on.
//!
//! `RasterImage` is a plain row-major RGBA8 buffer. Conversions to and from
//! the `image` crate live here so backends can hand frames in whatever form
//! they already hold.

mod decode;

pub use decode::{decode_bytes, decode_data_url, open};

use image::{DynamicImage, ImageFormat, RgbaImage};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Immutable RGBA raster, row-major, stride `width * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA buffer.
    ///
    /// # Panics
    ///
    /// Panics when `pixels.len() != width * height * 4`. A mismatched buffer
    /// is a caller bug, not something to recover from.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let expected = width as usize * height as usize * CHANNELS;
        assert_eq!(
            pixels.len(),
            expected,
            "RGBA buffer for {}x{} must be {} bytes",
            width,
            height,
            expected
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Solid-colour image. Mostly useful for building test canvases.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// One full row of RGBA bytes.
    ///
    /// # Panics
    ///
    /// Panics when `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Copy rows `top..=bottom` into a new, independently owned image of the
    /// same width.
    ///
    /// # Panics
    ///
    /// Panics when the range is empty or reaches past the last row.
    pub fn crop_rows(&self, top: u32, bottom: u32) -> RasterImage {
        assert!(
            top <= bottom && bottom < self.height,
            "row range {}..={} outside image of height {}",
            top,
            bottom,
            self.height
        );
        let stride = self.stride();
        let start = top as usize * stride;
        let end = (bottom as usize + 1) * stride;
        RasterImage::new(self.width, bottom - top + 1, self.pixels[start..end].to_vec())
    }

    /// Take ownership of an `image` crate RGBA buffer without copying.
    pub fn from_rgba(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Copy into an `image` crate RGBA buffer.
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Encode to PNG in memory. Backends that consume encoded images get
    /// bytes directly, no temp file.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut png_bytes = Vec::new();
        self.to_rgba().write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            ImageFormat::Png,
        )?;
        Ok(png_bytes)
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(image: RgbaImage) -> Self {
        Self::from_rgba(image)
    }
}

impl From<&DynamicImage> for RasterImage {
    fn from(image: &DynamicImage) -> Self {
        Self::from_rgba(image.to_rgba8())
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self::from_rgba(image.into_rgba8())
    }
}
