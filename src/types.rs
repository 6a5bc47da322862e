// Core pixel types shared by the rasterizers, the alignment and the visualizer.
// Pixels are packed 0x00RRGGBB, one u32 each, rows stored top to bottom.

use crate::error::{Error, Result};
use image::{Rgb as ImageRgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One 24-bit color. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Unpack from 0x00RRGGBB (the top byte is ignored).
    #[inline]
    pub fn from_packed(px: u32) -> Self {
        Rgb(((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
    }

    #[inline]
    pub fn packed(self) -> u32 {
        ((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
    }

    /// Mix `self` toward `other` by `t` in [0,1] (0 = self, 1 = other).
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// An immutable rendered image: `width * height` packed pixels.
/// Zero width or zero height is valid and means "nothing was drawn".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // 0x00RRGGBB, row-major
}

impl PixelBuffer {
    /// Wrap packed pixels. Fails when the pixel count doesn't match the size.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self> {
        let Some(len) = width.checked_mul(height) else {
            return Err(Error::InvalidBuffer(format!("{width}x{height} is too large")));
        };
        if pixels.len() != len {
            return Err(Error::InvalidBuffer(format!("{width}x{height} needs {len} pixels, got {}", pixels.len())));
        }
        // Alpha is not part of the comparison; drop whatever the caller left there.
        let pixels = pixels.into_iter().map(|p| p & 0x00FF_FFFF).collect();
        Ok(Self { width, height, pixels })
    }

    /// Trusted constructor for in-crate painters whose sizes always agree.
    pub(crate) fn from_raw(width: usize, height: usize, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self { width, height, pixels }
    }

    /// A buffer of one flat color.
    ///
    /// # Panics
    /// When `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let len = width.checked_mul(height).unwrap_or_else(|| panic!("{width}x{height} buffer is too large"));
        Self { width, height, pixels: vec![color.packed(); len] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Packed pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at (x, y). Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        Rgb::from_packed(self.pixels[y * self.width + x])
    }

    /// Column `x`, or `None` past the right edge ("no column").
    pub fn column(&self, x: usize) -> Option<Column<'_>> {
        (x < self.width).then_some(Column { buffer: self, x })
    }

    /// Copy out of an `image` RGB image (e.g. a reference loaded from PNG).
    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img.pixels().map(|p| Rgb(p[0], p[1], p[2]).packed()).collect();
        Self { width: w as usize, height: h as usize, pixels }
    }

    /// Load a pre-rendered reference from any format `image` can decode.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?;
        Ok(Self::from_rgb_image(&img.to_rgb8()))
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let Rgb(r, g, b) = self.get(x as usize, y as usize);
            ImageRgb([r, g, b])
        })
    }
}

/// A one-pixel-wide, full-height view into a [`PixelBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    buffer: &'a PixelBuffer,
    x: usize,
}

impl<'a> Column<'a> {
    /// Horizontal offset of this column in its buffer.
    pub fn x(&self) -> usize {
        self.x
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    /// Packed pixels top to bottom.
    pub fn pixels(self) -> impl Iterator<Item = u32> + 'a {
        let (buf, x) = (self.buffer, self.x);
        (0..buf.height).map(move |y| buf.pixels[y * buf.width + x])
    }
}
