//! RGBA raster and the luminance transform.

use super::channel_grid::ChannelGrid;
use super::error::{check_len, GridError};

/// Luminance of an 8-bit sRGB triple.
///
/// Uses the 16.16 fixed-point weights 19595/38470/7471 (0.299/0.587/0.114)
/// on 16-bit widened samples, rounding to nearest. Grey inputs come back
/// unchanged: `luminance(v, v, v) == v` for every `v`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let widen = |v: u8| v as u32 * 0x101;
    let y = (19595 * widen(r) + 38470 * widen(g) + 7471 * widen(b) + (1 << 15)) >> 24;
    y as u8
}

/// A decoded image: width×height RGBA pixels in row-major order.
///
/// Alpha is carried along but never dithered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl Raster {
    /// Wrap row-major RGBA pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> Result<Self, GridError> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from interleaved `[R, G, B, A, R, G, B, A, ...]` bytes.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, GridError> {
        if bytes.len() % 4 != 0 {
            return Err(GridError::LengthMismatch {
                width,
                height,
                expected: width * height,
                actual: bytes.len() / 4,
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Self::new(width, height, pixels)
    }

    /// A raster with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgba; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the raster.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Extract channel `index` (0 = R, 1 = G, 2 = B, 3 = A).
    ///
    /// # Panics
    ///
    /// Panics if `index > 3`.
    pub fn channel(&self, index: usize) -> ChannelGrid {
        assert!(index < 4, "channel index {index} out of range");
        let samples = self.pixels.iter().map(|px| px[index]).collect();
        ChannelGrid::from_parts(self.width, self.height, samples)
    }

    /// Plain grayscale conversion via [`luminance`]. Alpha is ignored.
    pub fn to_luma(&self) -> ChannelGrid {
        let samples = self
            .pixels
            .iter()
            .map(|&[r, g, b, _]| luminance(r, g, b))
            .collect();
        ChannelGrid::from_parts(self.width, self.height, samples)
    }

    /// Replace the color channels, keeping this raster's alpha.
    ///
    /// The grids must match this raster's dimensions.
    pub(crate) fn recombine(
        &self,
        red: &ChannelGrid,
        green: &ChannelGrid,
        blue: &ChannelGrid,
    ) -> Raster {
        let pixels = self
            .pixels
            .iter()
            .zip(red.samples())
            .zip(green.samples())
            .zip(blue.samples())
            .map(|(((px, &r), &g), &b)| [r, g, b, px[3]])
            .collect();
        Raster {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Interleaved RGBA bytes, four per pixel.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}
