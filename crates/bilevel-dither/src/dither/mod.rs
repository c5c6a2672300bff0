//! Bi-level error diffusion.
//!
//! One generic engine, [`diffuse`], binarizes a single [`ChannelGrid`] with
//! any [`Kernel`]. Everything else is built on it:
//!
//! - [`dither_mono`]: luminance channel, one pass
//! - [`dither_color`]: R, G and B as three independent passes, alpha kept
//! - [`threshold`]: the flat, non-diffusing baseline
//!
//! # Algorithms
//!
//! Seven kernels are available via [`DitherAlgorithm`]:
//!
//! - **FloydSteinberg**: three-row matrix in 48ths
//! - **Stucki**: three rows, sharper center weights
//! - **Atkinson**: 75% error propagation
//! - **Burkes**: two-row Stucki
//! - **Sierra-3**, **Sierra-2**, **Sierra-Lite**: the Sierra family
//!
//! # Example
//!
//! ```
//! use bilevel_dither::{diffuse, ChannelGrid, DitherAlgorithm};
//!
//! let grid = ChannelGrid::filled(4, 4, 128);
//! let result = diffuse(&grid, DitherAlgorithm::Atkinson.kernel(), 1.0);
//! assert!(result.is_binary());
//! ```

mod color;
mod kernel;
mod mono;
mod threshold;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::raster::ChannelGrid;

pub use color::dither_color;
pub use kernel::*;
pub use mono::dither_mono;
pub use threshold::{threshold, DEFAULT_THRESHOLD_LEVEL};

/// Corrected samples below this value become black, the rest white.
pub const BINARIZE_THRESHOLD: f32 = 128.0;

/// Error multiplier used when the caller does not pick one.
///
/// At 1.0 the diffused error is injected unscaled, so local average
/// intensity is preserved. Values below 1 damp the error history, values
/// above 1 amplify it.
pub const DEFAULT_ERROR_MULTIPLIER: f32 = 1.0;

/// Named entry of the kernel catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DitherAlgorithm {
    /// Three-row matrix in 48ths, 100% propagation, 12 neighbors.
    FloydSteinberg,
    /// Three rows in 42nds, 100% propagation, 12 neighbors.
    Stucki,
    /// 75% propagation, 6 neighbors.
    Atkinson,
    /// Two rows in 32nds, 100% propagation, 7 neighbors.
    Burkes,
    /// Three rows in 32nds, 100% propagation, 10 neighbors.
    Sierra3,
    /// Two rows in 16ths, 100% propagation, 7 neighbors.
    Sierra2,
    /// Minimal 2x2 pattern, 100% propagation, 3 neighbors.
    SierraLite,
}

/// Returned when a name does not match any catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dithering method '{0}' (expected one of: FloydSteinberg, Stucki, Atkinson, Burkes, Sierra-3, Sierra-2, Sierra-Lite)")]
pub struct UnknownAlgorithm(pub String);

impl DitherAlgorithm {
    /// The whole catalog, in the order outputs are produced.
    pub const ALL: [DitherAlgorithm; 7] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Stucki,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Burkes,
        DitherAlgorithm::Sierra3,
        DitherAlgorithm::Sierra2,
        DitherAlgorithm::SierraLite,
    ];

    /// Display name, also used as the output file stem.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "FloydSteinberg",
            DitherAlgorithm::Stucki => "Stucki",
            DitherAlgorithm::Atkinson => "Atkinson",
            DitherAlgorithm::Burkes => "Burkes",
            DitherAlgorithm::Sierra3 => "Sierra-3",
            DitherAlgorithm::Sierra2 => "Sierra-2",
            DitherAlgorithm::SierraLite => "Sierra-Lite",
        }
    }

    pub fn kernel(self) -> &'static Kernel {
        match self {
            DitherAlgorithm::FloydSteinberg => &FLOYD_STEINBERG,
            DitherAlgorithm::Stucki => &STUCKI,
            DitherAlgorithm::Atkinson => &ATKINSON,
            DitherAlgorithm::Burkes => &BURKES,
            DitherAlgorithm::Sierra3 => &SIERRA_3,
            DitherAlgorithm::Sierra2 => &SIERRA_2,
            DitherAlgorithm::SierraLite => &SIERRA_LITE,
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = UnknownAlgorithm;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so `Sierra-Lite`,
    /// `sierra_lite` and `SIERRALITE` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "floydsteinberg" => Ok(DitherAlgorithm::FloydSteinberg),
            "stucki" => Ok(DitherAlgorithm::Stucki),
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            "burkes" => Ok(DitherAlgorithm::Burkes),
            "sierra3" | "sierra" => Ok(DitherAlgorithm::Sierra3),
            "sierra2" => Ok(DitherAlgorithm::Sierra2),
            "sierralite" => Ok(DitherAlgorithm::SierraLite),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Error buffer for a single channel.
///
/// Keeps a sliding window of error rows, only as many as the kernel reaches
/// (`kernel.rows()`), instead of a full-image buffer. Each cell a pending
/// diffusion can target is held until its row becomes current.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// rows[0] is the current row, rows[1] the next, etc.
    rows: Vec<Vec<f32>>,
    width: usize,
}

impl ErrorBuffer {
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `row_depth` - Number of rows to track (the kernel's row count)
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth.max(1)).map(|_| vec![0.0; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> f32 {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: f32) {
        if x < self.width && row_offset < self.rows.len() {
            self.rows[row_offset][x] += error;
        }
    }

    /// Rotate the window down one row; the new last row starts at zero.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0.0);
        }
    }
}

/// Binarize a corrected sample.
///
/// Returns the output level and the quantization error `output - corrected`,
/// which is later subtracted from the neighbors that receive it.
#[inline]
fn binarize(corrected: f32) -> (u8, f32) {
    if corrected < BINARIZE_THRESHOLD {
        (0, -corrected)
    } else {
        (255, 255.0 - corrected)
    }
}

/// Binarize one channel by error diffusion.
///
/// Pixels are visited in row-major order. Each pixel's corrected value is
/// `sample - accumulated_error * error_multiplier`; the resulting
/// quantization error is spread over the kernel's taps. Taps that fall
/// outside the grid are dropped, without renormalizing the rest.
///
/// The pass is a pure function of its arguments: the error buffer lives and
/// dies inside this call. `error_multiplier` is not range-checked.
///
/// # Returns
///
/// A grid of the same size whose samples are all 0 or 255.
pub fn diffuse(grid: &ChannelGrid, kernel: &Kernel, error_multiplier: f32) -> ChannelGrid {
    diffuse_observed(grid, kernel, error_multiplier, |_, _, _| {})
}

/// [`diffuse`], reporting each pixel's corrected value to `observe`.
pub(crate) fn diffuse_observed<F>(
    grid: &ChannelGrid,
    kernel: &Kernel,
    error_multiplier: f32,
    mut observe: F,
) -> ChannelGrid
where
    F: FnMut(usize, usize, f32),
{
    let width = grid.width();
    let height = grid.height();
    let samples = grid.samples();
    let taps: Vec<(isize, usize, f32)> = kernel.taps().collect();

    let mut output = vec![0u8; width * height];
    let mut error_buf = ErrorBuffer::new(width, kernel.rows());

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let corrected = samples[idx] as f32 - error_buf.get_accumulated(x) * error_multiplier;
            observe(x, y, corrected);

            let (level, quant_error) = binarize(corrected);
            output[idx] = level;

            for &(dx, dy, weight) in &taps {
                if y + dy >= height {
                    continue;
                }
                let tx = x as isize + dx;
                if tx < 0 || tx as usize >= width {
                    continue;
                }
                error_buf.add_error(tx as usize, dy, quant_error * weight);
            }
        }
        error_buf.advance_row();
    }

    ChannelGrid::from_parts(width, height, output)
}
