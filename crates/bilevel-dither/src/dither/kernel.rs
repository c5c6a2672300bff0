//! Error diffusion kernel definitions.
//!
//! Each kernel is a small weight matrix laid over the pixel being processed.
//! Row 0 is the current row, row 1 the next one, and so on. Columns are
//! relative to the kernel's `center` column, which sits on the processed
//! pixel itself.

use thiserror::Error;

/// An error diffusion kernel.
///
/// Weights are stored as integer numerators over a shared `divisor`, so the
/// catalog tables read exactly like the published matrices. A neighbor at
/// matrix position `(row, col)` receives `error * weights[row][col] / divisor`.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor`. Most kernels
/// propagate 100% of error, but Atkinson intentionally propagates only 75%.
///
/// # Causality
///
/// Only pixels not yet visited by the raster scan may receive error, so every
/// weight in row 0 at or left of `center` must be zero. [`Kernel::validate`]
/// checks this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// Weight numerators, one slice per forward row offset.
    pub weights: &'static [&'static [u8]],

    /// Shared divisor for all weights.
    pub divisor: u8,

    /// Column index of the processed pixel.
    pub center: usize,
}

/// Reasons a kernel table cannot be used for diffusion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("kernel has no rows")]
    Empty,

    #[error("kernel divisor must be non-zero")]
    ZeroDivisor,

    #[error("kernel row {row} has {len} columns, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("center column {center} is outside a row of {cols} columns")]
    CenterOutOfRange { center: usize, cols: usize },

    #[error("column {col} of the current row would diffuse into an already visited pixel")]
    Acausal { col: usize },
}

impl Kernel {
    /// Number of rows the kernel reaches, including the current row.
    ///
    /// The error buffer needs exactly this many rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.weights.len()
    }

    /// Width of the weight matrix.
    #[inline]
    pub fn cols(&self) -> usize {
        self.weights.first().map_or(0, |row| row.len())
    }

    /// Column index of the processed pixel.
    #[inline]
    pub fn center(&self) -> usize {
        self.center
    }

    /// Sum of all normalized weights (the fraction of error propagated).
    pub fn total_weight(&self) -> f32 {
        let sum: u32 = self
            .weights
            .iter()
            .flat_map(|row| row.iter())
            .map(|&w| w as u32)
            .sum();
        sum as f32 / self.divisor as f32
    }

    /// Non-zero taps as `(dx, dy, weight)`.
    ///
    /// `dx` is the column offset from the processed pixel (positive = right),
    /// `dy` the row offset (0 = current row).
    pub fn taps(&self) -> impl Iterator<Item = (isize, usize, f32)> + '_ {
        let center = self.center as isize;
        let divisor = self.divisor as f32;
        self.weights.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &w)| w != 0)
                .map(move |(col, &w)| (col as isize - center, dy, w as f32 / divisor))
        })
    }

    /// Check the table is usable by the diffusion engine.
    pub fn validate(&self) -> Result<(), KernelError> {
        let cols = match self.weights.first() {
            Some(row) => row.len(),
            None => return Err(KernelError::Empty),
        };
        if self.divisor == 0 {
            return Err(KernelError::ZeroDivisor);
        }
        for (row, weights) in self.weights.iter().enumerate() {
            if weights.len() != cols {
                return Err(KernelError::Ragged {
                    row,
                    len: weights.len(),
                    expected: cols,
                });
            }
        }
        if self.center >= cols {
            return Err(KernelError::CenterOutOfRange {
                center: self.center,
                cols,
            });
        }
        if let Some(col) = self.weights[0][..=self.center]
            .iter()
            .position(|&w| w != 0)
        {
            return Err(KernelError::Acausal { col });
        }
        Ok(())
    }
}

/// Floyd-Steinberg kernel as used by this tool: a three-row matrix in 48ths
/// (the same weights Jarvis, Judice and Ninke published).
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    weights: &[&[0, 0, 0, 7, 5], &[3, 5, 7, 5, 3], &[1, 3, 5, 3, 1]],
    divisor: 48,
    center: 2,
};

/// Stucki kernel.
///
/// Higher center weights and lower corner weights than the 48ths matrix give
/// slightly sharper results.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    weights: &[&[0, 0, 0, 8, 4], &[2, 4, 8, 4, 2], &[1, 2, 4, 2, 1]],
    divisor: 42,
    center: 2,
};

/// Atkinson kernel.
///
/// Six neighbors receive 1/8 each, 75% in total. The lost quarter keeps
/// highlights and shadows clean. The window is four columns wide with the
/// processed pixel in column 1.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    weights: &[&[0, 0, 1, 1], &[1, 1, 1, 0], &[0, 1, 0, 0]],
    divisor: 8,
    center: 1,
};

/// Burkes kernel: Stucki reduced to two rows.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: Kernel = Kernel {
    weights: &[&[0, 0, 0, 8, 4], &[2, 4, 8, 4, 2], &[0, 0, 0, 0, 0]],
    divisor: 32,
    center: 2,
};

/// Sierra (three-row) kernel.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA_3: Kernel = Kernel {
    weights: &[&[0, 0, 0, 5, 3], &[2, 4, 5, 4, 2], &[0, 2, 3, 2, 0]],
    divisor: 32,
    center: 2,
};

/// Sierra two-row kernel.
///
/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
pub const SIERRA_2: Kernel = Kernel {
    weights: &[&[0, 0, 0, 4, 3], &[1, 2, 3, 2, 1], &[0, 0, 0, 0, 0]],
    divisor: 16,
    center: 2,
};

/// Sierra Lite kernel, the minimal 2x2 pattern.
///
/// ```text
///    X   2
///    1   1
/// ```
pub const SIERRA_LITE: Kernel = Kernel {
    weights: &[&[0, 0, 2], &[1, 1, 0], &[0, 0, 0]],
    divisor: 4,
    center: 1,
};
