//! Single-channel sample grid.

use super::error::{check_len, GridError};

/// A width×height grid of `u8` samples in row-major order.
///
/// Used both as diffusion input (a luminance or color channel) and as the
/// binarized output of a diffusion pass, where every sample is 0 or 255.
///
/// # Example
///
/// ```
/// use bilevel_dither::ChannelGrid;
///
/// let grid = ChannelGrid::new(2, 1, vec![10, 250]).unwrap();
/// assert_eq!(grid.get(1, 0), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGrid {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl ChannelGrid {
    /// Wrap row-major samples.
    ///
    /// Fails if `samples.len() != width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u8>) -> Result<Self, GridError> {
        check_len(width, height, samples.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    /// Build from an already length-checked buffer.
    pub(crate) fn from_parts(width: usize, height: usize, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        Self {
            width,
            height,
            samples,
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

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.samples[y * self.width + x]
    }

    /// Row-major samples.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// True when every sample is exactly 0 or 255.
    pub fn is_binary(&self) -> bool {
        self.samples.iter().all(|&s| s == 0 || s == 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = ChannelGrid::new(2, 2, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_get_is_row_major() {
        let grid = ChannelGrid::new(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(grid.get(0, 1), 3);
        assert_eq!(grid.get(2, 0), 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        ChannelGrid::filled(2, 2, 0).get(2, 0);
    }

    #[test]
    fn test_is_binary() {
        assert!(ChannelGrid::new(2, 1, vec![0, 255]).unwrap().is_binary());
        assert!(!ChannelGrid::new(2, 1, vec![0, 128]).unwrap().is_binary());
        assert!(ChannelGrid::filled(0, 0, 7).is_binary());
    }
}
