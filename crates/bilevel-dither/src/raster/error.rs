//! Error type for grid construction.

use thiserror::Error;

/// Returned when pixel data does not match the declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Buffer length differs from `width * height`.
    #[error("expected {expected} pixels for a {width}x{height} image, got {actual}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

pub(crate) fn check_len(width: usize, height: usize, actual: usize) -> Result<(), GridError> {
    let expected = width * height;
    if actual == expected {
        Ok(())
    } else {
        Err(GridError::LengthMismatch {
            width,
            height,
            expected,
            actual,
        })
    }
}
