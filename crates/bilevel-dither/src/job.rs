//! Units of work: one kernel applied in one mode.
//!
//! A [`DitherJob`] owns nothing but its selection; running it against a
//! [`Raster`] allocates that job's grids and error buffers and drops them
//! when it returns. Jobs never share mutable state, so any number of them
//! can run concurrently against the same source image.

use std::fmt;

use crate::dither::{dither_color, dither_mono, DitherAlgorithm};
use crate::raster::{ChannelGrid, Raster};

/// Which channels a job dithers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DitherMode {
    /// Luminance only; single-channel result.
    Mono,
    /// R, G and B independently; alpha preserved.
    Color,
}

impl DitherMode {
    /// Directory name used for this mode's outputs.
    pub fn dir_name(self) -> &'static str {
        match self {
            DitherMode::Mono => "mono",
            DitherMode::Color => "color",
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Output of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizedResult {
    Mono(ChannelGrid),
    Color(Raster),
}

impl QuantizedResult {
    pub fn width(&self) -> usize {
        match self {
            QuantizedResult::Mono(grid) => grid.width(),
            QuantizedResult::Color(raster) => raster.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            QuantizedResult::Mono(grid) => grid.height(),
            QuantizedResult::Color(raster) => raster.height(),
        }
    }

    /// True when every dithered sample is 0 or 255 (alpha excluded).
    pub fn is_binary(&self) -> bool {
        match self {
            QuantizedResult::Mono(grid) => grid.is_binary(),
            QuantizedResult::Color(raster) => raster
                .pixels()
                .iter()
                .all(|px| px[..3].iter().all(|&s| s == 0 || s == 255)),
        }
    }
}

/// One kernel in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DitherJob {
    pub algorithm: DitherAlgorithm,
    pub mode: DitherMode,
}

impl DitherJob {
    pub fn new(algorithm: DitherAlgorithm, mode: DitherMode) -> Self {
        Self { algorithm, mode }
    }

    /// Dither `image` with this job's kernel and mode.
    pub fn run(&self, image: &Raster, error_multiplier: f32) -> QuantizedResult {
        let kernel = self.algorithm.kernel();
        match self.mode {
            DitherMode::Mono => QuantizedResult::Mono(dither_mono(image, kernel, error_multiplier)),
            DitherMode::Color => {
                QuantizedResult::Color(dither_color(image, kernel, error_multiplier))
            }
        }
    }
}

impl fmt::Display for DitherJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mode, self.algorithm)
    }
}

/// Cross product of algorithms and modes, algorithm-major.
///
/// For each algorithm the color job comes before the mono job when both
/// modes are requested, matching the order outputs are listed in.
pub fn plan_jobs(algorithms: &[DitherAlgorithm], modes: &[DitherMode]) -> Vec<DitherJob> {
    algorithms
        .iter()
        .flat_map(|&algorithm| modes.iter().map(move |&mode| DitherJob::new(algorithm, mode)))
        .collect()
}
