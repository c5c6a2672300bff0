//! bilevel-dither: error diffusion to black and white, per channel
//!
//! This library binarizes continuous-tone images by error diffusion: each
//! pixel is snapped to 0 or 255 and the quantization error is pushed onto
//! pixels the scan has not reached yet, so local average intensity survives.
//!
//! # Quick Start
//!
//! ```
//! use bilevel_dither::{DitherAlgorithm, DitherJob, DitherMode, Raster};
//!
//! let image = Raster::filled(4, 4, [128, 64, 200, 255]);
//! let job = DitherJob::new(DitherAlgorithm::FloydSteinberg, DitherMode::Color);
//! let result = job.run(&image, 1.0);
//!
//! assert!(result.is_binary());
//! ```
//!
//! # Building Blocks
//!
//! - [`diffuse`]: the engine, one channel, any [`Kernel`]
//! - [`dither_mono`]: luminance channel, one pass
//! - [`dither_color`]: R, G and B as independent passes, alpha untouched
//! - [`threshold`]: flat baseline, no diffusion
//!
//! # Two Thresholds
//!
//! Diffusion always splits corrected values at 128 ([`BINARIZE_THRESHOLD`]).
//! The flat baseline compares raw samples against its own level, 123 by
//! default ([`DEFAULT_THRESHOLD_LEVEL`]). They are separate parameters.
//!
//! # Concurrency
//!
//! A single pass is inherently sequential: every pixel depends on error
//! from pixels before it in scan order. Separate passes share nothing, so
//! [`dither_color`] runs its three channels on the rayon pool and callers
//! can run whole [`DitherJob`]s in parallel.

pub mod dither;
pub mod job;
pub mod raster;


pub use dither::{
    diffuse, dither_color, dither_mono, threshold, DitherAlgorithm, ErrorBuffer, Kernel,
    KernelError, UnknownAlgorithm, BINARIZE_THRESHOLD, DEFAULT_ERROR_MULTIPLIER,
    DEFAULT_THRESHOLD_LEVEL,
};
pub use job::{plan_jobs, DitherJob, DitherMode, QuantizedResult};
pub use raster::{luminance, ChannelGrid, GridError, Raster};
