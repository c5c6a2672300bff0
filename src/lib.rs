//! Halftone - render an image with every bi-level error diffusion kernel.
//!
//! The dithering itself lives in the `bilevel-dither` crate. This crate
//! adds the run around it: configuration, image I/O, parallel execution
//! of the job set and progress reporting. The library exposes those
//! pieces for integration testing.

pub mod config;
pub mod error;
pub mod image_io;
pub mod pipeline;
pub mod progress;
