//! Pixel containers consumed and produced by the dithering engine.
//!
//! - [`ChannelGrid`]: one `u8` sample per pixel, the unit a diffusion pass
//!   works on (a luminance channel, or one of R/G/B).
//! - [`Raster`]: RGBA pixels as decoded from an image file, and the shape of
//!   a color dithering result.

mod channel_grid;
mod error;
mod rgba;

pub use channel_grid::ChannelGrid;
pub use error::GridError;
pub use rgba::{luminance, Raster};
