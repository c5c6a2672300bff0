//! Per-channel color error diffusion.
//!
//! Red, green and blue are dithered as three independent [`diffuse`]
//! passes, each with its own error buffer, and recombined with the source
//! alpha. Every output pixel is one of the eight corners of the RGB cube.

use rayon::prelude::*;

use crate::raster::{ChannelGrid, Raster};

use super::{diffuse, Kernel};

/// Dither the color channels of `image` independently.
///
/// The three passes share nothing and run on the rayon pool. Alpha is
/// copied through unchanged.
pub fn dither_color(image: &Raster, kernel: &Kernel, error_multiplier: f32) -> Raster {
    let channels: Vec<ChannelGrid> = (0..3)
        .into_par_iter()
        .map(|c| diffuse(&image.channel(c), kernel, error_multiplier))
        .collect();
    image.recombine(&channels[0], &channels[1], &channels[2])
}
