//! Grayscale error diffusion.
//!
//! The source is reduced to one luminance channel (an exact copy for grey
//! pixels) and binarized with a single [`diffuse`] pass.

use crate::raster::{ChannelGrid, Raster};

use super::{diffuse, Kernel};

/// Dither `image` to a single black-and-white channel.
///
/// Luminance is taken from the straight (non-premultiplied) RGB values and
/// alpha is ignored: a half-transparent red pixel dithers exactly like an
/// opaque red one rather than darkening toward black. Every sample of the
/// result is 0 or 255.
pub fn dither_mono(image: &Raster, kernel: &Kernel, error_multiplier: f32) -> ChannelGrid {
    diffuse(&image.to_luma(), kernel, error_multiplier)
}
