//! Flat threshold baseline.
//!
//! No kernel, no error buffer: each sample is compared against a fixed
//! level on its own. Useful as a reference next to the diffused outputs.

use crate::raster::ChannelGrid;

/// Default baseline level. Distinct from the diffusion threshold (128).
pub const DEFAULT_THRESHOLD_LEVEL: u8 = 123;

/// Samples strictly above `level` become 255, the rest 0.
pub fn threshold(grid: &ChannelGrid, level: u8) -> ChannelGrid {
    let samples = grid
        .samples()
        .iter()
        .map(|&s| if s > level { 255 } else { 0 })
        .collect();
    ChannelGrid::from_parts(grid.width(), grid.height(), samples)
}
