//! Test images written to disk on demand.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Source dimensions used by most tests.
pub const WIDTH: u32 = 24;
pub const HEIGHT: u32 = 16;

/// Horizontal color ramps with a vertical alpha ramp.
pub fn gradient() -> RgbaImage {
    RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
        Rgba([
            (x * 255 / (WIDTH - 1)) as u8,
            (y * 255 / (HEIGHT - 1)) as u8,
            255 - (x * 255 / (WIDTH - 1)) as u8,
            (128 + y * 127 / (HEIGHT - 1)) as u8,
        ])
    })
}

/// A uniform opaque grey.
pub fn flat_grey(value: u8, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
}

/// Save `image` as `name` inside `dir`.
pub fn write_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("fixture image should save");
    path
}

/// Decode an output file to 8-bit grayscale.
pub fn read_luma(path: &Path) -> image::GrayImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("cannot open {}: {e}", path.display()))
        .to_luma8()
}

/// Decode an output file to RGBA.
pub fn read_rgba(path: &Path) -> RgbaImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("cannot open {}: {e}", path.display()))
        .to_rgba8()
}
