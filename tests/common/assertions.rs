//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

use super::fixtures::{read_luma, read_rgba};

/// Assert `path` is a PNG file.
pub fn assert_png(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected {} to exist: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG image at {}, got {} bytes starting with {:?}",
        path.display(),
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert a mono output has the given size and only black and white.
pub fn assert_bilevel_gray(path: &Path, width: u32, height: u32) {
    assert_png(path);
    let image = read_luma(path);
    assert_eq!(image.dimensions(), (width, height), "{}", path.display());
    assert!(
        image.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255),
        "Expected only 0/255 in {}",
        path.display()
    );
}

/// Assert a color output has the given size and binary R, G and B.
pub fn assert_bilevel_color(path: &Path, width: u32, height: u32) {
    assert_png(path);
    let image = read_rgba(path);
    assert_eq!(image.dimensions(), (width, height), "{}", path.display());
    assert!(
        image
            .pixels()
            .all(|p| p.0[..3].iter().all(|&s| s == 0 || s == 255)),
        "Expected only 0/255 color samples in {}",
        path.display()
    );
}
