//! Image decoding and PNG encoding.
//!
//! Any format the `image` crate is built with can be read; everything is
//! written as PNG. Dithered mono results are packed to 1-bit grayscale,
//! the plain grayscale export stays 8-bit, and color results keep RGBA.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use bilevel_dither::{ChannelGrid, QuantizedResult, Raster};

use crate::error::{InputError, OutputError};

/// Decode `path` into an RGBA raster.
pub fn load_image(path: &Path) -> Result<Raster, InputError> {
    let read_error = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };
    let decoded = image::ImageReader::open(path)
        .map_err(read_error)?
        .with_guessed_format()
        .map_err(read_error)?
        .decode()
        .map_err(|source| InputError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(path = %path.display(), width, height, "Decoded image");

    Raster::from_rgba_bytes(width as usize, height as usize, rgba.as_raw()).map_err(|source| {
        InputError::Raster {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Write an 8-bit grayscale PNG.
pub fn write_gray_png(path: &Path, grid: &ChannelGrid) -> Result<(), OutputError> {
    encode_png(
        path,
        grid.width(),
        grid.height(),
        png::ColorType::Grayscale,
        png::BitDepth::Eight,
        grid.samples(),
    )
}

/// Write a two-level grid as a 1-bit grayscale PNG.
///
/// Samples below 128 become black and the rest white, so a grid that is
/// not strictly binary still encodes.
pub fn write_bilevel_png(path: &Path, grid: &ChannelGrid) -> Result<(), OutputError> {
    let bits: Vec<u8> = grid.samples().iter().map(|&s| u8::from(s >= 128)).collect();
    let packed = pack_nbits(&bits, grid.width(), 1);
    encode_png(
        path,
        grid.width(),
        grid.height(),
        png::ColorType::Grayscale,
        png::BitDepth::One,
        &packed,
    )
}

/// Write an 8-bit RGBA PNG.
pub fn write_rgba_png(path: &Path, raster: &Raster) -> Result<(), OutputError> {
    encode_png(
        path,
        raster.width(),
        raster.height(),
        png::ColorType::Rgba,
        png::BitDepth::Eight,
        &raster.to_rgba_bytes(),
    )
}

/// Write a job result in the encoding its mode calls for.
pub fn write_result(path: &Path, result: &QuantizedResult) -> Result<(), OutputError> {
    match result {
        QuantizedResult::Mono(grid) => write_bilevel_png(path, grid),
        QuantizedResult::Color(raster) => write_rgba_png(path, raster),
    }
}

fn encode_png(
    path: &Path,
    width: usize,
    height: usize,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    data: &[u8],
) -> Result<(), OutputError> {
    let encode_error = |source| OutputError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut writer = encoder.write_header().map_err(encode_error)?;
    writer.write_image_data(data).map_err(encode_error)?;
    writer.finish().map_err(encode_error)?;
    Ok(())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(values: &[u8], width: usize, bits: u8) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = values.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in values.chunks(width) {
        let mut byte = 0u8;
        for (i, &value) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (value & mask) << shift;
            if i % pixels_per_byte == pixels_per_byte - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
        if row.len() % pixels_per_byte != 0 {
            packed.push(byte);
        }
    }
    packed
}
