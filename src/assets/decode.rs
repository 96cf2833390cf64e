use std::path::Path;

use image::{DynamicImage, GrayImage, Luma, RgbaImage};

use crate::foundation::error::{SwatchfitError, SwatchfitResult};
use crate::foundation::math::luma601_u8;

/// Decode encoded image bytes into straight-alpha RGBA8.
///
/// The container format is sniffed from the bytes, so a `.JPG` holding PNG data still decodes.
pub fn decode_rgba(bytes: &[u8], origin: &Path) -> SwatchfitResult<RgbaImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| SwatchfitError::decode(origin, e))?;
    Ok(dyn_img.to_rgba8())
}

/// Decode encoded image bytes into an 8-bit luminance map, ignoring any alpha channel.
///
/// Color is reduced with ITU-R 601 weights (0.299, 0.587, 0.114). Gray input passes through
/// unchanged.
pub fn decode_luma(bytes: &[u8], origin: &Path) -> SwatchfitResult<GrayImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| SwatchfitError::decode(origin, e))?;
    if let DynamicImage::ImageLuma8(gray) = dyn_img {
        return Ok(gray);
    }
    let rgb = dyn_img.to_rgb8();
    Ok(GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma601_u8(r, g, b)])
    }))
}

/// Read and decode an RGBA image from disk.
pub fn load_rgba(path: &Path) -> SwatchfitResult<RgbaImage> {
    let bytes = read_bytes(path)?;
    decode_rgba(&bytes, path)
}

/// Read and decode a luminance map from disk.
pub fn load_luma(path: &Path) -> SwatchfitResult<GrayImage> {
    let bytes = read_bytes(path)?;
    decode_luma(&bytes, path)
}

/// Read only the header of an image file to get its `(width, height)`.
pub fn probe_dimensions(path: &Path) -> SwatchfitResult<(u32, u32)> {
    let reader = image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| SwatchfitError::io(path, e))?;
    reader
        .into_dimensions()
        .map_err(|e| SwatchfitError::decode(path, e))
}

fn read_bytes(path: &Path) -> SwatchfitResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| SwatchfitError::io(path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
