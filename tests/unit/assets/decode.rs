use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_rgba_keeps_straight_alpha() {
    let src = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let bytes = png_bytes(image::DynamicImage::ImageRgba8(src));

    let img = decode_rgba(&bytes, Path::new("mem.png")).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn decode_luma_ignores_alpha() {
    let src = image::RgbaImage::from_raw(2, 1, vec![255, 255, 255, 0, 0, 0, 0, 255]).unwrap();
    let bytes = png_bytes(image::DynamicImage::ImageRgba8(src));

    let luma = decode_luma(&bytes, Path::new("mem.png")).unwrap();
    assert_eq!(luma.get_pixel(0, 0).0, [255]);
    assert_eq!(luma.get_pixel(1, 0).0, [0]);
}

#[test]
fn decode_garbage_is_decode_error() {
    let err = decode_rgba(b"not an image", Path::new("bad.png")).unwrap_err();
    assert!(matches!(err, SwatchfitError::Decode { .. }));
    assert!(err.to_string().contains("bad.png"));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_rgba(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, SwatchfitError::Io { .. }));
    let err = probe_dimensions(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, SwatchfitError::Io { .. }));
}

#[test]
fn probe_dimensions_ignores_extension_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shirt.PNG");
    image::GrayImage::new(7, 3)
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    assert_eq!(probe_dimensions(&path).unwrap(), (7, 3));
    assert_eq!(load_luma(&path).unwrap().dimensions(), (7, 3));
}

#[test]
fn decode_luma_uses_601_weights_for_color() {
    // Rec.709 weights would give 182 for pure green.
    let src = image::RgbImage::from_raw(3, 1, vec![0, 255, 0, 255, 0, 0, 200, 200, 200]).unwrap();
    let bytes = png_bytes(image::DynamicImage::ImageRgb8(src));

    let luma = decode_luma(&bytes, Path::new("mem.png")).unwrap();
    assert_eq!(luma.get_pixel(0, 0).0, [150]);
    assert_eq!(luma.get_pixel(1, 0).0, [76]);
    assert_eq!(luma.get_pixel(2, 0).0, [200]);
}

#[test]
fn decode_luma_passes_gray_through() {
    let src = image::GrayImage::from_raw(3, 1, vec![0, 201, 255]).unwrap();
    let bytes = png_bytes(image::DynamicImage::ImageLuma8(src.clone()));
    assert_eq!(decode_luma(&bytes, Path::new("mask.png")).unwrap(), src);
}
