use super::*;

#[test]
fn premultiply_roundtrip_for_opaque_and_clear() {
    assert_eq!(premultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(premultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply(premultiply([200, 100, 0, 255])), [200, 100, 0, 255]);
}

#[test]
fn over_identities() {
    let dst = [12, 34, 56, 255];
    assert_eq!(over(dst, [255, 0, 0, 0]), dst);
    assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn over_half_alpha_on_white() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 127);
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
}

#[test]
fn over_on_transparent_keeps_source() {
    let out = over([0, 0, 0, 0], [200, 100, 50, 128]);
    assert_eq!(out[3], 128);
    assert!((i16::from(out[0]) - 200).abs() <= 1);
    assert!((i16::from(out[1]) - 100).abs() <= 1);
    assert!((i16::from(out[2]) - 50).abs() <= 1);
}

#[test]
fn over_in_place_requires_equal_sizes() {
    let mut dst = RgbaImage::new(2, 2);
    let src = RgbaImage::new(3, 2);
    assert!(over_in_place(&mut dst, &src).is_err());

    let src = RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));
    over_in_place(&mut dst, &src).unwrap();
    assert!(dst.pixels().all(|p| p.0 == [9, 9, 9, 255]));
}
