use image::RgbaImage;

use crate::foundation::error::{SwatchfitError, SwatchfitResult};
use crate::foundation::math::{div_alpha_u8, mul_div255_u8};

/// One RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Premultiply a straight-alpha pixel.
pub fn premultiply(px: Rgba8) -> Rgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255_u8(u16::from(px[0]), a),
        mul_div255_u8(u16::from(px[1]), a),
        mul_div255_u8(u16::from(px[2]), a),
        px[3],
    ]
}

/// Convert a premultiplied pixel back to straight alpha.
pub fn unpremultiply(px: Rgba8) -> Rgba8 {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        div_alpha_u8(px[0], a),
        div_alpha_u8(px[1], a),
        div_alpha_u8(px[2], a),
        a,
    ]
}

/// Source-over for premultiplied pixels.
pub fn over_premul(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over for straight-alpha pixels.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    unpremultiply(over_premul(premultiply(dst), premultiply(src)))
}

/// Layer `src` over `dst` in place. Both images are straight alpha and must match in size.
pub fn over_in_place(dst: &mut RgbaImage, src: &RgbaImage) -> SwatchfitResult<()> {
    if dst.dimensions() != src.dimensions() {
        return Err(SwatchfitError::DimensionMismatch {
            template: dst.dimensions(),
            mask: src.dimensions(),
        });
    }
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        d.0 = over(d.0, s.0);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
