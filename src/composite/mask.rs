use std::path::Path;

use image::{GrayImage, Rgba, RgbaImage, imageops::FilterType};

use crate::assets::decode;
use crate::composite::blend;
use crate::config::Background;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{SwatchfitError, SwatchfitResult};

/// Mask luminance strictly above this (about 78% of full scale) is inside the silhouette.
pub const DEFAULT_THRESHOLD: u8 = 200;

/// Options for [`composite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeOpts {
    /// Placement threshold applied to mask luminance.
    pub threshold: u8,
    /// Layering of the result.
    pub background: Background,
}

impl Default for CompositeOpts {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            background: Background::None,
        }
    }
}

/// Tight bounding box of all mask pixels with luminance `> threshold`.
///
/// Returns `None` when no pixel passes.
pub fn placement_bounds(mask: &GrayImage, threshold: u8) -> Option<PixelRect> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for (x, y, px) in mask.enumerate_pixels() {
        if px.0[0] <= threshold {
            continue;
        }
        any = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    any.then(|| PixelRect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Resample `swatch` to exactly `width x height` (stretch, never tile).
pub fn stretch_fit(swatch: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if swatch.dimensions() == (width, height) {
        return swatch.clone();
    }
    image::imageops::resize(swatch, width, height, FilterType::Lanczos3)
}

/// Stretch `swatch` into the mask's placement box and take alpha from the raw mask luminance.
///
/// The canvas matches the mask size. Pixels outside the box keep black color; their alpha is
/// still the mask luminance, which keeps soft edges and shading that fall below the threshold.
/// Returns `None` for an empty mask.
pub fn apply_mask(swatch: &RgbaImage, mask: &GrayImage, threshold: u8) -> Option<RgbaImage> {
    let rect = placement_bounds(mask, threshold)?;
    let fitted = stretch_fit(swatch, rect.width, rect.height);

    let (w, h) = mask.dimensions();
    Some(RgbaImage::from_fn(w, h, |x, y| {
        let alpha = mask.get_pixel(x, y).0[0];
        if rect.contains(x, y) {
            let [r, g, b, _] = fitted.get_pixel(x - rect.x, y - rect.y).0;
            Rgba([r, g, b, alpha])
        } else {
            Rgba([0, 0, 0, alpha])
        }
    }))
}

/// Composite one swatch into one template/mask pair.
///
/// Every failure here is scoped to this pair: missing or corrupt files, an empty mask, or a
/// template whose size differs from its mask.
pub fn composite(
    swatch_path: &Path,
    template_path: &Path,
    mask_path: &Path,
    opts: CompositeOpts,
) -> SwatchfitResult<RgbaImage> {
    let mask = decode::load_luma(mask_path)?;

    let template = match opts.background {
        Background::None => None,
        Background::Silhouette => Some(decode::load_rgba(template_path)?),
    };
    let template_dims = match &template {
        Some(t) => t.dimensions(),
        None => decode::probe_dimensions(template_path)?,
    };
    if template_dims != mask.dimensions() {
        return Err(SwatchfitError::DimensionMismatch {
            template: template_dims,
            mask: mask.dimensions(),
        });
    }

    let swatch = decode::load_rgba(swatch_path)?;
    let overlay =
        apply_mask(&swatch, &mask, opts.threshold).ok_or_else(|| SwatchfitError::EmptyMask {
            path: mask_path.to_path_buf(),
            threshold: opts.threshold,
        })?;

    match template {
        None => Ok(overlay),
        Some(mut base) => {
            blend::over_in_place(&mut base, &overlay)?;
            Ok(base)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/mask.rs"]
mod tests;
