use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::foundation::core::{GarmentKey, View, normalize_stem, validate_fabric_ref};
use crate::foundation::error::{AssetKind, SwatchfitError, SwatchfitResult};

/// Image extensions in lookup priority order.
///
/// Each is probed as written, upper-cased, then lower-cased.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".png", ".jpeg", ".webp"];

const MASK_SUFFIX: &str = "_mask";

/// A fabric swatch resolved to a concrete file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwatchAsset {
    /// Fabric reference as looked up.
    pub fabric_ref: String,
    /// Resolved swatch image.
    pub path: PathBuf,
}

/// Silhouette template and its luminance mask for one view of a garment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplatePair {
    /// Normalized template key that matched (may be a suffix of the requested garment key).
    pub key: String,
    /// View the pair renders.
    pub view: View,
    /// Silhouette image.
    pub template: PathBuf,
    /// Mask image, same pixel dimensions as `template`.
    pub mask: PathBuf,
}

/// Every `{ext}` spelling tried for one stem, in probe order.
pub fn extension_variants() -> impl Iterator<Item = String> {
    IMAGE_EXTENSIONS
        .iter()
        .flat_map(|ext| [ext.to_string(), ext.to_uppercase(), ext.to_lowercase()])
}

/// Probe `{dir}/{stem}{ext}` over [`extension_variants`] and return the first existing file.
pub fn probe_image(dir: &Path, stem: &str) -> Option<PathBuf> {
    extension_variants()
        .map(|ext| dir.join(format!("{stem}{ext}")))
        .find(|p| p.is_file())
}

/// Resolve a fabric reference to its swatch file.
pub fn resolve_swatch(fabric_ref: &str, swatch_dir: &Path) -> SwatchfitResult<SwatchAsset> {
    let fabric_ref = validate_fabric_ref(fabric_ref)?;
    let path = probe_image(swatch_dir, fabric_ref).ok_or_else(|| SwatchfitError::AssetNotFound {
        kind: AssetKind::Swatch,
        name: fabric_ref.to_string(),
        dir: swatch_dir.to_path_buf(),
    })?;
    tracing::debug!(fabric_ref, path = %path.display(), "resolved swatch");
    Ok(SwatchAsset {
        fabric_ref: fabric_ref.to_string(),
        path,
    })
}

/// Resolve a garment type to its template/mask pairs, ordered front, back, single.
///
/// Template stems are matched after normalization (see [`GarmentKey`]) as `{key}_front`,
/// `{key}_face`, `{key}_back` or plain `{key}`. The mask for a template with stem `S` is the image
/// in `mask_dir` whose normalized stem is `S_mask`. When nothing matches the full key, trailing
/// word runs of it are tried, so `men polo` can fall back to `polo` templates.
pub fn resolve_templates(
    garment_type: &str,
    template_dir: &Path,
    mask_dir: &Path,
) -> SwatchfitResult<Vec<TemplatePair>> {
    let key = GarmentKey::new(garment_type)?;
    let templates = scan_images(template_dir)?;
    let masks = index_by_stem(scan_images(mask_dir)?);

    for candidate in key.candidates() {
        let pairs = pairs_for_key(&candidate, &templates, &masks);
        if !pairs.is_empty() {
            tracing::debug!(
                garment = %key,
                matched = %candidate,
                views = pairs.len(),
                "resolved templates"
            );
            return Ok(pairs);
        }
    }

    Err(SwatchfitError::AssetNotFound {
        kind: AssetKind::Template,
        name: garment_type.to_string(),
        dir: template_dir.to_path_buf(),
    })
}

#[derive(Clone, Debug)]
struct ImageEntry {
    path: PathBuf,
    /// File stem as on disk.
    raw_stem: String,
    /// Normalized stem.
    stem: String,
    /// Position of the extension in [`IMAGE_EXTENSIONS`].
    rank: usize,
}

impl ImageEntry {
    fn sort_key(&self) -> (usize, &Path) {
        (self.rank, self.path.as_path())
    }
}

fn scan_images(dir: &Path) -> SwatchfitResult<Vec<ImageEntry>> {
    let rd = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "asset directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(SwatchfitError::io(dir, e)),
    };

    let mut out = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(rank) = extension_rank(&path) else {
            continue;
        };
        let Some(raw_stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        out.push(ImageEntry {
            raw_stem: raw_stem.to_string(),
            stem: normalize_stem(raw_stem),
            rank,
            path,
        });
    }
    Ok(out)
}

fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .position(|candidate| candidate.trim_start_matches('.') == ext)
}

/// Best entry per normalized stem.
fn index_by_stem(entries: Vec<ImageEntry>) -> BTreeMap<String, ImageEntry> {
    let mut out = BTreeMap::<String, ImageEntry>::new();
    for e in entries {
        match out.get(&e.stem) {
            Some(existing) if existing.sort_key() <= e.sort_key() => {}
            _ => {
                out.insert(e.stem.clone(), e);
            }
        }
    }
    out
}

/// Split a normalized template stem into `(key, view)`.
fn split_view(stem: &str) -> (&str, View) {
    if let Some((base, suffix)) = stem.rsplit_once('_')
        && let Some(view) = View::from_suffix(suffix)
    {
        return (base, view);
    }
    (stem, View::Single)
}

fn pairs_for_key(
    key: &str,
    templates: &[ImageEntry],
    masks: &BTreeMap<String, ImageEntry>,
) -> Vec<TemplatePair> {
    let mut by_view = BTreeMap::<View, &ImageEntry>::new();
    for t in templates {
        if t.stem.ends_with(MASK_SUFFIX) {
            continue;
        }
        let (base, view) = split_view(&t.stem);
        if base != key {
            continue;
        }
        match by_view.get(&view) {
            Some(existing) if existing.sort_key() <= t.sort_key() => {}
            _ => {
                by_view.insert(view, t);
            }
        }
    }

    let mut out = Vec::with_capacity(by_view.len());
    for (view, t) in by_view {
        let mask_stem = normalize_stem(&format!("{}{MASK_SUFFIX}", t.raw_stem));
        let Some(mask) = masks.get(&mask_stem) else {
            tracing::warn!(
                template = %t.path.display(),
                expected = %mask_stem,
                "template has no mask; skipping view"
            );
            continue;
        };
        out.push(TemplatePair {
            key: key.to_string(),
            view,
            template: t.path.clone(),
            mask: mask.path.clone(),
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
