use crate::foundation::error::{SwatchfitError, SwatchfitResult};

/// Side of a garment a template pair renders.
///
/// Ordering is the output order: front, back, then an unnamed single view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum View {
    /// Front (also spelled `face` in template names).
    Front,
    /// Back.
    Back,
    /// Garment with one template and no view suffix.
    Single,
}

impl View {
    /// Tag used in output filenames.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Single => "single",
        }
    }

    /// Parse a view suffix as it appears in template file stems.
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "front" | "face" => Some(Self::Front),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Axis-aligned pixel rectangle, `x`/`y` inclusive origin, `width`/`height` non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether `(x, y)` falls inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Canonical template lookup key for a garment type.
///
/// Lowercased; runs of whitespace, `_` and `-` collapse into a single `_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GarmentKey(String);

impl GarmentKey {
    /// Normalize a free-form garment type (`"Men  Polo"` becomes `men_polo`).
    pub fn new(garment_type: &str) -> SwatchfitResult<Self> {
        let words = key_words(garment_type);
        if words.is_empty() {
            return Err(SwatchfitError::validation(
                "garment type must contain at least one word",
            ));
        }
        Ok(Self(words.join("_")))
    }

    /// Lookup candidates from most to least specific: the full key, then trailing word runs.
    ///
    /// `ladies_zip_hoodie` yields `ladies_zip_hoodie`, `zip_hoodie`, `hoodie`.
    pub fn candidates(&self) -> Vec<String> {
        let words: Vec<&str> = self.0.split('_').collect();
        (0..words.len()).map(|i| words[i..].join("_")).collect()
    }
}

impl std::fmt::Display for GarmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a file stem or garment name the same way [`GarmentKey`] does.
pub(crate) fn normalize_stem(s: &str) -> String {
    key_words(s).join("_")
}

fn key_words(s: &str) -> Vec<String> {
    s.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Filename slug for a garment type: `"Men Polo"` and `men_polo` both become `men-polo`.
pub fn garment_slug(garment_type: &str) -> String {
    let mut out = String::with_capacity(garment_type.len());
    for word in garment_type.split(|c: char| c.is_whitespace() || c == '_') {
        let cleaned: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if cleaned.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(&cleaned);
    }
    out
}

/// Validate a fabric reference for use as a file stem.
///
/// References are used verbatim in both lookup and output names, so they must not escape the
/// configured directories.
pub fn validate_fabric_ref(fabric_ref: &str) -> SwatchfitResult<&str> {
    let r = fabric_ref.trim();
    if r.is_empty() {
        return Err(SwatchfitError::validation("fabric reference must be non-empty"));
    }
    if r.contains('/') || r.contains('\\') {
        return Err(SwatchfitError::validation(
            "fabric reference must not contain path separators",
        ));
    }
    if r == "." || r.contains("..") {
        return Err(SwatchfitError::validation(
            "fabric reference must not contain '..'",
        ));
    }
    Ok(r)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
