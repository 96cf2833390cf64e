//! Directory and compositing configuration.
//!
//! Values are layered, highest precedence last:
//! 1. Defaults (`swatches/`, `templates/`, `masks/`, `mockups/` relative to the working directory)
//! 2. A JSON config file ([`MockupConfig::from_path`])
//! 3. `SWATCHFIT_*` environment variables ([`MockupConfig::apply_env_overrides`])
//! 4. Explicit CLI flags (applied by the binary)

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::composite::mask::DEFAULT_THRESHOLD;
use crate::foundation::error::{SwatchfitError, SwatchfitResult};

/// Environment variable overriding [`MockupConfig::swatch_dir`].
pub const ENV_SWATCH_DIR: &str = "SWATCHFIT_SWATCH_DIR";
/// Environment variable overriding [`MockupConfig::template_dir`].
pub const ENV_TEMPLATE_DIR: &str = "SWATCHFIT_TEMPLATE_DIR";
/// Environment variable overriding [`MockupConfig::mask_dir`].
pub const ENV_MASK_DIR: &str = "SWATCHFIT_MASK_DIR";
/// Environment variable overriding [`MockupConfig::output_dir`].
pub const ENV_OUTPUT_DIR: &str = "SWATCHFIT_OUTPUT_DIR";
/// Environment variable overriding [`MockupConfig::threshold`].
pub const ENV_THRESHOLD: &str = "SWATCHFIT_THRESHOLD";

/// What the composited swatch is layered over before it is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Write the swatch overlay alone; alpha comes straight from the mask.
    #[default]
    None,
    /// Flatten the overlay onto the silhouette template.
    Silhouette,
}

/// Resolved configuration for a [`crate::MockupGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockupConfig {
    /// One image per fabric reference.
    pub swatch_dir: PathBuf,
    /// Silhouette templates named by garment key and view.
    pub template_dir: PathBuf,
    /// Luminance masks named `{template_stem}_mask`.
    pub mask_dir: PathBuf,
    /// Where composited mockups are written.
    pub output_dir: PathBuf,
    /// Mask luminance must exceed this to count as inside the silhouette.
    pub threshold: u8,
    /// Layering mode for written images.
    pub background: Background,
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            swatch_dir: PathBuf::from("swatches"),
            template_dir: PathBuf::from("templates"),
            mask_dir: PathBuf::from("masks"),
            output_dir: PathBuf::from("mockups"),
            threshold: DEFAULT_THRESHOLD,
            background: Background::None,
        }
    }
}

impl MockupConfig {
    /// Config rooted at `root` with the default subdirectory names.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let d = Self::default();
        Self {
            swatch_dir: root.join(d.swatch_dir),
            template_dir: root.join(d.template_dir),
            mask_dir: root.join(d.mask_dir),
            output_dir: root.join(d.output_dir),
            ..d
        }
    }

    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> SwatchfitResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SwatchfitError::config(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SwatchfitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SwatchfitError::config(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply `SWATCHFIT_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> SwatchfitResult<()> {
        self.apply_overrides(|k| std::env::var(k).ok())
    }

    /// Apply overrides from an arbitrary lookup; used by [`Self::apply_env_overrides`].
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SwatchfitResult<()> {
        let dirs = [
            (ENV_SWATCH_DIR, &mut self.swatch_dir),
            (ENV_TEMPLATE_DIR, &mut self.template_dir),
            (ENV_MASK_DIR, &mut self.mask_dir),
            (ENV_OUTPUT_DIR, &mut self.output_dir),
        ];
        for (key, slot) in dirs {
            if let Some(v) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = PathBuf::from(v);
            }
        }

        if let Some(v) = lookup(ENV_THRESHOLD) {
            self.threshold = v.trim().parse().map_err(|e| {
                SwatchfitError::config(format!("{ENV_THRESHOLD}='{v}' is not a u8: {e}"))
            })?;
        }
        Ok(())
    }

    /// Reject configs that cannot possibly resolve anything.
    pub fn validate(&self) -> SwatchfitResult<()> {
        let dirs = [
            ("swatch_dir", &self.swatch_dir),
            ("template_dir", &self.template_dir),
            ("mask_dir", &self.mask_dir),
            ("output_dir", &self.output_dir),
        ];
        for (name, dir) in dirs {
            if dir.as_os_str().is_empty() {
                return Err(SwatchfitError::config(format!("{name} must be non-empty")));
            }
        }
        if self.threshold == u8::MAX {
            return Err(SwatchfitError::config(
                "threshold 255 leaves no luminance above it; every mask would be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
