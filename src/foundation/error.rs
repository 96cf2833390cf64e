use std::path::PathBuf;

/// Convenience result alias used throughout the crate.
pub type SwatchfitResult<T> = Result<T, SwatchfitError>;

/// Kind of input asset that failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// Fabric swatch image.
    Swatch,
    /// Silhouette template paired with a mask.
    Template,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Swatch => f.write_str("swatch"),
            Self::Template => f.write_str("template"),
        }
    }
}

/// Error taxonomy for resolution, compositing and persistence.
#[derive(thiserror::Error, Debug)]
pub enum SwatchfitError {
    /// No swatch file or no template/mask pair matched the request.
    #[error("{kind} not found: '{name}' in '{}'", .dir.display())]
    AssetNotFound {
        /// What was being looked up.
        kind: AssetKind,
        /// Fabric reference or garment type as supplied.
        name: String,
        /// Directory that was probed.
        dir: PathBuf,
    },

    /// The mask has no pixel above the placement threshold.
    #[error("empty mask: no pixel above threshold {threshold} in '{}'", .path.display())]
    EmptyMask {
        /// Mask file.
        path: PathBuf,
        /// Threshold that was applied.
        threshold: u8,
    },

    /// Template and mask pixel dimensions differ.
    #[error(
        "dimension mismatch: template {}x{} vs mask {}x{}",
        .template.0, .template.1, .mask.0, .mask.1
    )]
    DimensionMismatch {
        /// Template `(width, height)`.
        template: (u32, u32),
        /// Mask `(width, height)`.
        mask: (u32, u32),
    },

    /// An image file exists but could not be decoded or encoded.
    #[error("image error for '{}': {source}", .path.display())]
    Decode {
        /// Offending file.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure.
    #[error("io error for '{}': {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid caller input (fabric reference, garment type, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    /// Anything else, with context attached via `anyhow`.
    Other(#[from] anyhow::Error),
}

impl SwatchfitError {
    /// Build a [`SwatchfitError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SwatchfitError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SwatchfitError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`SwatchfitError::Decode`] for `path`.
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Whether this failure only affects a single view and generation should continue.
    pub fn is_per_view(&self) -> bool {
        matches!(
            self,
            Self::EmptyMask { .. }
                | Self::DimensionMismatch { .. }
                | Self::Decode { .. }
                | Self::Io { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
