//! Swatchfit renders garment mockups from fabric swatches.
//!
//! A request names a fabric reference and a garment type. The swatch image and every
//! template/mask pair for the garment (front, back, or a single view) are resolved from disk, the
//! swatch is stretched into each mask's silhouette with the mask luminance as alpha, and one PNG
//! per view is written under a deterministic name.
//!
//! - Configure directories with [`MockupConfig`]
//! - Build a [`MockupGenerator`]
//! - Call [`MockupGenerator::generate_mockups`] (or [`MockupGenerator::generate_batch`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Swatch/template resolution and image loading.
pub mod assets;
/// Mask compositing.
pub mod composite;
/// Layered configuration.
pub mod config;
/// Request orchestration.
pub mod generator;
/// Mockup persistence.
pub mod output;

pub use crate::assets::resolve::{
    IMAGE_EXTENSIONS, SwatchAsset, TemplatePair, resolve_swatch, resolve_templates,
};
pub use crate::composite::mask::{CompositeOpts, DEFAULT_THRESHOLD, composite};
pub use crate::config::{Background, MockupConfig};
pub use crate::foundation::core::{GarmentKey, PixelRect, View, garment_slug};
pub use crate::foundation::error::{AssetKind, SwatchfitError, SwatchfitResult};
pub use crate::generator::batch::{BatchEntry, MockupRequest, read_requests};
pub use crate::generator::orchestrator::{
    GenerationReport, MockupGenerator, MockupPlan, ViewOutcome,
};
pub use crate::output::store::{DirStore, InMemoryStore, MockupName, MockupStore};
