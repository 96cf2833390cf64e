use std::path::PathBuf;

use crate::assets::resolve::{self, SwatchAsset, TemplatePair};
use crate::composite::mask::{self, CompositeOpts};
use crate::config::MockupConfig;
use crate::foundation::core::{View, garment_slug, validate_fabric_ref};
use crate::foundation::error::{SwatchfitError, SwatchfitResult};
use crate::output::store::{DirStore, MockupName, MockupStore};

/// Everything resolved for one `(fabric_ref, garment_type)` request, before any pixels move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockupPlan {
    /// Garment type as supplied by the caller.
    pub garment_type: String,
    /// Slug used in output names.
    pub garment_slug: String,
    /// Resolved swatch.
    pub swatch: SwatchAsset,
    /// Template/mask pairs in output order.
    pub pairs: Vec<TemplatePair>,
}

impl MockupPlan {
    /// Output identity for `view`.
    pub fn name_for(&self, view: View) -> MockupName {
        MockupName {
            fabric_ref: self.swatch.fabric_ref.clone(),
            garment_slug: self.garment_slug.clone(),
            view,
        }
    }
}

/// Result of rendering one view.
#[derive(Debug)]
pub struct ViewOutcome {
    /// View that was attempted.
    pub view: View,
    /// Template the view was rendered from.
    pub template: PathBuf,
    /// Written path, or why the view was skipped.
    pub outcome: SwatchfitResult<PathBuf>,
}

/// Per-view results for one rendered plan, in plan order.
#[derive(Debug)]
pub struct GenerationReport {
    /// One entry per planned view.
    pub views: Vec<ViewOutcome>,
}

impl GenerationReport {
    /// Paths of successfully written views, in plan order.
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.views
            .iter()
            .filter_map(|v| v.outcome.as_ref().ok().cloned())
            .collect()
    }

    /// Views that were skipped, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (View, &SwatchfitError)> {
        self.views
            .iter()
            .filter_map(|v| v.outcome.as_ref().err().map(|e| (v.view, e)))
    }

    /// Some but not all views were written.
    pub fn is_partial(&self) -> bool {
        let ok = self.views.iter().filter(|v| v.outcome.is_ok()).count();
        ok > 0 && ok < self.views.len()
    }
}

/// Resolves assets, composites each view and persists the results.
///
/// Holds only configuration and a store, so one generator can serve concurrent requests.
pub struct MockupGenerator {
    config: MockupConfig,
    store: Box<dyn MockupStore>,
}

impl std::fmt::Debug for MockupGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockupGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MockupGenerator {
    /// Generator writing PNG files into `config.output_dir`.
    pub fn new(config: MockupConfig) -> SwatchfitResult<Self> {
        let store = DirStore::new(config.output_dir.clone());
        Self::with_store(config, Box::new(store))
    }

    /// Generator writing through a custom store.
    pub fn with_store(
        config: MockupConfig,
        store: Box<dyn MockupStore>,
    ) -> SwatchfitResult<Self> {
        config.validate()?;
        Ok(Self { config, store })
    }

    /// Active configuration.
    pub fn config(&self) -> &MockupConfig {
        &self.config
    }

    fn composite_opts(&self) -> CompositeOpts {
        CompositeOpts {
            threshold: self.config.threshold,
            background: self.config.background,
        }
    }

    /// Resolve the swatch and template pairs for a request without rendering anything.
    pub fn plan(&self, fabric_ref: &str, garment_type: &str) -> SwatchfitResult<MockupPlan> {
        let fabric_ref = validate_fabric_ref(fabric_ref)?;
        let slug = garment_slug(garment_type);
        if slug.is_empty() {
            return Err(SwatchfitError::validation(format!(
                "garment type '{garment_type}' has no usable characters for a file name"
            )));
        }

        let swatch = resolve::resolve_swatch(fabric_ref, &self.config.swatch_dir)?;
        let pairs = resolve::resolve_templates(
            garment_type,
            &self.config.template_dir,
            &self.config.mask_dir,
        )?;

        Ok(MockupPlan {
            garment_type: garment_type.to_string(),
            garment_slug: slug,
            swatch,
            pairs,
        })
    }

    /// Composite and persist every view in `plan`.
    ///
    /// Per-view failures (see [`SwatchfitError::is_per_view`]) are logged and recorded in the
    /// report while the remaining views proceed. A store that cannot be prepared, or that fails in
    /// a way not tied to one view, aborts the request with that error.
    #[tracing::instrument(
        skip_all,
        fields(fabric_ref = %plan.swatch.fabric_ref, garment = %plan.garment_slug)
    )]
    pub fn render_plan(&self, plan: &MockupPlan) -> SwatchfitResult<GenerationReport> {
        self.store.prepare()?;

        let opts = self.composite_opts();
        let mut views = Vec::with_capacity(plan.pairs.len());
        for pair in &plan.pairs {
            let outcome = match self.render_view(plan, pair, opts) {
                Ok(path) => {
                    tracing::info!(view = %pair.view, path = %path.display(), "wrote mockup");
                    Ok(path)
                }
                Err(e) if e.is_per_view() => {
                    tracing::warn!(view = %pair.view, error = %e, "skipping view");
                    Err(e)
                }
                Err(e) => {
                    tracing::error!(
                        view = %pair.view,
                        error = %e,
                        "store failed; aborting request"
                    );
                    return Err(e);
                }
            };
            views.push(ViewOutcome {
                view: pair.view,
                template: pair.template.clone(),
                outcome,
            });
        }

        Ok(GenerationReport { views })
    }

    fn render_view(
        &self,
        plan: &MockupPlan,
        pair: &TemplatePair,
        opts: CompositeOpts,
    ) -> SwatchfitResult<PathBuf> {
        let img = mask::composite(&plan.swatch.path, &pair.template, &pair.mask, opts)?;
        self.store.persist(&plan.name_for(pair.view), &img)
    }

    /// Generate every available view for a fabric and garment type.
    ///
    /// Returns written paths in view order (front, back, single). An empty list means nothing was
    /// produced: the swatch or templates were not found, or every view failed. A list shorter than
    /// the number of views is a partial failure. Errors come only from the output store: it could
    /// not be prepared, or it failed for a reason not scoped to one view.
    #[tracing::instrument(skip(self))]
    pub fn generate_mockups(
        &self,
        fabric_ref: &str,
        garment_type: &str,
    ) -> SwatchfitResult<Vec<PathBuf>> {
        let plan = match self.plan(fabric_ref, garment_type) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!(error = %e, "no mockups generated");
                return Ok(Vec::new());
            }
        };

        let report = self.render_plan(&plan)?;
        let paths = report.written_paths();
        if paths.is_empty() {
            tracing::warn!(views = plan.pairs.len(), "every view failed");
        } else if report.is_partial() {
            tracing::warn!(
                written = paths.len(),
                views = plan.pairs.len(),
                "partial mockup generation"
            );
        }
        Ok(paths)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/orchestrator.rs"]
mod tests;
