use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{SwatchfitError, SwatchfitResult};
use crate::generator::orchestrator::MockupGenerator;

/// One `(fabric_ref, garment_type)` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockupRequest {
    /// Fabric reference, e.g. `FAB-101`.
    pub fabric_ref: String,
    /// Free-form garment type, e.g. `men polo`.
    pub garment_type: String,
}

impl MockupRequest {
    /// Build a request.
    pub fn new(fabric_ref: impl Into<String>, garment_type: impl Into<String>) -> Self {
        Self {
            fabric_ref: fabric_ref.into(),
            garment_type: garment_type.into(),
        }
    }
}

/// Outcome of one batch request.
#[derive(Debug)]
pub struct BatchEntry {
    /// The request as submitted.
    pub request: MockupRequest,
    /// Same contract as [`MockupGenerator::generate_mockups`].
    pub result: SwatchfitResult<Vec<PathBuf>>,
}

/// Read a JSON array of [`MockupRequest`]s.
pub fn read_requests(path: &Path) -> SwatchfitResult<Vec<MockupRequest>> {
    let f = File::open(path).map_err(|e| SwatchfitError::io(path, e))?;
    serde_json::from_reader(BufReader::new(f)).map_err(|e| {
        SwatchfitError::validation(format!("parse batch requests '{}': {e}", path.display()))
    })
}

impl MockupGenerator {
    /// Run independent requests in parallel. Entries come back in input order.
    ///
    /// Requests that share an output name race on the final rename; the last writer wins and no
    /// reader sees a partial file.
    pub fn generate_batch(&self, requests: &[MockupRequest]) -> Vec<BatchEntry> {
        requests
            .par_iter()
            .map(|req| BatchEntry {
                request: req.clone(),
                result: self.generate_mockups(&req.fabric_ref, &req.garment_type),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generator/batch.rs"]
mod tests;
