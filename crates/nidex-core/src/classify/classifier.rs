//! Ratio/height heuristics for portrait and signature images.

use tracing::{debug, trace, warn};

use super::{Classification, ImageDiagnostic, Slot};
use crate::models::{ClassifierConfig, Dimensions, ImageCandidate};

/// Assigns candidates to the portrait and signature slots.
#[derive(Debug, Clone, Default)]
pub struct ImageClassifier {
    config: ClassifierConfig,
}

impl ImageClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether the dimensions fall in the portrait band.
    pub fn is_portrait(&self, dims: Dimensions) -> bool {
        let Some(ratio) = dims.ratio() else {
            return false;
        };
        ratio > self.config.portrait_min_ratio
            && ratio < self.config.portrait_max_ratio
            && dims.height > self.config.portrait_min_height
    }

    /// Whether the dimensions fall in the signature band.
    pub fn is_signature(&self, dims: Dimensions) -> bool {
        let Some(ratio) = dims.ratio() else {
            return false;
        };
        ratio > self.config.signature_min_ratio
            && dims.height > self.config.signature_min_height
            && dims.height < self.config.signature_max_height
    }

    /// Slot these dimensions qualify for. Portrait is tested first.
    pub fn qualifies(&self, dims: Dimensions) -> Option<Slot> {
        if self.is_portrait(dims) {
            Some(Slot::Portrait)
        } else if self.is_signature(dims) {
            Some(Slot::Signature)
        } else {
            None
        }
    }

    /// Classify candidates given in document order.
    ///
    /// The first qualifying candidate fills each slot. Unmeasurable
    /// candidates are skipped with a diagnostic. If no candidate qualifies
    /// as a signature, the last measured candidate that is not the portrait
    /// takes the signature slot.
    pub fn classify<'a>(&self, candidates: &'a [ImageCandidate]) -> Classification<'a> {
        let mut result = Classification::default();

        for candidate in candidates {
            let dims = match candidate.measure() {
                Ok(dims) => dims,
                Err(error) => {
                    warn!("Skipping image {}: {}", candidate.id, error);
                    result.diagnostics.push(ImageDiagnostic {
                        candidate_id: candidate.id.clone(),
                        error,
                    });
                    continue;
                }
            };

            trace!(
                "Image {}: width={}, height={}, ratio={:.2}",
                candidate.id,
                dims.width,
                dims.height,
                dims.ratio().unwrap_or_default()
            );
            result.measured.push((candidate, dims));

            match self.qualifies(dims) {
                Some(Slot::Portrait) if result.portrait.is_none() => {
                    result.portrait = Some(candidate);
                }
                Some(Slot::Signature) if result.signature.is_none() => {
                    result.signature = Some(candidate);
                }
                _ => {}
            }
        }

        if result.signature.is_none() {
            let portrait_id = result.portrait.map(|p| p.id.as_str());
            let fallback = result
                .measured
                .iter()
                .rev()
                .map(|(candidate, _)| *candidate)
                .find(|candidate| Some(candidate.id.as_str()) != portrait_id);

            if let Some(candidate) = fallback {
                debug!("No signature matched, falling back to last image {}", candidate.id);
                result.signature = Some(candidate);
                result.signature_fallback = true;
            }
        }

        debug!(
            "Classified {} images ({} skipped): portrait={:?}, signature={:?}",
            candidates.len(),
            result.diagnostics.len(),
            result.portrait.map(|c| c.id.as_str()),
            result.signature.map(|c| c.id.as_str())
        );

        result
    }
}
