//! Portrait and signature classification by image geometry.
//!
//! No visual model is involved: a portrait is a roughly square image of some
//! height, a signature is a wide and short one. Thresholds come from
//! [`ClassifierConfig`].

mod classifier;

pub use classifier::ImageClassifier;

use crate::error::ImageError;
use crate::models::{Dimensions, ImageCandidate};

/// Role an image can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Portrait,
    Signature,
}

/// A problem with one candidate. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDiagnostic {
    /// Identifier of the candidate.
    pub candidate_id: String,
    /// What went wrong.
    pub error: ImageError,
}

impl std::fmt::Display for ImageDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.candidate_id, self.error)
    }
}

/// Outcome of one classification pass.
#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
    /// Portrait slot.
    pub portrait: Option<&'a ImageCandidate>,
    /// Signature slot.
    pub signature: Option<&'a ImageCandidate>,
    /// Whether the signature came from the last-candidate fallback.
    pub signature_fallback: bool,
    /// Measured candidates in document order.
    pub measured: Vec<(&'a ImageCandidate, Dimensions)>,
    /// Candidates that were skipped.
    pub diagnostics: Vec<ImageDiagnostic>,
}

impl<'a> Classification<'a> {
    /// Candidate held by a slot.
    pub fn get(&self, slot: Slot) -> Option<&'a ImageCandidate> {
        match slot {
            Slot::Portrait => self.portrait,
            Slot::Signature => self.signature,
        }
    }
}
