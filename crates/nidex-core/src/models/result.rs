//! The response record returned for one document.

use serde::Serialize;

use super::address::AddressRecord;
use super::person::PersonRecord;
use crate::classify::ImageDiagnostic;

/// Rendered portrait/signature slots.
///
/// The variant is fixed by [`ImageOutputMode`](super::config::ImageOutputMode),
/// so one deployment always emits the same pair of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImageSlots {
    Url {
        face_image_url: Option<String>,
        signature_image_url: Option<String>,
    },
    Inline {
        face_image: Option<String>,
        signature_image: Option<String>,
    },
}

impl ImageSlots {
    pub fn portrait(&self) -> Option<&str> {
        match self {
            ImageSlots::Url { face_image_url, .. } => face_image_url.as_deref(),
            ImageSlots::Inline { face_image, .. } => face_image.as_deref(),
        }
    }

    pub fn signature(&self) -> Option<&str> {
        match self {
            ImageSlots::Url { signature_image_url, .. } => signature_image_url.as_deref(),
            ImageSlots::Inline { signature_image, .. } => signature_image.as_deref(),
        }
    }
}

/// Full extraction result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Identity fields, flattened into the top-level object.
    #[serde(flatten)]
    pub person: PersonRecord,

    /// Nested permanent address.
    #[serde(rename = "Permanent_Address")]
    pub permanent_address: AddressRecord,

    /// Composite of the permanent address components.
    pub full_address: String,

    /// Portrait and signature slots.
    #[serde(flatten)]
    pub images: ImageSlots,

    /// Identifiers of the candidates placed in the slots.
    #[serde(skip)]
    pub portrait_id: Option<String>,

    #[serde(skip)]
    pub signature_id: Option<String>,

    /// Per-candidate problems encountered while classifying or rendering.
    #[serde(skip)]
    pub diagnostics: Vec<ImageDiagnostic>,
}

impl ExtractionResult {
    /// Serialize to the response JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
