//! Composition of field matching, address resolution and image classification.

use std::collections::HashSet;
use std::time::Instant;

use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, info};

use crate::classify::{ImageClassifier, ImageDiagnostic};
use crate::error::{ExtractionError, ImageError, Result};
use crate::models::{
    ExtractionResult, ImageCandidate, ImageOutputMode, ImageSlots, ImageSource, NidexConfig,
    OutputConfig,
};
use crate::rules::{AddressResolver, ExtractedText, FieldExtractor, FieldMatcher};

/// Runs the full extraction for one document.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone)]
pub struct ExtractionOrchestrator {
    matcher: FieldMatcher,
    resolver: AddressResolver,
    classifier: ImageClassifier,
    output: OutputConfig,
}

impl ExtractionOrchestrator {
    /// Create an orchestrator with default configuration.
    pub fn new() -> Self {
        Self::from_config(&NidexConfig::default())
    }

    /// Create an orchestrator from configuration.
    pub fn from_config(config: &NidexConfig) -> Self {
        Self {
            matcher: FieldMatcher::new(),
            resolver: AddressResolver::new(),
            classifier: ImageClassifier::with_config(config.classifier.clone()),
            output: config.output.clone(),
        }
    }

    /// Set the image output mode.
    pub fn with_image_mode(mut self, mode: ImageOutputMode) -> Self {
        self.output.image_mode = mode;
        self
    }

    /// Set the URL prefix used in URL mode.
    pub fn with_image_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.output.image_base_url = base_url.into();
        self
    }

    pub fn image_mode(&self) -> ImageOutputMode {
        self.output.image_mode
    }

    /// Extract a result from document text and image candidates.
    ///
    /// Fails only for a malformed candidate list (duplicate identifiers).
    /// Missing fields and unusable images are represented in the result.
    pub fn extract(&self, text: &str, images: &[ImageCandidate]) -> Result<ExtractionResult> {
        let start = Instant::now();
        check_unique_ids(images)?;

        let text = ExtractedText::new(text);
        debug!(
            "Extracting from {} chars ({} lines), {} image candidates",
            text.text().len(),
            text.lines().len(),
            images.len()
        );

        let person = self.matcher.extract(&text);
        let permanent_address = self.resolver.extract(&text);
        let full_address = permanent_address.composite();

        let classification = self.classifier.classify(images);
        let mut diagnostics = classification.diagnostics;

        let portrait = classification
            .portrait
            .and_then(|c| self.render(c, &mut diagnostics));
        let signature = classification
            .signature
            .and_then(|c| self.render(c, &mut diagnostics));

        let images = match self.output.image_mode {
            ImageOutputMode::Url => ImageSlots::Url {
                face_image_url: portrait,
                signature_image_url: signature,
            },
            ImageOutputMode::Inline => ImageSlots::Inline {
                face_image: portrait,
                signature_image: signature,
            },
        };

        info!(
            "Extracted {} identity fields, address '{}', {} image diagnostics in {:?}",
            person.matched_count(),
            full_address,
            diagnostics.len(),
            start.elapsed()
        );

        Ok(ExtractionResult {
            person,
            permanent_address,
            full_address,
            images,
            portrait_id: classification.portrait.map(|c| c.id.clone()),
            signature_id: classification.signature.map(|c| c.id.clone()),
            diagnostics,
        })
    }

    /// Render a classified candidate in the configured representation.
    fn render(&self, candidate: &ImageCandidate, diagnostics: &mut Vec<ImageDiagnostic>) -> Option<String> {
        match (self.output.image_mode, &candidate.source) {
            (ImageOutputMode::Url, ImageSource::Reference(reference)) => Some(reference.clone()),
            (ImageOutputMode::Url, ImageSource::Bytes(_)) => Some(format!(
                "{}/{}",
                self.output.image_base_url.trim_end_matches('/'),
                candidate.id
            )),
            (ImageOutputMode::Inline, ImageSource::Bytes(data)) => {
                Some(general_purpose::STANDARD.encode(data))
            }
            (ImageOutputMode::Inline, ImageSource::Reference(_)) => {
                diagnostics.push(ImageDiagnostic {
                    candidate_id: candidate.id.clone(),
                    error: ImageError::NoInlineData(candidate.id.clone()),
                });
                None
            }
        }
    }
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique_ids(images: &[ImageCandidate]) -> std::result::Result<(), ExtractionError> {
    let mut seen = HashSet::with_capacity(images.len());
    for image in images {
        if !seen.insert(image.id.as_str()) {
            return Err(ExtractionError::DuplicateCandidate(image.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NidexError;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "\
National ID 1234567890
Name(English) Md. Rahim Uddin
Permanent Address Division
Dhaka
District Gazipur
Postal Code 1751
";

    fn reference(id: &str, width: u32, height: u32) -> ImageCandidate {
        ImageCandidate::from_reference(id, format!("https://cdn.example/{id}"), width, height)
    }

    #[test]
    fn test_extract_url_mode() {
        let orchestrator = ExtractionOrchestrator::new().with_image_base_url("https://files.example/image/");
        let images = vec![
            ImageCandidate::from_bytes("doc_page1_img1.png", vec![1, 2, 3]).with_dimensions(300, 300),
            reference("sig.png", 600, 150),
        ];

        let result = orchestrator.extract(TEXT, &images).unwrap();

        assert_eq!(result.person.national_id.as_deref(), Some("1234567890"));
        assert_eq!(result.permanent_address.division.as_deref(), Some("Dhaka"));
        assert_eq!(result.full_address, "Dhaka, Gazipur, 1751");
        assert_eq!(
            result.images,
            ImageSlots::Url {
                face_image_url: Some("https://files.example/image/doc_page1_img1.png".to_string()),
                signature_image_url: Some("https://cdn.example/sig.png".to_string()),
            }
        );
        assert_eq!(result.portrait_id.as_deref(), Some("doc_page1_img1.png"));
    }

    #[test]
    fn test_extract_inline_mode() {
        let orchestrator = ExtractionOrchestrator::new().with_image_mode(ImageOutputMode::Inline);
        let images = vec![
            ImageCandidate::from_bytes("face", b"face".to_vec()).with_dimensions(300, 300),
            reference("sig", 600, 150),
        ];

        let result = orchestrator.extract(TEXT, &images).unwrap();

        assert_eq!(result.images.portrait(), Some("ZmFjZQ=="));
        assert_eq!(result.images.signature(), None);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].error, ImageError::NoInlineData("sig".to_string()));
    }

    #[test]
    fn test_json_shape() {
        let result = ExtractionOrchestrator::new().extract("", &[]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 15 + 1 + 1 + 2);
        assert!(object["National_ID"].is_null());
        assert_eq!(object["full_address"], "");
        assert_eq!(object["Permanent_Address"].as_object().unwrap().len(), 9);
        assert!(object.contains_key("face_image_url"));
        assert!(object.contains_key("signature_image_url"));
        assert!(!object.contains_key("face_image"));
    }

    #[test]
    fn test_json_key_order() {
        let result = ExtractionOrchestrator::new().extract("", &[]).unwrap();
        let json = result.to_json(false).unwrap();

        let national_id = json.find("\"National_ID\"").unwrap();
        let education = json.find("\"Education\"").unwrap();
        let address = json.find("\"Permanent_Address\"").unwrap();
        let full = json.find("\"full_address\"").unwrap();
        let face = json.find("\"face_image_url\"").unwrap();

        assert!(national_id < education && education < address && address < full && full < face);
    }

    #[test]
    fn test_inline_json_keys() {
        let result = ExtractionOrchestrator::new()
            .with_image_mode(ImageOutputMode::Inline)
            .extract("", &[])
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["face_image"].is_null());
        assert!(json["signature_image"].is_null());
        assert!(json.get("face_image_url").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let images = vec![reference("a", 300, 300), reference("a", 600, 150)];
        let err = ExtractionOrchestrator::new().extract(TEXT, &images).unwrap_err();

        assert!(matches!(
            err,
            NidexError::Extraction(ExtractionError::DuplicateCandidate(ref id)) if id == "a"
        ));
    }

    #[test]
    fn test_idempotent_output() {
        let orchestrator = ExtractionOrchestrator::new();
        let images = vec![reference("face", 300, 300), reference("logo", 40, 40)];

        let first = orchestrator.extract(TEXT, &images).unwrap().to_json(false).unwrap();
        let second = orchestrator.extract(TEXT, &images).unwrap().to_json(false).unwrap();

        assert_eq!(first, second);
    }
}
