//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::NidexError;

/// Portrait band lower ratio bound (exclusive).
pub const DEFAULT_PORTRAIT_MIN_RATIO: f64 = 0.7;
/// Portrait band upper ratio bound (exclusive).
pub const DEFAULT_PORTRAIT_MAX_RATIO: f64 = 1.4;
/// Portrait minimum height in pixels (exclusive).
pub const DEFAULT_PORTRAIT_MIN_HEIGHT: u32 = 100;
/// Signature minimum ratio (exclusive).
pub const DEFAULT_SIGNATURE_MIN_RATIO: f64 = 2.0;
/// Signature minimum height in pixels (exclusive).
pub const DEFAULT_SIGNATURE_MIN_HEIGHT: u32 = 30;
/// Signature maximum height in pixels (exclusive).
pub const DEFAULT_SIGNATURE_MAX_HEIGHT: u32 = 220;

/// Default prefix for image URLs in URL output mode.
pub const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:8000/image";

/// Main configuration for the nidex pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NidexConfig {
    /// Image classification thresholds.
    pub classifier: ClassifierConfig,

    /// Response rendering.
    pub output: OutputConfig,

    /// PDF decoding configuration.
    pub pdf: PdfConfig,
}

/// Ratio and height thresholds for portrait/signature classification.
///
/// All bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub portrait_min_ratio: f64,
    pub portrait_max_ratio: f64,
    pub portrait_min_height: u32,
    pub signature_min_ratio: f64,
    pub signature_min_height: u32,
    pub signature_max_height: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            portrait_min_ratio: DEFAULT_PORTRAIT_MIN_RATIO,
            portrait_max_ratio: DEFAULT_PORTRAIT_MAX_RATIO,
            portrait_min_height: DEFAULT_PORTRAIT_MIN_HEIGHT,
            signature_min_ratio: DEFAULT_SIGNATURE_MIN_RATIO,
            signature_min_height: DEFAULT_SIGNATURE_MIN_HEIGHT,
            signature_max_height: DEFAULT_SIGNATURE_MAX_HEIGHT,
        }
    }
}

/// How classified images appear in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOutputMode {
    /// `face_image_url` / `signature_image_url` holding URLs.
    #[default]
    Url,
    /// `face_image` / `signature_image` holding base64 payloads.
    Inline,
}

/// Response rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Image representation used for every response.
    pub image_mode: ImageOutputMode,

    /// Prefix for image URLs in URL mode.
    pub image_base_url: String,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_mode: ImageOutputMode::Url,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            pretty: false,
        }
    }
}

/// PDF decoding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages scanned for images (0 = unlimited).
    pub max_pages: usize,

    /// Collect embedded images as classification candidates.
    pub extract_images: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            extract_images: true,
        }
    }
}

impl NidexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, NidexError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NidexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), NidexError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| NidexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that thresholds describe non-empty bands.
    pub fn validate(&self) -> Result<(), NidexError> {
        let c = &self.classifier;

        if !(c.portrait_min_ratio > 0.0 && c.portrait_min_ratio < c.portrait_max_ratio) {
            return Err(NidexError::Config(format!(
                "portrait ratio band is empty: {} < ratio < {}",
                c.portrait_min_ratio, c.portrait_max_ratio
            )));
        }

        if !(c.signature_min_ratio > 0.0) {
            return Err(NidexError::Config(format!(
                "signature_min_ratio must be positive, got {}",
                c.signature_min_ratio
            )));
        }

        if c.signature_min_height >= c.signature_max_height {
            return Err(NidexError::Config(format!(
                "signature height band is empty: {} < height < {}",
                c.signature_min_height, c.signature_max_height
            )));
        }

        if self.output.image_mode == ImageOutputMode::Url && self.output.image_base_url.trim().is_empty() {
            return Err(NidexError::Config(
                "image_base_url is required in url mode".to_string(),
            ));
        }

        Ok(())
    }
}
