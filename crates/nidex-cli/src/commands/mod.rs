//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::{debug, info, warn};

use nidex_core::models::{ExtractionResult, ImageCandidate, ImageOutputMode, NidexConfig};
use nidex_core::pdf::{DecodedDocument, DocumentDecoder, PdfDecoder};

/// Image representation selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ImageMode {
    /// Image URLs under the configured base URL
    Url,
    /// Base64-encoded image bytes
    Inline,
}

impl From<ImageMode> for ImageOutputMode {
    fn from(mode: ImageMode) -> Self {
        match mode {
            ImageMode::Url => ImageOutputMode::Url,
            ImageMode::Inline => ImageOutputMode::Inline,
        }
    }
}

/// Location written by `nidex config init` and `nidex config set`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nidex")
        .join("config.json")
}

/// Load the config file if given, else the default config file if it exists,
/// else defaults. The result is validated.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<NidexConfig> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_config_path()).filter(|p| p.exists()),
    };

    let config = match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            NidexConfig::from_file(&path)?
        }
        None => NidexConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Classified images that URL-mode output points at but nothing writes to disk.
pub fn unstored_image_ids<'a>(
    result: &'a ExtractionResult,
    images: &[ImageCandidate],
    config: &NidexConfig,
    stored: bool,
) -> Vec<&'a str> {
    if stored || config.output.image_mode != ImageOutputMode::Url {
        return Vec::new();
    }

    [&result.portrait_id, &result.signature_id]
        .into_iter()
        .flatten()
        .filter(|id| images.iter().any(|c| &c.id == *id && c.bytes().is_some()))
        .map(String::as_str)
        .collect()
}

pub fn warn_unstored_images(
    result: &ExtractionResult,
    images: &[ImageCandidate],
    config: &NidexConfig,
    stored: bool,
) {
    for id in unstored_image_ids(result, images, config, stored) {
        warn!(
            "Image {} is referenced by URL but not stored; pass --image-dir to write it",
            id
        );
    }
}

/// Whether the extension is one the CLI can read.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_str(), "pdf" | "txt")
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Per-document identifier used to name images.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Read a PDF or text file into text and image candidates.
///
/// `extra_images` are appended after any images found in the document.
pub fn load_document(
    path: &Path,
    extra_images: &[PathBuf],
    config: &NidexConfig,
    request_id: &str,
) -> anyhow::Result<DecodedDocument> {
    let mut document = match extension(path).as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            PdfDecoder::with_config(config.pdf.clone()).decode(&data, request_id)?
        }
        "txt" => DecodedDocument {
            text: fs::read_to_string(path)?,
            ..Default::default()
        },
        other => anyhow::bail!("Unsupported file format: {}", other),
    };

    for image_path in extra_images {
        let name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid image path: {}", image_path.display()))?;
        let data = fs::read(image_path)?;
        debug!("Loaded image {} ({} bytes)", image_path.display(), data.len());
        document
            .images
            .push(ImageCandidate::from_bytes(format!("{request_id}_{name}"), data));
    }

    info!(
        "Loaded {}: {} chars, {} images",
        path.display(),
        document.text.len(),
        document.images.len()
    );

    Ok(document)
}
