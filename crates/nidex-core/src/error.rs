//! Error types for the nidex-core library.
//!
//! Missing fields are never errors: they are `None` in the records. The types
//! here cover collaborator failures (PDF decoding, configuration, I/O) and the
//! per-candidate image failures that the classifier records as diagnostics.

use thiserror::Error;

/// Main error type for the nidex library.
#[derive(Error, Debug)]
pub enum NidexError {
    /// PDF decoding error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Malformed extraction input.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF decoding.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors for a single image candidate.
///
/// These are recorded per candidate and never abort a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The candidate bytes could not be decoded or measured.
    #[error("undecodable image: {0}")]
    Undecodable(String),

    /// The candidate has a zero width or height.
    #[error("image has zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    /// The candidate is an external reference without known dimensions.
    #[error("reference {0} has no known dimensions")]
    Unmeasurable(String),

    /// Inline output was requested for a candidate that carries no bytes.
    #[error("no inline data for {0}")]
    NoInlineData(String),
}

/// Errors in the shape of an extraction request.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Two image candidates share the same identifier.
    #[error("duplicate image candidate id: {0}")]
    DuplicateCandidate(String),
}

/// Result type for the nidex library.
pub type Result<T> = std::result::Result<T, NidexError>;
