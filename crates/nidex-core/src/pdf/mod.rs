//! Document decoding: PDF bytes to text plus image candidates.
//!
//! This sits in front of the extraction core. The orchestrator never calls
//! it; callers decode first and hand the result over.

mod decoder;

pub use decoder::PdfDecoder;

use crate::error::PdfError;
use crate::models::ImageCandidate;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text and images decoded from one document.
#[derive(Debug, Clone, Default)]
pub struct DecodedDocument {
    /// Concatenated text of all pages.
    pub text: String,
    /// Embedded images, page-major then image-index order.
    pub images: Vec<ImageCandidate>,
    /// Number of pages in the document.
    pub page_count: u32,
}

/// Trait for document decoders.
pub trait DocumentDecoder {
    /// Decode a document. `request_id` prefixes every image identifier so
    /// concurrent requests never produce the same name.
    fn decode(&self, data: &[u8], request_id: &str) -> Result<DecodedDocument>;
}

/// Identifier for the `index`-th image on `page` (both 1-indexed).
pub fn image_id(request_id: &str, page: u32, index: usize, extension: &str) -> String {
    format!("{request_id}_page{page}_img{index}.{extension}")
}
