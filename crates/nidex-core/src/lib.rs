//! Core library for national ID document extraction.
//!
//! This crate provides:
//! - Identity field extraction from document text via a label table
//! - Permanent address resolution with a composite address
//! - Portrait/signature classification of embedded images by geometry
//! - PDF decoding into text and image candidates (feature `pdf`)

pub mod classify;
pub mod error;
pub mod models;
pub mod orchestrator;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod rules;

pub use classify::{Classification, ImageClassifier, ImageDiagnostic, Slot};
pub use error::{ExtractionError, ImageError, NidexError, PdfError, Result};
pub use models::{
    AddressRecord, ExtractionResult, ImageCandidate, ImageOutputMode, ImageSlots, NidexConfig,
    PersonRecord,
};
pub use orchestrator::ExtractionOrchestrator;
#[cfg(feature = "pdf")]
pub use pdf::{DecodedDocument, DocumentDecoder, PdfDecoder};
pub use rules::{AddressResolver, ExtractedText, FieldExtractor, FieldMatcher};
