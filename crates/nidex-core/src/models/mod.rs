//! Data models for extraction input and output.

pub mod address;
pub mod config;
pub mod image;
pub mod person;
pub mod result;

pub use address::{AddressField, AddressRecord};
pub use config::{ClassifierConfig, ImageOutputMode, NidexConfig, OutputConfig, PdfConfig};
pub use self::image::{Dimensions, ImageCandidate, ImageSource};
pub use person::{PersonField, PersonRecord};
pub use result::{ExtractionResult, ImageSlots};
