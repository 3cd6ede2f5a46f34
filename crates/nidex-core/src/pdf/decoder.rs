//! PDF decoding using lopdf and pdf-extract.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, trace};

use super::{image_id, DecodedDocument, DocumentDecoder, Result};
use crate::error::PdfError;
use crate::models::{ImageCandidate, PdfConfig};

/// Decodes PDF documents into text and image candidates.
#[derive(Debug, Clone, Default)]
pub struct PdfDecoder {
    config: PdfConfig,
}

/// An image stream turned into encoded bytes.
struct EncodedImage {
    data: Vec<u8>,
    extension: &'static str,
    /// Set only when `data` is a well-formed image of these dimensions.
    dimensions: Option<(u32, u32)>,
}

impl PdfDecoder {
    /// Create a decoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Parse the document, decrypting empty-password PDFs.
    ///
    /// Returns the document and the bytes pdf-extract should read.
    fn load(&self, data: &[u8]) -> Result<(Document, Vec<u8>)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok((doc, raw))
    }

    /// Images on one page, in resource dictionary order.
    fn page_images(&self, doc: &Document, page_id: ObjectId) -> Vec<EncodedImage> {
        let Some(resources) = page_resources(doc, page_id) else {
            return Vec::new();
        };
        let Ok(xobjects) = resources.get(b"XObject") else {
            return Vec::new();
        };
        let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) else {
            return Vec::new();
        };

        xobjects
            .iter()
            .filter_map(|(_, obj_ref)| match doc.dereference(obj_ref) {
                Ok((_, Object::Stream(stream))) => encode_image_stream(doc, stream),
                _ => None,
            })
            .collect()
    }
}

impl DocumentDecoder for PdfDecoder {
    fn decode(&self, data: &[u8], request_id: &str) -> Result<DecodedDocument> {
        let (doc, raw) = self.load(data)?;
        let pages = doc.get_pages();
        let page_count = pages.len() as u32;

        let text = pdf_extract::extract_text_from_mem(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let mut images = Vec::new();
        if self.config.extract_images {
            let limit = match self.config.max_pages {
                0 => usize::MAX,
                n => n,
            };

            for (page, page_id) in pages.into_iter().take(limit) {
                for (i, encoded) in self.page_images(&doc, page_id).into_iter().enumerate() {
                    let id = image_id(request_id, page, i + 1, encoded.extension);
                    let mut candidate = ImageCandidate::from_bytes(id, encoded.data);
                    if let Some((width, height)) = encoded.dimensions {
                        candidate = candidate.with_dimensions(width, height);
                    }
                    images.push(candidate);
                }
            }
        }

        debug!(
            "Decoded PDF: {} pages, {} chars text, {} images",
            page_count,
            text.len(),
            images.len()
        );

        Ok(DecodedDocument {
            text,
            images,
            page_count,
        })
    }
}

/// Resources dictionary for a page, following `Parent` inheritance.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = dict.get(b"Resources") {
        if let Ok((_, Object::Dictionary(res_dict))) = doc.dereference(resources) {
            return Some(res_dict.clone());
        }
    }

    match dict.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id),
        _ => None,
    }
}

fn name_of<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a [u8]> {
    match obj {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
        _ => None,
    }
}

/// Turn an image XObject into encoded bytes.
///
/// JPEG streams pass through. 8-bit RGB and gray streams become PNG. Anything
/// else keeps its raw bytes without dimensions, so the classifier reports it.
fn encode_image_stream(doc: &Document, stream: &Stream) -> Option<EncodedImage> {
    let dict = &stream.dict;
    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
    trace!("Found image object: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|f| name_of(doc, f));
    match filter {
        Some(b"DCTDecode") => {
            return Some(EncodedImage {
                data: stream.content.clone(),
                extension: "jpg",
                dimensions: Some((width, height)),
            });
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Unsupported image filter {:?}", filter.map(String::from_utf8_lossy));
            return Some(raw_image(stream.content.clone()));
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| name_of(doc, o))
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    match raw_to_png(&data, width, height, color_space, bits) {
        Some(png) => Some(EncodedImage {
            data: png,
            extension: "png",
            dimensions: Some((width, height)),
        }),
        None => Some(raw_image(data)),
    }
}

fn raw_image(data: Vec<u8>) -> EncodedImage {
    EncodedImage {
        data,
        extension: "bin",
        dimensions: None,
    }
}

fn raw_to_png(data: &[u8], width: u32, height: u32, color_space: &[u8], bits: i64) -> Option<Vec<u8>> {
    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    let pixels = (width as usize).checked_mul(height as usize)?;
    let image = match color_space {
        b"DeviceRGB" | b"RGB" => {
            let len = pixels.checked_mul(3)?;
            DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, data.get(..len)?.to_vec())?)
        }
        b"DeviceGray" | b"G" => {
            DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, data.get(..pixels)?.to_vec())?)
        }
        _ => {
            trace!("Unsupported color space: {:?}", String::from_utf8_lossy(color_space));
            return None;
        }
    };

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).ok()?;
    Some(png)
}
