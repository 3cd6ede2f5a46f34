//! Image candidates handed to the classifier.

use std::io::Cursor;

use image::ImageReader;

use crate::error::ImageError;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. `None` for a zero height.
    pub fn ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

/// Where the image content lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
    /// External reference such as a URL.
    Reference(String),
}

/// A raw image from the document, before role classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Identifier, unique within one request.
    pub id: String,
    /// Image content or reference.
    pub source: ImageSource,
    /// Known pixel dimensions. Measured from the bytes when absent.
    pub dimensions: Option<Dimensions>,
}

impl ImageCandidate {
    /// Candidate from encoded bytes, dimensions to be measured.
    pub fn from_bytes(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            source: ImageSource::Bytes(data),
            dimensions: None,
        }
    }

    /// Candidate from an external reference with known dimensions.
    pub fn from_reference(id: impl Into<String>, reference: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            source: ImageSource::Reference(reference.into()),
            dimensions: Some(Dimensions::new(width, height)),
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(Dimensions::new(width, height));
        self
    }

    /// Encoded bytes, if the candidate carries any.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.source {
            ImageSource::Bytes(data) => Some(data),
            ImageSource::Reference(_) => None,
        }
    }

    /// Resolve the pixel dimensions of this candidate.
    ///
    /// Known dimensions win. Otherwise the image header is read from the
    /// bytes; only the header is parsed, not the pixel data.
    pub fn measure(&self) -> Result<Dimensions, ImageError> {
        let dims = match (&self.dimensions, &self.source) {
            (Some(dims), _) => *dims,
            (None, ImageSource::Bytes(data)) => {
                let (width, height) = ImageReader::new(Cursor::new(data))
                    .with_guessed_format()
                    .map_err(|e| ImageError::Undecodable(e.to_string()))?
                    .into_dimensions()
                    .map_err(|e| ImageError::Undecodable(e.to_string()))?;
                Dimensions::new(width, height)
            }
            (None, ImageSource::Reference(reference)) => {
                return Err(ImageError::Unmeasurable(reference.clone()));
            }
        };

        if dims.width == 0 || dims.height == 0 {
            return Err(ImageError::ZeroDimension {
                width: dims.width,
                height: dims.height,
            });
        }

        Ok(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
            .unwrap();
        data
    }

    #[test]
    fn test_measure_from_bytes() {
        let candidate = ImageCandidate::from_bytes("a.png", png(40, 20));
        assert_eq!(candidate.measure(), Ok(Dimensions::new(40, 20)));
    }

    #[test]
    fn test_known_dimensions_win() {
        let candidate = ImageCandidate::from_bytes("a.png", png(40, 20)).with_dimensions(10, 10);
        assert_eq!(candidate.measure(), Ok(Dimensions::new(10, 10)));
    }

    #[test]
    fn test_measure_garbage() {
        let candidate = ImageCandidate::from_bytes("bad.png", b"not an image".to_vec());
        assert!(matches!(candidate.measure(), Err(ImageError::Undecodable(_))));
    }

    #[test]
    fn test_measure_zero_height() {
        let candidate = ImageCandidate::from_reference("z", "http://x/z.png", 100, 0);
        assert_eq!(
            candidate.measure(),
            Err(ImageError::ZeroDimension { width: 100, height: 0 })
        );
    }

    #[test]
    fn test_reference_without_dimensions() {
        let candidate = ImageCandidate {
            id: "r".to_string(),
            source: ImageSource::Reference("http://x/r.png".to_string()),
            dimensions: None,
        };
        assert!(matches!(candidate.measure(), Err(ImageError::Unmeasurable(_))));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Dimensions::new(600, 150).ratio(), Some(4.0));
        assert_eq!(Dimensions::new(600, 0).ratio(), None);
    }
}
