//! Writes classified images to disk so URL-mode responses resolve.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use nidex_core::models::{ExtractionResult, ImageCandidate};

/// Directory that image URLs are served from.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Open the store, creating the directory if needed.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Save the portrait and signature of a result under their identifiers.
    ///
    /// Candidates without bytes are skipped.
    pub fn save_classified(
        &self,
        result: &ExtractionResult,
        images: &[ImageCandidate],
    ) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for id in [&result.portrait_id, &result.signature_id].into_iter().flatten() {
            let Some(data) = images.iter().find(|c| &c.id == id).and_then(|c| c.bytes()) else {
                continue;
            };

            let path = self.dir.join(id);
            if written.contains(&path) {
                continue;
            }
            fs::write(&path, data)?;
            debug!("Wrote {} ({} bytes)", path.display(), data.len());
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidex_core::ExtractionOrchestrator;

    #[test]
    fn test_save_classified() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(&dir.path().join("image")).unwrap();

        let images = vec![
            ImageCandidate::from_bytes("face.png", b"face".to_vec()).with_dimensions(300, 300),
            ImageCandidate::from_bytes("logo.png", b"logo".to_vec()).with_dimensions(10, 10),
            ImageCandidate::from_bytes("sign.png", b"sign".to_vec()).with_dimensions(600, 150),
        ];
        let result = ExtractionOrchestrator::new().extract("", &images).unwrap();

        let written = store.save_classified(&result, &images).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(fs::read(dir.path().join("image/face.png")).unwrap(), b"face");
        assert_eq!(fs::read(dir.path().join("image/sign.png")).unwrap(), b"sign");
        assert!(!dir.path().join("image/logo.png").exists());
    }
}
