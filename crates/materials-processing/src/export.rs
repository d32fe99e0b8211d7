//! Export artifacts
//!
//! An export is a local serialization of the editable surface. It never goes
//! back to the server; the binding layer offers it as a download.

use bytes::Bytes;
use materials_core::constants::{
    CONTENT_TYPE_JPEG, CONTENT_TYPE_TEXT, EDITED_IMAGE_FILENAME, EDITED_TEXT_FILENAME,
};
use std::path::{Path, PathBuf};

use crate::compression::ImageCompressor;
use crate::error::EditorError;
use crate::surface::Surface;

/// A downloadable file produced from an edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ExportArtifact {
    /// Serialize `surface`: JPEG for images, the buffer verbatim for text.
    pub fn from_surface(surface: &Surface, jpeg_quality: u8) -> Result<Self, EditorError> {
        match surface {
            Surface::Image(img) => Ok(Self {
                file_name: EDITED_IMAGE_FILENAME.to_string(),
                content_type: CONTENT_TYPE_JPEG.to_string(),
                data: ImageCompressor::encode_jpeg(img, jpeg_quality)?,
            }),
            Surface::Text(text) => Ok(Self {
                file_name: EDITED_TEXT_FILENAME.to_string(),
                content_type: CONTENT_TYPE_TEXT.to_string(),
                data: Bytes::from(text.clone().into_bytes()),
            }),
        }
    }

    /// Write the artifact into `dir`, creating it if needed. Returns the
    /// path written. An existing file of the same name is replaced.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, EditorError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.data)?;
        tracing::info!(path = %path.display(), size = self.data.len(), "Saved export");
        Ok(path)
    }
}
