//! Editable surfaces

use image::{GenericImageView, ImageReader, RgbaImage};
use materials_core::{MaterialContent, MaterialKind};
use std::io::Cursor;

use crate::error::EditorError;

/// In-memory state the user edits before exporting
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Pixel buffer at the image's natural dimensions
    Image(RgbaImage),
    /// Text buffer, edited directly
    Text(String),
}

impl Surface {
    /// Build a surface from fetched content. Image bytes are decoded with
    /// the format guessed from their header.
    pub fn from_content(content: MaterialContent) -> Result<Self, EditorError> {
        match content {
            MaterialContent::Image(data) => {
                let reader = ImageReader::new(Cursor::new(&data[..])).with_guessed_format()?;
                let img = reader.decode()?;
                let (width, height) = img.dimensions();
                tracing::debug!(width, height, "Decoded image surface");
                Ok(Surface::Image(img.to_rgba8()))
            }
            MaterialContent::Text(text) => Ok(Surface::Text(text)),
        }
    }

    pub fn kind(&self) -> MaterialKind {
        match self {
            Surface::Image(_) => MaterialKind::Image,
            Surface::Text(_) => MaterialKind::Text,
        }
    }

    /// Pixel dimensions of an image surface.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Surface::Image(img) => Some(img.dimensions()),
            Surface::Text(_) => None,
        }
    }
}
