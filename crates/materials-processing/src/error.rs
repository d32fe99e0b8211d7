use materials_core::{ErrorMetadata, LogLevel, MaterialKind};

/// Editor and export errors
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("No material is being edited")]
    NotEditing,

    #[error("Operation needs a {expected} surface, but a {actual} material is open")]
    WrongSurface {
        expected: MaterialKind,
        actual: MaterialKind,
    },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode export: {0}")]
    Encode(String),

    #[error("No usable overlay font: {0}")]
    FontUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorMetadata for EditorError {
    fn error_code(&self) -> &'static str {
        match self {
            EditorError::NotEditing => "NOT_EDITING",
            EditorError::WrongSurface { .. } => "WRONG_SURFACE",
            EditorError::Decode(_) => "IMAGE_DECODE_ERROR",
            EditorError::Encode(_) => "EXPORT_ENCODE_ERROR",
            EditorError::FontUnavailable(_) => "FONT_UNAVAILABLE",
            EditorError::Io(_) => "IO_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, EditorError::Io(_))
    }

    fn client_message(&self) -> String {
        match self {
            EditorError::FontUnavailable(_) => {
                "Text overlay needs a font; set MATERIALS_OVERLAY_FONT to a .ttf/.otf file"
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            EditorError::NotEditing | EditorError::WrongSurface { .. } => LogLevel::Debug,
            EditorError::Decode(_) | EditorError::FontUnavailable(_) => LogLevel::Warn,
            EditorError::Encode(_) | EditorError::Io(_) => LogLevel::Error,
        }
    }
}

impl From<image::ImageError> for EditorError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => EditorError::Io(io),
            image::ImageError::Encoding(e) => EditorError::Encode(e.to_string()),
            other => EditorError::Decode(other.to_string()),
        }
    }
}
