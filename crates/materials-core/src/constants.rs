//! Fixed names and defaults shared across crates.

/// Default base URL of the materials service.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PREVIEW_CONCURRENCY: usize = 4;
/// JPEG quality used for exported image edits unless configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// File name of an exported image edit.
pub const EDITED_IMAGE_FILENAME: &str = "edited_image.jpg";
/// File name of an exported text edit.
pub const EDITED_TEXT_FILENAME: &str = "edited_text.txt";
/// Blob name used when typed text is uploaded as a new material.
pub const UPLOADED_TEXT_FILENAME: &str = "text.txt";

pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Container ids used by the render model.
pub mod containers {
    pub const MATERIAL_LIST: &str = "material-list";
    pub const APPROVAL_LIST: &str = "approval-list";
    pub const EDITOR: &str = "editor";
    pub const STATUS: &str = "status";
    /// Fallback container that receives errors when the intended one is absent.
    pub const RESULT: &str = "result";
}

/// User-facing messages.
pub mod messages {
    pub const TEXT_PREVIEW_FAILED: &str = "Failed to retrieve text";
    pub const NO_UPLOADS: &str = "No uploads yet.";
    pub const MATERIAL_LIST_FAILED: &str = "Failed to fetch the material list";
    pub const UPLOAD_LIST_FAILED: &str = "Failed to fetch the upload list";
    pub const MATERIAL_CONTENT_FAILED: &str = "Failed to load the material";
    pub const STATUS_FAILED: &str = "Failed to fetch the server status";
    pub const UPLOAD_FAILED: &str = "Upload failed";
    pub const EVIDENCE_FAILED: &str = "Failed to submit evidence";
}
