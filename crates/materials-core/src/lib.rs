//! Materials Core Library
//!
//! This crate provides the domain models, error metadata, and configuration
//! shared by the materials API client, the editor, the flows, and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ErrorMetadata, LogLevel};
pub use models::{
    ContentDecodeError, EvidenceReceipt, Material, MaterialContent, MaterialId, MaterialKind,
    ReviewStatus, ServerStatus, StatusClass, UploadId, UploadRecord,
};
