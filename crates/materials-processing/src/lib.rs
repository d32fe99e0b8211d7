//! Editing and export of materials
//!
//! This crate holds the editable surfaces (pixel buffer or text buffer), the
//! single image mutation (a text overlay), the editor state machine, and the
//! serialization of a surface into a downloadable artifact. Nothing here
//! talks to the network.

pub mod compression;
pub mod editor;
pub mod error;
pub mod export;
pub mod image;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use editor::{EditSession, Editor, EditorOptions, EditorState};
pub use error::EditorError;
pub use export::ExportArtifact;
pub use surface::Surface;
