//! Editor state machine
//!
//! Two states: viewing the list, or editing exactly one material. Entering an
//! edit session replaces whatever session was open; leaving discards it.

use materials_core::constants::DEFAULT_JPEG_QUALITY;
use materials_core::{ClientConfig, MaterialContent, MaterialId, MaterialKind};
use std::path::PathBuf;

use crate::error::EditorError;
use crate::export::ExportArtifact;
use crate::image::{OverlayStyle, TextOverlay};
use crate::surface::Surface;

/// Editor settings taken from the client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub jpeg_quality: u8,
    pub overlay_font: Option<PathBuf>,
    pub overlay_style: OverlayStyle,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            overlay_font: None,
            overlay_style: OverlayStyle::default(),
        }
    }
}

impl From<&ClientConfig> for EditorOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
            overlay_font: config.overlay_font.clone(),
            overlay_style: OverlayStyle::default(),
        }
    }
}

/// The one material currently open for editing
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub material_id: MaterialId,
    pub surface: Surface,
}

impl EditSession {
    pub fn kind(&self) -> MaterialKind {
        self.surface.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    ViewingList,
    Editing(EditSession),
}

#[derive(Debug, Default)]
pub struct Editor {
    options: EditorOptions,
    state: EditorState,
    /// Loaded on first use and kept for later stamps.
    overlay: Option<TextOverlay>,
}

impl Editor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            options,
            state: EditorState::ViewingList,
            overlay: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditorState::Editing(session) => Some(session),
            EditorState::ViewingList => None,
        }
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, EditorError> {
        match &mut self.state {
            EditorState::Editing(session) => Ok(session),
            EditorState::ViewingList => Err(EditorError::NotEditing),
        }
    }

    /// Open `content` for editing, replacing any open session. If the content
    /// cannot be decoded the editor goes back to the list.
    pub fn enter(
        &mut self,
        material_id: MaterialId,
        content: MaterialContent,
    ) -> Result<&EditSession, EditorError> {
        let kind = content.kind();
        let surface = match Surface::from_content(content) {
            Ok(surface) => surface,
            Err(e) => {
                self.state = EditorState::ViewingList;
                return Err(e);
            }
        };

        tracing::info!(material_id = %material_id, kind = %kind, "Editing material");
        self.state = EditorState::Editing(EditSession {
            material_id,
            surface,
        });
        self.session().ok_or(EditorError::NotEditing)
    }

    /// Leave the edit session, discarding unsaved changes. Returns the
    /// discarded session, if any.
    pub fn back(&mut self) -> Option<EditSession> {
        match std::mem::take(&mut self.state) {
            EditorState::Editing(session) => {
                tracing::debug!(material_id = %session.material_id, "Discarded edit session");
                Some(session)
            }
            EditorState::ViewingList => None,
        }
    }

    /// Stamp `text` onto the open image. Repeated calls stamp again.
    pub fn stamp_overlay(&mut self, text: &str) -> Result<(), EditorError> {
        let actual = self.session_mut()?.kind();
        if actual != MaterialKind::Image {
            return Err(EditorError::WrongSurface {
                expected: MaterialKind::Image,
                actual,
            });
        }

        if self.overlay.is_none() {
            self.overlay = Some(TextOverlay::load(
                self.options.overlay_font.as_deref(),
                self.options.overlay_style,
            )?);
        }

        if let (Some(overlay), EditorState::Editing(session)) = (&self.overlay, &mut self.state) {
            if let Surface::Image(img) = &mut session.surface {
                overlay.stamp(img, text);
                tracing::debug!(material_id = %session.material_id, "Stamped overlay text");
            }
        }
        Ok(())
    }

    /// Current text buffer of an open text material.
    pub fn text(&self) -> Option<&str> {
        match self.session().map(|s| &s.surface) {
            Some(Surface::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Replace the text buffer of the open text material.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        let session = self.session_mut()?;
        match &mut session.surface {
            Surface::Text(buffer) => {
                *buffer = text.into();
                Ok(())
            }
            Surface::Image(_) => Err(EditorError::WrongSurface {
                expected: MaterialKind::Text,
                actual: MaterialKind::Image,
            }),
        }
    }

    /// Serialize the open surface into a downloadable artifact.
    pub fn export(&self) -> Result<ExportArtifact, EditorError> {
        let session = self.session().ok_or(EditorError::NotEditing)?;
        ExportArtifact::from_surface(&session.surface, self.options.jpeg_quality)
    }
}
