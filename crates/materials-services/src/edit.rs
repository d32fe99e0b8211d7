//! Edit flow: fetch a material and open it in the editor

use materials_core::constants::{containers, messages};
use materials_core::error::log_error;
use materials_core::models::{MaterialId, MaterialKind};
use materials_processing::{EditSession, Editor, Surface};

use crate::api::MaterialsApi;
use crate::view::{EditorView, Node, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The editor holds a session of this kind
    Opened(MaterialKind),
    /// Nothing was opened; carries the message shown to the user
    Failed(String),
}

impl From<&EditSession> for EditorView {
    fn from(session: &EditSession) -> Self {
        let text = match &session.surface {
            Surface::Text(text) => Some(text.clone()),
            Surface::Image(_) => None,
        };
        Self {
            material_id: session.material_id.clone(),
            kind: session.kind(),
            dimensions: session.surface.dimensions(),
            text,
        }
    }
}

/// Re-render the `editor` container from the editor's current state.
pub fn render_editor(editor: &Editor, page: &mut Page) {
    let Some(container) = page.container_mut(containers::EDITOR) else {
        tracing::warn!(container = containers::EDITOR, "No editor container, nothing rendered");
        return;
    };
    match editor.session() {
        Some(session) => container.replace(vec![Node::Editor(EditorView::from(session))]),
        None => container.clear(),
    }
}

/// Fetch material `id` as `kind` and open it for editing.
///
/// Any failure, fetching or decoding, leaves the editor back on the list and
/// puts an error node in the `editor` container.
pub async fn open_editor<A>(
    api: &A,
    editor: &mut Editor,
    page: &mut Page,
    id: &MaterialId,
    kind: MaterialKind,
) -> EditOutcome
where
    A: MaterialsApi + ?Sized,
{
    let content = match api.fetch_material_content(id, kind).await {
        Ok(content) => content,
        Err(e) => {
            log_error("Error fetching material content", &e);
            return fail(editor, page, e.to_string());
        }
    };

    match editor.enter(id.clone(), content).map(EditSession::kind) {
        Ok(opened) => {
            render_editor(editor, page);
            EditOutcome::Opened(opened)
        }
        Err(e) => {
            log_error("Error opening material", &e);
            fail(editor, page, e.to_string())
        }
    }
}

/// Leave the edit session and clear the editor view.
pub fn close_editor(editor: &mut Editor, page: &mut Page) {
    editor.back();
    render_editor(editor, page);
}

fn fail(editor: &mut Editor, page: &mut Page, reason: String) -> EditOutcome {
    editor.back();
    render_editor(editor, page);
    let message = format!("{}: {}", messages::MATERIAL_CONTENT_FAILED, reason);
    page.show_error(containers::EDITOR, message.clone());
    EditOutcome::Failed(message)
}
