//! Render model
//!
//! Flows never touch a presentation surface directly. They put [`Node`]s into
//! named [`Container`]s of a [`Page`]; a binding layer (the CLI, a web front
//! end) decides how to show them. `inner_html` renders a container as HTML
//! markup, which also keeps containers comparable in tests.

use materials_core::constants::containers;
use materials_core::models::{Material, MaterialId, MaterialKind, ServerStatus, UploadRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// One material entry in the list, with its edit trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialCard {
    pub id: MaterialId,
    pub name: String,
    pub label: String,
    pub kind: MaterialKind,
    pub image_url: String,
    pub preview: String,
}

impl MaterialCard {
    pub fn new(material: &Material, image_url: String, preview: String) -> Self {
        Self {
            id: material.id.clone(),
            name: material.name.clone(),
            label: material.label().to_string(),
            kind: material.kind(),
            image_url,
            preview,
        }
    }
}

/// One upload/review record with its status classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadCard {
    pub id: String,
    pub material_id: String,
    pub url: String,
    pub comment: String,
    pub status: String,
    pub status_class: &'static str,
    pub timestamp: String,
}

impl From<&UploadRecord> for UploadCard {
    fn from(record: &UploadRecord) -> Self {
        Self {
            id: record.id.to_string(),
            material_id: record.material_id.to_string(),
            url: record.url.clone(),
            comment: record.comment.clone(),
            status: record.status.to_string(),
            status_class: record.status.class().css_class(),
            timestamp: record.timestamp.clone(),
        }
    }
}

/// The open edit session as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub material_id: MaterialId,
    pub kind: MaterialKind,
    /// Natural size of an image surface
    pub dimensions: Option<(u32, u32)>,
    /// Current buffer of a text surface
    pub text: Option<String>,
}

/// A render instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    MaterialCard(MaterialCard),
    UploadCard(UploadCard),
    Editor(EditorView),
    Status(ServerStatus),
    Placeholder { text: String },
    Error { message: String },
}

impl Node {
    pub fn error(message: impl Into<String>) -> Self {
        Node::Error {
            message: message.into(),
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Node::Placeholder { text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Node::Error { .. })
    }

    pub fn to_html(&self) -> String {
        match self {
            Node::MaterialCard(card) => format!(
                concat!(
                    r#"<div class="material-card">"#,
                    r#"<span>{name} ({label})</span>"#,
                    r#"<div class="content">"#,
                    r#"<img src="{src}" alt="{name}"><p>{preview}</p>"#,
                    r#"</div>"#,
                    r#"<button class="edit-button" data-id="{id}" data-type="{kind}">"#,
                    r#"Edit</button>"#,
                    r#"</div>"#
                ),
                name = escape_html(&card.name),
                label = escape_html(&card.label),
                src = escape_html(&card.image_url),
                preview = escape_html(&card.preview),
                id = escape_html(card.id.as_str()),
                kind = card.kind,
            ),
            Node::UploadCard(card) => format!(
                concat!(
                    r#"<div class="upload-card">"#,
                    r#"<div class="{class}">{status}</div>"#,
                    r#"<span><strong>ID:</strong> {id}</span>"#,
                    r#"<span><strong>Material ID:</strong> {material_id}</span>"#,
                    r#"<span><strong>URL:</strong> {url}</span>"#,
                    r#"<span><strong>Comment:</strong> {comment}</span>"#,
                    r#"<span><strong>Timestamp:</strong> {timestamp}</span>"#,
                    r#"</div>"#
                ),
                class = card.status_class,
                status = escape_html(&card.status),
                id = escape_html(&card.id),
                material_id = escape_html(&card.material_id),
                url = escape_html(&card.url),
                comment = escape_html(&card.comment),
                timestamp = escape_html(&card.timestamp),
            ),
            Node::Editor(view) => match (&view.text, view.dimensions) {
                (Some(text), _) => format!(
                    r#"<textarea id="text-editor" data-id="{}">{}</textarea>"#,
                    escape_html(view.material_id.as_str()),
                    escape_html(text)
                ),
                (None, Some((width, height))) => format!(
                    r#"<canvas id="image-editor" data-id="{}" width="{}" height="{}"></canvas>"#,
                    escape_html(view.material_id.as_str()),
                    width,
                    height
                ),
                (None, None) => String::new(),
            },
            Node::Status(status) => format!(
                concat!(
                    r#"<div class="server-status">"#,
                    r#"<span><strong>Server:</strong> {}</span>"#,
                    r#"<span><strong>Materials:</strong> {}</span>"#,
                    r#"<span><strong>Uploads:</strong> {}</span>"#,
                    r#"<span><strong>Pending:</strong> {}</span>"#,
                    r#"<span><strong>Approved:</strong> {}</span>"#,
                    r#"<span><strong>Timestamp:</strong> {}</span>"#,
                    r#"</div>"#
                ),
                escape_html(&status.server),
                status.materials_count,
                status.uploads_count,
                status.pending_count,
                status.approved_count,
                escape_html(&status.timestamp),
            ),
            Node::Placeholder { text } => format!("<p>{}</p>", escape_html(text)),
            Node::Error { message } => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        }
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A named region of the page holding an ordered list of nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Container {
    nodes: Vec<Node>,
}

impl Container {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace everything at once.
    pub fn replace(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    pub fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn errors(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_error())
    }

    pub fn inner_html(&self) -> String {
        self.nodes.iter().map(Node::to_html).collect()
    }
}

/// The set of containers a binding layer exposes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    containers: BTreeMap<String, Container>,
}

impl Page {
    /// A page without any containers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(ids: &[&str]) -> Self {
        let mut page = Self::new();
        for id in ids {
            page.ensure(id);
        }
        page
    }

    /// Material list, approval list, editor and status containers.
    pub fn standard() -> Self {
        Self::with_containers(&[
            containers::MATERIAL_LIST,
            containers::APPROVAL_LIST,
            containers::EDITOR,
            containers::STATUS,
        ])
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    /// Get a container, creating it empty if absent.
    pub fn ensure(&mut self, id: &str) -> &mut Container {
        self.containers.entry(id.to_string()).or_default()
    }

    pub fn remove(&mut self, id: &str) -> Option<Container> {
        self.containers.remove(id)
    }

    /// Show an error inline in `container_id`. Without that container the error
    /// goes to the `result` container, which is created on demand.
    pub fn show_error(&mut self, container_id: &str, message: impl Into<String>) {
        let message = message.into();
        match self.containers.get_mut(container_id) {
            Some(container) => container.append(Node::error(message)),
            None => {
                tracing::warn!(
                    container = container_id,
                    "Container not found, reporting error in result"
                );
                self.ensure(containers::RESULT).append(Node::error(message));
            }
        }
    }
}
