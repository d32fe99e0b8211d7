use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use super::id::MaterialId;

/// Representation of a material's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Image,
    Text,
}

impl MaterialKind {
    /// Wire name, used for the `type` query parameter and multipart field.
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialKind::Image => "image",
            MaterialKind::Text => "text",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(MaterialKind::Image),
            "text" => Ok(MaterialKind::Text),
            other => Err(format!("Unknown material type '{}'. Must be: image or text", other)),
        }
    }
}

/// Material summary as returned by `GET /materials`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    /// Any other fields the service returns (stored file names and so on).
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Material {
    /// Declared kind: `type` first, then `category`. `None` when neither names
    /// a known kind.
    pub fn declared_kind(&self) -> Option<MaterialKind> {
        self.declared_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .or_else(|| self.category.as_deref().and_then(|c| c.parse().ok()))
    }

    /// Kind used for editing. The service serves images when no type is
    /// requested, so an undeclared material is treated as an image.
    pub fn kind(&self) -> MaterialKind {
        self.declared_kind().unwrap_or(MaterialKind::Image)
    }

    /// Label shown next to the name: the category, else the declared type.
    pub fn label(&self) -> &str {
        self.category
            .as_deref()
            .or(self.declared_type.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentDecodeError {
    #[error("Text content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Fetched content of one material
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialContent {
    Image(Bytes),
    Text(String),
}

impl MaterialContent {
    /// Interpret raw bytes according to `kind`.
    pub fn from_bytes(kind: MaterialKind, data: Bytes) -> Result<Self, ContentDecodeError> {
        match kind {
            MaterialKind::Image => Ok(MaterialContent::Image(data)),
            MaterialKind::Text => Ok(MaterialContent::Text(String::from_utf8(data.to_vec())?)),
        }
    }

    pub fn kind(&self) -> MaterialKind {
        match self {
            MaterialContent::Image(_) => MaterialKind::Image,
            MaterialContent::Text(_) => MaterialKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MaterialContent::Image(data) => data.len(),
            MaterialContent::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
