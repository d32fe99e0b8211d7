use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::id::{MaterialId, UploadId};

/// Review state of an upload. The client only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    /// Anything the service sent that is not one of the known states.
    Unrecognized(String),
}

impl ReviewStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => ReviewStatus::Pending,
            "approved" => ReviewStatus::Approved,
            "rejected" => ReviewStatus::Rejected,
            other => ReviewStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::Unrecognized(raw) => raw,
        }
    }

    /// Presentation class. Unrecognized states render as pending, with a
    /// warning so bad data does not disappear silently.
    pub fn class(&self) -> StatusClass {
        match self {
            ReviewStatus::Approved => StatusClass::Approved,
            ReviewStatus::Rejected => StatusClass::Rejected,
            ReviewStatus::Pending => StatusClass::Pending,
            ReviewStatus::Unrecognized(raw) => {
                tracing::warn!(status = %raw, "Unrecognized review status, showing as pending");
                StatusClass::Pending
            }
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReviewStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(ReviewStatus::parse(raw.as_deref().unwrap_or("")))
    }
}

impl Serialize for ReviewStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Visual classification of a review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Approved,
    Rejected,
    Pending,
}

impl StatusClass {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusClass::Approved => "status-badge status-approved",
            StatusClass::Rejected => "status-badge status-rejected",
            StatusClass::Pending => "status-badge status-pending",
        }
    }
}

/// Upload/review record as returned by `GET /uploads`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: UploadId,
    pub material_id: MaterialId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_path: Option<String>,
}
