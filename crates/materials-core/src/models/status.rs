use serde::{Deserialize, Serialize};

/// Summary returned by `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub server: String,
    pub materials_count: u64,
    pub uploads_count: u64,
    pub pending_count: u64,
    pub approved_count: u64,
    #[serde(default)]
    pub timestamp: String,
}

/// Response of `POST /uploads`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReceipt {
    #[serde(default)]
    pub message: String,
    pub evidence_id: String,
}
