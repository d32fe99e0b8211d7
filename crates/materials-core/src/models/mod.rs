//! Data models for the materials client
//!
//! Wire shapes of the materials service plus the tagged content variant the
//! editor and exporter consume.

mod id;
mod material;
mod status;
mod upload;

pub use id::{MaterialId, UploadId};
pub use material::{ContentDecodeError, Material, MaterialContent, MaterialKind};
pub use status::{EvidenceReceipt, ServerStatus};
pub use upload::{ReviewStatus, StatusClass, UploadRecord};
