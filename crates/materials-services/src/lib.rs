//! Materials flows
//!
//! Each flow fetches through [`MaterialsApi`], turns the result into render
//! instructions for a [`Page`], and catches its own failures: an error never
//! escapes a flow, it becomes an inline error node instead.
//!
//! [`MaterialsClient`] wires the flows together around one configuration,
//! one page and one editor.

pub mod api;
pub mod approval;
pub mod client;
pub mod edit;
pub mod list;
pub mod status;
pub mod upload;
pub mod view;

pub use api::MaterialsApi;
pub use approval::{refresh_approvals, ApprovalOutcome};
pub use client::MaterialsClient;
pub use edit::{open_editor, EditOutcome};
pub use list::{refresh_material_list, ListOutcome};
pub use status::{refresh_status, StatusOutcome};
pub use upload::{
    submit_evidence, upload_image, upload_text, EvidenceOutcome, SelectedFile, UploadOutcome,
};
pub use view::{Container, EditorView, MaterialCard, Node, Page, UploadCard};

#[cfg(test)]
pub(crate) mod test_support;
