//! Approval list flow

use materials_core::constants::{containers, messages};
use materials_core::error::log_error;

use crate::api::MaterialsApi;
use crate::view::{Node, Page, UploadCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// This many upload cards were rendered
    Rendered(usize),
    /// There are no uploads; the placeholder was rendered
    Empty,
    Failed,
    NoContainer,
}

/// Fetch upload records and render them into the `approval-list` container.
///
/// An empty list renders the "No uploads yet." placeholder and nothing else.
/// Statuses other than `approved` and `rejected` are shown as pending.
pub async fn refresh_approvals<A>(api: &A, page: &mut Page) -> ApprovalOutcome
where
    A: MaterialsApi + ?Sized,
{
    let uploads = match api.list_uploads().await {
        Ok(uploads) => uploads,
        Err(e) => {
            log_error("Error fetching uploads", &e);
            page.show_error(
                containers::APPROVAL_LIST,
                format!("{}: {}", messages::UPLOAD_LIST_FAILED, e),
            );
            return ApprovalOutcome::Failed;
        }
    };

    let Some(container) = page.container_mut(containers::APPROVAL_LIST) else {
        tracing::warn!(
            container = containers::APPROVAL_LIST,
            "No approval list container, nothing rendered"
        );
        return ApprovalOutcome::NoContainer;
    };

    tracing::info!(count = uploads.len(), "Fetched uploads");
    if uploads.is_empty() {
        container.replace(vec![Node::placeholder(messages::NO_UPLOADS)]);
        return ApprovalOutcome::Empty;
    }

    let cards: Vec<Node> = uploads
        .iter()
        .map(|record| Node::UploadCard(UploadCard::from(record)))
        .collect();
    let count = cards.len();
    container.replace(cards);
    ApprovalOutcome::Rendered(count)
}
