//! Server status flow

use materials_core::constants::{containers, messages};
use materials_core::error::log_error;
use materials_core::models::ServerStatus;

use crate::api::MaterialsApi;
use crate::view::{Node, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Rendered(ServerStatus),
    Failed,
    NoContainer,
}

/// Fetch `GET /status` and show it in the `status` container.
pub async fn refresh_status<A>(api: &A, page: &mut Page) -> StatusOutcome
where
    A: MaterialsApi + ?Sized,
{
    let status = match api.server_status().await {
        Ok(status) => status,
        Err(e) => {
            log_error("Error fetching server status", &e);
            page.show_error(
                containers::STATUS,
                format!("{}: {}", messages::STATUS_FAILED, e),
            );
            return StatusOutcome::Failed;
        }
    };

    tracing::debug!(
        materials = status.materials_count,
        uploads = status.uploads_count,
        pending = status.pending_count,
        "Fetched server status"
    );
    match page.container_mut(containers::STATUS) {
        Some(container) => {
            container.replace(vec![Node::Status(status.clone())]);
            StatusOutcome::Rendered(status)
        }
        None => {
            tracing::warn!(container = containers::STATUS, "No status container, nothing rendered");
            StatusOutcome::NoContainer
        }
    }
}
