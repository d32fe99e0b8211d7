//! Material list flow

use futures::stream::{self, StreamExt};
use materials_core::constants::{containers, messages};
use materials_core::error::log_error;
use materials_core::models::{Material, MaterialKind};

use crate::api::MaterialsApi;
use crate::view::{MaterialCard, Node, Page};

/// Result of a list refresh, for callers that want more than the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The list container now holds this many cards
    Rendered(usize),
    /// The list could not be fetched; an error node was added
    Failed,
    /// Data arrived but there was no list container to put it in
    NoContainer,
}

/// Build the card for one material, fetching its text preview.
async fn build_card<A>(api: &A, material: Material) -> MaterialCard
where
    A: MaterialsApi + ?Sized,
{
    let preview = match api.fetch_material_text(&material.id).await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(material_id = %material.id, error = %e, "Text preview unavailable");
            messages::TEXT_PREVIEW_FAILED.to_string()
        }
    };
    let image_url = api.material_content_url(&material.id, MaterialKind::Image);
    MaterialCard::new(&material, image_url, preview)
}

/// Fetch all materials and render one card per material into the
/// `material-list` container.
///
/// Previews are fetched with up to `concurrency` requests in flight; cards
/// keep the server's order. The container is only touched once every card
/// is ready, so a failure leaves the previous list in place with an error
/// appended.
pub async fn refresh_material_list<A>(api: &A, page: &mut Page, concurrency: usize) -> ListOutcome
where
    A: MaterialsApi + ?Sized,
{
    let materials = match api.list_materials().await {
        Ok(materials) => materials,
        Err(e) => {
            log_error("Error fetching materials", &e);
            page.show_error(
                containers::MATERIAL_LIST,
                format!("{}: {}", messages::MATERIAL_LIST_FAILED, e),
            );
            return ListOutcome::Failed;
        }
    };

    let count = materials.len();
    tracing::info!(count, "Fetched materials");

    let cards: Vec<Node> = stream::iter(materials)
        .map(|material| build_card(api, material))
        .buffered(concurrency.max(1))
        .map(Node::MaterialCard)
        .collect()
        .await;

    match page.container_mut(containers::MATERIAL_LIST) {
        Some(container) => {
            container.replace(cards);
            ListOutcome::Rendered(count)
        }
        None => {
            tracing::warn!(
                container = containers::MATERIAL_LIST,
                "No material list container, nothing rendered"
            );
            ListOutcome::NoContainer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_for, mock_material_list};
    use async_trait::async_trait;
    use materials_api_client::{EvidenceSubmission, FetchError, FetchResult, NewMaterial};
    use materials_core::models::{
        EvidenceReceipt, MaterialContent, MaterialId, ServerStatus, UploadRecord,
    };
    use mockito::Server;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_renders_one_card_per_material_in_order() {
        let mut server = Server::new_async().await;
        let _mocks = mock_material_list(&mut server).await;
        let client = client_for(&server);
        let mut page = Page::standard();

        let outcome = refresh_material_list(&client, &mut page, 4).await;
        assert_eq!(outcome, ListOutcome::Rendered(3));

        let list = page.container(containers::MATERIAL_LIST).unwrap();
        let cards: Vec<&MaterialCard> = list
            .nodes()
            .iter()
            .map(|n| match n {
                Node::MaterialCard(card) => card,
                other => panic!("unexpected node {other:?}"),
            })
            .collect();
        assert_eq!(cards.len(), 3);
        assert_eq!(
            cards.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            ["Green tea", "Store notes", "Rice crackers"]
        );
        assert_eq!(cards[0].preview, "Fresh green tea");
        assert_eq!(cards[1].kind, MaterialKind::Text);
        assert_eq!(cards[0].image_url, format!("{}/materials/1?type=image", server.url()));
        // A missing text file falls back instead of failing the list.
        assert_eq!(cards[2].preview, messages::TEXT_PREVIEW_FAILED);
        assert_eq!(cards[2].kind, MaterialKind::Image);
    }

    #[tokio::test]
    async fn test_server_error_keeps_previous_list_and_appends_error() {
        let mut server = Server::new_async().await;
        let mut page = Page::standard();
        {
            let _mocks = mock_material_list(&mut server).await;
            refresh_material_list(&client_for(&server), &mut page, 2).await;
        }
        server.reset_async().await;
        let before = page
            .container(containers::MATERIAL_LIST)
            .unwrap()
            .inner_html();

        let _fail = server
            .mock("GET", "/materials")
            .with_status(500)
            .with_body(r#"{"error": "Invalid materials data"}"#)
            .create_async()
            .await;
        let outcome = refresh_material_list(&client_for(&server), &mut page, 2).await;
        assert_eq!(outcome, ListOutcome::Failed);

        let list = page.container(containers::MATERIAL_LIST).unwrap();
        assert_eq!(list.len(), 4);
        assert!(list.nodes().last().unwrap().is_error());
        let after = list.inner_html();
        assert!(after.starts_with(&before));
        assert!(after[before.len()..].starts_with(
            r#"<p class="error">Failed to fetch the material list: HTTP error! status: 500"#
        ));
    }

    #[tokio::test]
    async fn test_failure_without_container_reports_in_result() {
        let mut server = Server::new_async().await;
        let _fail = server
            .mock("GET", "/materials")
            .with_status(503)
            .create_async()
            .await;
        let mut page = Page::new();

        let outcome = refresh_material_list(&client_for(&server), &mut page, 1).await;
        assert_eq!(outcome, ListOutcome::Failed);
        assert_eq!(page.container(containers::RESULT).unwrap().errors().count(), 1);
    }

    #[tokio::test]
    async fn test_success_without_container_is_noop() {
        let mut server = Server::new_async().await;
        let _mocks = mock_material_list(&mut server).await;
        let mut page = Page::with_containers(&[containers::APPROVAL_LIST]);

        let outcome = refresh_material_list(&client_for(&server), &mut page, 1).await;
        assert_eq!(outcome, ListOutcome::NoContainer);
        assert!(page.container(containers::RESULT).is_none());
        assert!(page.container(containers::APPROVAL_LIST).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_clears_container() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/materials")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let mut page = Page::standard();
        page.ensure(containers::MATERIAL_LIST)
            .append(Node::placeholder("stale"));

        let outcome = refresh_material_list(&client_for(&server), &mut page, 1).await;
        assert_eq!(outcome, ListOutcome::Rendered(0));
        assert!(page.container(containers::MATERIAL_LIST).unwrap().is_empty());
    }

    /// Previews finish in reverse order; the first item is the slowest.
    struct SlowPreviews {
        count: usize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl MaterialsApi for SlowPreviews {
        async fn list_materials(&self) -> FetchResult<Vec<Material>> {
            Ok((0..self.count)
                .map(|i| {
                    serde_json::from_value(serde_json::json!({"id": i, "name": format!("m{i}")}))
                        .unwrap()
                })
                .collect())
        }

        async fn fetch_material_text(&self, id: &MaterialId) -> FetchResult<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let index: u64 = id.as_str().parse().unwrap();
            tokio::time::sleep(Duration::from_millis(5 * (self.count as u64 - index))).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(format!("preview {}", id))
        }

        async fn fetch_material_content(
            &self,
            _id: &MaterialId,
            _kind: MaterialKind,
        ) -> FetchResult<MaterialContent> {
            Err(FetchError::Decode("unused".into()))
        }

        fn material_content_url(&self, id: &MaterialId, kind: MaterialKind) -> String {
            format!("mem://{}/{}", id, kind)
        }

        async fn upload_material(&self, _material: NewMaterial) -> FetchResult<()> {
            Ok(())
        }

        async fn list_uploads(&self) -> FetchResult<Vec<UploadRecord>> {
            Ok(Vec::new())
        }

        async fn submit_evidence(
            &self,
            _submission: EvidenceSubmission,
        ) -> FetchResult<EvidenceReceipt> {
            Err(FetchError::Decode("unused".into()))
        }

        async fn server_status(&self) -> FetchResult<ServerStatus> {
            Err(FetchError::Decode("unused".into()))
        }
    }

    #[tokio::test]
    async fn test_concurrent_previews_preserve_order() {
        let api = SlowPreviews {
            count: 8,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        };
        let mut page = Page::standard();

        let outcome = refresh_material_list(&api, &mut page, 4).await;
        assert_eq!(outcome, ListOutcome::Rendered(8));

        let previews: Vec<String> = page
            .container(containers::MATERIAL_LIST)
            .unwrap()
            .nodes()
            .iter()
            .filter_map(|n| match n {
                Node::MaterialCard(card) => Some(card.preview.clone()),
                _ => None,
            })
            .collect();
        let expected: Vec<String> = (0..8).map(|i| format!("preview {i}")).collect();
        assert_eq!(previews, expected);
        assert!(api.max_in_flight.load(Ordering::SeqCst) <= 4);
        assert!(api.max_in_flight.load(Ordering::SeqCst) > 1);
    }
}
