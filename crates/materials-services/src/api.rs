//! Service seam between the flows and the HTTP client

use async_trait::async_trait;
use materials_api_client::{ApiClient, EvidenceSubmission, FetchResult, NewMaterial};
use materials_core::models::{
    EvidenceReceipt, Material, MaterialContent, MaterialId, MaterialKind, ServerStatus,
    UploadRecord,
};

/// Operations the flows need from the materials service.
///
/// `ApiClient` is the production implementation; tests may substitute an
/// in-memory one.
#[async_trait]
pub trait MaterialsApi: Send + Sync {
    async fn list_materials(&self) -> FetchResult<Vec<Material>>;

    async fn fetch_material_text(&self, id: &MaterialId) -> FetchResult<String>;

    async fn fetch_material_content(
        &self,
        id: &MaterialId,
        kind: MaterialKind,
    ) -> FetchResult<MaterialContent>;

    /// URL the image representation is served from.
    fn material_content_url(&self, id: &MaterialId, kind: MaterialKind) -> String;

    async fn upload_material(&self, material: NewMaterial) -> FetchResult<()>;

    async fn list_uploads(&self) -> FetchResult<Vec<UploadRecord>>;

    async fn submit_evidence(&self, submission: EvidenceSubmission)
        -> FetchResult<EvidenceReceipt>;

    async fn server_status(&self) -> FetchResult<ServerStatus>;
}

#[async_trait]
impl MaterialsApi for ApiClient {
    async fn list_materials(&self) -> FetchResult<Vec<Material>> {
        ApiClient::list_materials(self).await
    }

    async fn fetch_material_text(&self, id: &MaterialId) -> FetchResult<String> {
        ApiClient::fetch_material_text(self, id).await
    }

    async fn fetch_material_content(
        &self,
        id: &MaterialId,
        kind: MaterialKind,
    ) -> FetchResult<MaterialContent> {
        ApiClient::fetch_material_content(self, id, kind).await
    }

    fn material_content_url(&self, id: &MaterialId, kind: MaterialKind) -> String {
        ApiClient::material_content_url(self, id, kind)
    }

    async fn upload_material(&self, material: NewMaterial) -> FetchResult<()> {
        ApiClient::upload_material(self, material).await
    }

    async fn list_uploads(&self) -> FetchResult<Vec<UploadRecord>> {
        ApiClient::list_uploads(self).await
    }

    async fn submit_evidence(
        &self,
        submission: EvidenceSubmission,
    ) -> FetchResult<EvidenceReceipt> {
        ApiClient::submit_evidence(self, submission).await
    }

    async fn server_status(&self) -> FetchResult<ServerStatus> {
        ApiClient::server_status(self).await
    }
}
