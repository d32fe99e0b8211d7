//! Domain methods for the materials API client.
//!
//! Response types come from `materials_core::models`; the request payloads
//! for uploads are defined here.

use crate::{ApiClient, FetchError, FetchResult};
use bytes::Bytes;
use materials_core::models::{
    EvidenceReceipt, Material, MaterialContent, MaterialId, MaterialKind, ServerStatus,
    UploadRecord,
};
use reqwest::multipart::{Form, Part};

/// A new material to create with `POST /materials`.
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub kind: MaterialKind,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl NewMaterial {
    fn into_form(self) -> FetchResult<Form> {
        let mut part = Part::bytes(self.data.to_vec()).file_name(self.file_name);
        if let Some(content_type) = self.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(FetchError::Client)?;
        }
        Ok(Form::new()
            .part("file", part)
            .text("type", self.kind.as_str()))
    }
}

/// Evidence for a material, submitted with `POST /uploads`.
#[derive(Debug, Clone)]
pub struct EvidenceSubmission {
    pub material_id: MaterialId,
    pub url: String,
    pub comment: String,
    pub screenshot_name: String,
    pub screenshot_content_type: String,
    pub screenshot: Bytes,
}

impl EvidenceSubmission {
    fn into_form(self) -> FetchResult<Form> {
        let screenshot = Part::bytes(self.screenshot.to_vec())
            .file_name(self.screenshot_name)
            .mime_str(&self.screenshot_content_type)
            .map_err(FetchError::Client)?;
        Ok(Form::new()
            .part("screenshot", screenshot)
            .text("url", self.url)
            .text("comment", self.comment)
            .text("material_id", self.material_id.to_string()))
    }
}

/// Path of one material. Ids are opaque, so reserved characters are escaped.
fn material_path(id: &MaterialId) -> String {
    format!("/materials/{}", urlencoding::encode(id.as_str()))
}

/// Path of a QR code. Upload records carry either a bare file name or the
/// full `/qr/{name}` path, so only the last segment is kept.
fn qr_path(file_name: &str) -> String {
    let name = file_name
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(file_name);
    format!("/qr/{}", urlencoding::encode(name))
}

impl ApiClient {
    /// List all materials in server order.
    pub async fn list_materials(&self) -> FetchResult<Vec<Material>> {
        self.get("/materials", &[]).await
    }

    /// URL of a material's content, as used for image previews.
    pub fn material_content_url(&self, id: &MaterialId, kind: MaterialKind) -> String {
        self.build_url(&format!("{}?type={}", material_path(id), kind.as_str()))
    }

    /// Raw bytes of a material. Without `kind` the server picks the
    /// representation from the stored type.
    pub async fn fetch_material_bytes(
        &self,
        id: &MaterialId,
        kind: Option<MaterialKind>,
    ) -> FetchResult<Bytes> {
        let path = material_path(id);
        match kind {
            Some(kind) => self.get_bytes(&path, &[("type", kind.as_str())]).await,
            None => self.get_bytes(&path, &[]).await,
        }
    }

    /// Fetch a material and interpret it as `kind`.
    pub async fn fetch_material_content(
        &self,
        id: &MaterialId,
        kind: MaterialKind,
    ) -> FetchResult<MaterialContent> {
        let data = self.fetch_material_bytes(id, Some(kind)).await?;
        MaterialContent::from_bytes(kind, data).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Text representation of a material.
    pub async fn fetch_material_text(&self, id: &MaterialId) -> FetchResult<String> {
        let data = self
            .fetch_material_bytes(id, Some(MaterialKind::Text))
            .await?;
        String::from_utf8(data.to_vec())
            .map_err(|e| FetchError::Decode(format!("Text content is not valid UTF-8: {}", e)))
    }

    /// Create a material. The response body is not used.
    pub async fn upload_material(&self, material: NewMaterial) -> FetchResult<()> {
        tracing::info!(
            kind = %material.kind,
            file_name = %material.file_name,
            size = material.data.len(),
            "Uploading material"
        );
        let form = material.into_form()?;
        self.post_multipart_discard("/materials", form).await
    }

    /// List all upload/review records in server order.
    pub async fn list_uploads(&self) -> FetchResult<Vec<UploadRecord>> {
        self.get("/uploads", &[]).await
    }

    /// Submit evidence for a material. New records start out pending.
    pub async fn submit_evidence(
        &self,
        submission: EvidenceSubmission,
    ) -> FetchResult<EvidenceReceipt> {
        tracing::info!(material_id = %submission.material_id, "Submitting evidence");
        let form = submission.into_form()?;
        self.post_multipart("/uploads", form).await
    }

    /// Server status summary.
    pub async fn server_status(&self) -> FetchResult<ServerStatus> {
        self.get("/status", &[]).await
    }

    /// PNG bytes of a reward QR code.
    pub async fn fetch_qr(&self, file_name: &str) -> FetchResult<Bytes> {
        self.get_bytes(&qr_path(file_name), &[]).await
    }
}
