//! Upload flows: new materials and evidence submissions

use bytes::Bytes;
use materials_api_client::{EvidenceSubmission, NewMaterial};
use materials_core::constants::{containers, messages, CONTENT_TYPE_TEXT, UPLOADED_TEXT_FILENAME};
use materials_core::error::log_error;
use materials_core::models::{EvidenceReceipt, MaterialKind};
use std::path::Path;

use crate::api::MaterialsApi;
use crate::approval::refresh_approvals;
use crate::list::refresh_material_list;
use crate::view::Page;

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = content_type_for(&file_name);
        Ok(Self::new(file_name, content_type, Bytes::from(data)))
    }
}

/// Content type for a file name, by extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Nothing to upload; no request was made
    Skipped,
    Uploaded,
    /// The upload failed; carries the message shown to the user
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidenceOutcome {
    Submitted(EvidenceReceipt),
    Failed(String),
}

/// Upload `file` as a new image material, then refresh the material list.
/// Without a file this is a no-op.
pub async fn upload_image<A>(
    api: &A,
    page: &mut Page,
    file: Option<SelectedFile>,
    concurrency: usize,
) -> UploadOutcome
where
    A: MaterialsApi + ?Sized,
{
    let Some(file) = file else {
        tracing::debug!("No file selected, skipping image upload");
        return UploadOutcome::Skipped;
    };

    let material = NewMaterial {
        kind: MaterialKind::Image,
        file_name: file.file_name,
        content_type: Some(file.content_type),
        data: file.data,
    };
    upload(api, page, material, concurrency).await
}

/// Upload `text` as a new text material named `text.txt`, then refresh the
/// material list. Empty text is a no-op.
pub async fn upload_text<A>(
    api: &A,
    page: &mut Page,
    text: &str,
    concurrency: usize,
) -> UploadOutcome
where
    A: MaterialsApi + ?Sized,
{
    if text.is_empty() {
        tracing::debug!("Empty text, skipping text upload");
        return UploadOutcome::Skipped;
    }

    let material = NewMaterial {
        kind: MaterialKind::Text,
        file_name: UPLOADED_TEXT_FILENAME.to_string(),
        content_type: Some(CONTENT_TYPE_TEXT.to_string()),
        data: Bytes::copy_from_slice(text.as_bytes()),
    };
    upload(api, page, material, concurrency).await
}

async fn upload<A>(
    api: &A,
    page: &mut Page,
    material: NewMaterial,
    concurrency: usize,
) -> UploadOutcome
where
    A: MaterialsApi + ?Sized,
{
    let kind = material.kind;
    let size = material.data.len();
    match api.upload_material(material).await {
        Ok(()) => {
            tracing::info!(kind = %kind, size, "Uploaded material");
            refresh_material_list(api, page, concurrency).await;
            UploadOutcome::Uploaded
        }
        Err(e) => {
            tracing::error!(kind = %kind, error = %e, "Error uploading material");
            let message = format!("{}: {}", messages::UPLOAD_FAILED, e);
            page.show_error(containers::RESULT, message.clone());
            UploadOutcome::Failed(message)
        }
    }
}

/// Submit evidence for a material, then refresh the approval list.
pub async fn submit_evidence<A>(
    api: &A,
    page: &mut Page,
    submission: EvidenceSubmission,
) -> EvidenceOutcome
where
    A: MaterialsApi + ?Sized,
{
    let material_id = submission.material_id.clone();
    match api.submit_evidence(submission).await {
        Ok(receipt) => {
            tracing::info!(
                material_id = %material_id,
                evidence_id = %receipt.evidence_id,
                "Evidence submitted"
            );
            refresh_approvals(api, page).await;
            EvidenceOutcome::Submitted(receipt)
        }
        Err(e) => {
            log_error("Error submitting evidence", &e);
            let message = format!("{}: {}", messages::EVIDENCE_FAILED, e);
            page.show_error(containers::RESULT, message.clone());
            EvidenceOutcome::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_for, mock_material_list, png_bytes};
    use materials_core::models::MaterialId;
    use mockito::{Matcher, Server};
    use std::io::Write;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("shot.png"), "image/png");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("archive"), "application/octet-stream");
    }

    #[test]
    fn test_selected_file_read() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&png_bytes(2, 2)).unwrap();

        let selected = SelectedFile::read(file.path()).unwrap();
        assert_eq!(selected.content_type, "image/png");
        assert!(selected.file_name.ends_with(".png"));
        assert_eq!(selected.data, png_bytes(2, 2));
    }

    #[tokio::test]
    async fn test_no_file_sends_nothing() {
        let mut server = Server::new_async().await;
        let upload = server
            .mock("POST", "/materials")
            .expect(0)
            .create_async()
            .await;
        let mut page = Page::standard();

        let outcome = upload_image(&client_for(&server), &mut page, None, 1).await;
        assert_eq!(outcome, UploadOutcome::Skipped);
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_text_sends_nothing() {
        let mut server = Server::new_async().await;
        let upload = server
            .mock("POST", "/materials")
            .expect(0)
            .create_async()
            .await;
        let mut page = Page::standard();

        let outcome = upload_text(&client_for(&server), &mut page, "", 1).await;
        assert_eq!(outcome, UploadOutcome::Skipped);
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn test_image_upload_refreshes_list() {
        let mut server = Server::new_async().await;
        let upload = server
            .mock("POST", "/materials")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="tea.png""#.into()),
                Matcher::Regex(r#"name="type"\s+image"#.into()),
            ]))
            .with_status(201)
            .with_body(r#"{"message": "Upload successful"}"#)
            .create_async()
            .await;
        let _list = mock_material_list(&mut server).await;
        let mut page = Page::standard();

        let file = SelectedFile::new("tea.png", "image/png", png_bytes(3, 3));
        let outcome = upload_image(&client_for(&server), &mut page, Some(file), 2).await;
        assert_eq!(outcome, UploadOutcome::Uploaded);
        upload.assert_async().await;
        assert_eq!(page.container(containers::MATERIAL_LIST).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_text_upload_is_named_text_txt() {
        let mut server = Server::new_async().await;
        let upload = server
            .mock("POST", "/materials")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"filename="text.txt""#.into()),
                Matcher::Regex(r#"name="type"\s+text"#.into()),
                Matcher::Regex("Closed on Mondays".into()),
            ]))
            .with_status(201)
            .create_async()
            .await;
        let _list = mock_material_list(&mut server).await;
        let mut page = Page::standard();

        let outcome = upload_text(&client_for(&server), &mut page, "Closed on Mondays", 1).await;
        assert_eq!(outcome, UploadOutcome::Uploaded);
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_failure_is_reported_without_refresh() {
        let mut server = Server::new_async().await;
        let _upload = server
            .mock("POST", "/materials")
            .with_status(400)
            .with_body(r#"{"error": "No file uploaded"}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/materials")
            .expect(0)
            .create_async()
            .await;
        let mut page = Page::standard();

        let outcome = upload_text(&client_for(&server), &mut page, "hello", 1).await;
        match outcome {
            UploadOutcome::Failed(message) => {
                assert!(message.starts_with("Upload failed: HTTP error! status: 400"))
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        list.assert_async().await;
        assert_eq!(page.container(containers::RESULT).unwrap().errors().count(), 1);
    }

    #[tokio::test]
    async fn test_submit_evidence_refreshes_approvals() {
        let mut server = Server::new_async().await;
        let submit = server
            .mock("POST", "/uploads")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="screenshot"; filename="shot.png""#.into()),
                Matcher::Regex(r#"name="url"\s+https://shop.example/p/1"#.into()),
                Matcher::Regex(r#"name="material_id"\s+7"#.into()),
            ]))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message": "Evidence submitted successfully", "evidence_id": "7_20240501"}"#,
            )
            .create_async()
            .await;
        let _uploads = server
            .mock("GET", "/uploads")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let mut page = Page::standard();

        let submission = EvidenceSubmission {
            material_id: MaterialId::from(7),
            url: "https://shop.example/p/1".into(),
            comment: "on the shelf".into(),
            screenshot_name: "shot.png".into(),
            screenshot_content_type: "image/png".into(),
            screenshot: png_bytes(4, 4),
        };
        let outcome = submit_evidence(&client_for(&server), &mut page, submission).await;
        match outcome {
            EvidenceOutcome::Submitted(receipt) => assert_eq!(receipt.evidence_id, "7_20240501"),
            other => panic!("unexpected outcome {other:?}"),
        }
        submit.assert_async().await;
        assert_eq!(
            page.container(containers::APPROVAL_LIST).unwrap().inner_html(),
            "<p>No uploads yet.</p>"
        );
    }
}
