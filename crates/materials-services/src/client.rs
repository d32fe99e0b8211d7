//! One materials session: configuration, page, editor and API together

use materials_api_client::{ApiClient, EvidenceSubmission, FetchResult};
use materials_core::models::{MaterialId, MaterialKind};
use materials_core::ClientConfig;
use materials_processing::{Editor, EditorError, EditorOptions, ExportArtifact};
use std::path::PathBuf;

use crate::api::MaterialsApi;
use crate::approval::{refresh_approvals, ApprovalOutcome};
use crate::edit::{close_editor, open_editor, render_editor, EditOutcome};
use crate::list::{refresh_material_list, ListOutcome};
use crate::status::{refresh_status, StatusOutcome};
use crate::upload::{self, EvidenceOutcome, SelectedFile, UploadOutcome};
use crate::view::Page;

/// Owns everything a binding layer needs to drive the flows.
pub struct MaterialsClient<A = ApiClient> {
    api: A,
    config: ClientConfig,
    page: Page,
    editor: Editor,
}

impl MaterialsClient<ApiClient> {
    /// Build an HTTP-backed client with the standard page layout.
    pub fn from_config(config: ClientConfig) -> FetchResult<Self> {
        let api = ApiClient::from_config(&config)?;
        Ok(Self::with_api(api, config))
    }
}

impl<A: MaterialsApi> MaterialsClient<A> {
    pub fn with_api(api: A, config: ClientConfig) -> Self {
        let editor = Editor::new(EditorOptions::from(&config));
        Self {
            api,
            config,
            page: Page::standard(),
            editor,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub async fn refresh_materials(&mut self) -> ListOutcome {
        refresh_material_list(&self.api, &mut self.page, self.config.preview_concurrency).await
    }

    pub async fn refresh_approvals(&mut self) -> ApprovalOutcome {
        refresh_approvals(&self.api, &mut self.page).await
    }

    pub async fn refresh_status(&mut self) -> StatusOutcome {
        refresh_status(&self.api, &mut self.page).await
    }

    pub async fn open(&mut self, id: &MaterialId, kind: MaterialKind) -> EditOutcome {
        open_editor(&self.api, &mut self.editor, &mut self.page, id, kind).await
    }

    pub fn back(&mut self) {
        close_editor(&mut self.editor, &mut self.page);
    }

    pub fn stamp_overlay(&mut self, text: &str) -> Result<(), EditorError> {
        self.editor.stamp_overlay(text)?;
        render_editor(&self.editor, &mut self.page);
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        self.editor.set_text(text)?;
        render_editor(&self.editor, &mut self.page);
        Ok(())
    }

    pub fn export(&self) -> Result<ExportArtifact, EditorError> {
        self.editor.export()
    }

    /// Export the open session into the configured download directory.
    pub fn download(&self) -> Result<PathBuf, EditorError> {
        self.editor.export()?.save_to(&self.config.download_dir)
    }

    pub async fn upload_image(&mut self, file: Option<SelectedFile>) -> UploadOutcome {
        upload::upload_image(
            &self.api,
            &mut self.page,
            file,
            self.config.preview_concurrency,
        )
        .await
    }

    pub async fn upload_text(&mut self, text: &str) -> UploadOutcome {
        upload::upload_text(&self.api, &mut self.page, text, self.config.preview_concurrency).await
    }

    pub async fn submit_evidence(&mut self, submission: EvidenceSubmission) -> EvidenceOutcome {
        upload::submit_evidence(&self.api, &mut self.page, submission).await
    }
}
