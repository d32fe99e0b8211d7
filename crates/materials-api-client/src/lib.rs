//! HTTP client for the materials service.
//!
//! Provides a minimal client with generic GET / multipart POST helpers and
//! domain methods (list, content fetch, upload, review list, status).
//! The flows in `materials-services` and the CLI use this client directly.

pub mod api;

use bytes::Bytes;
use materials_core::{ClientConfig, ErrorMetadata, LogLevel};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Failure of a single request to the materials service
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status of a non-2xx response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorMetadata for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "CLIENT_ERROR",
            FetchError::Network(_) => "NETWORK_ERROR",
            FetchError::HttpStatus { .. } => "HTTP_STATUS",
            FetchError::Decode(_) => "DECODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::HttpStatus { status, .. } => status.is_server_error(),
            FetchError::Client(_) | FetchError::Decode(_) => false,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        match self {
            FetchError::HttpStatus { status, .. } if status.is_client_error() => LogLevel::Debug,
            FetchError::Network(_) | FetchError::HttpStatus { .. } => LogLevel::Warn,
            FetchError::Client(_) | FetchError::Decode(_) => LogLevel::Error,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// HTTP client for the materials service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> FetchResult<Self> {
        Self::new(
            &config.server_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into `FetchError::HttpStatus`.
    async fn ensure_success(response: Response) -> FetchResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(FetchError::HttpStatus { status, body })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> FetchResult<T> {
        let bytes = response.bytes().await.map_err(FetchError::Network)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Decode(format!("Failed to parse response as JSON: {}", e)))
    }

    /// GET request with optional query parameters, returning the raw response.
    async fn get_response(&self, path: &str, query: &[(&str, &str)]) -> FetchResult<Response> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        tracing::debug!(url = %url, "GET");
        let response = request.send().await.map_err(FetchError::Network)?;
        Self::ensure_success(response).await
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> FetchResult<T> {
        let response = self.get_response(path, query).await?;
        Self::read_json(response).await
    }

    /// GET request. Returns the raw body.
    pub async fn get_bytes(&self, path: &str, query: &[(&str, &str)]) -> FetchResult<Bytes> {
        let response = self.get_response(path, query).await?;
        response.bytes().await.map_err(FetchError::Network)
    }

    async fn send_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> FetchResult<Response> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "POST multipart");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(FetchError::Network)?;
        Self::ensure_success(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> FetchResult<T> {
        let response = self.send_multipart(path, form).await?;
        Self::read_json(response).await
    }

    /// POST multipart form, ignoring the response body.
    pub async fn post_multipart_discard(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> FetchResult<()> {
        self.send_multipart(path, form).await?;
        Ok(())
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

// Re-export domain types for convenience.
pub use api::{EvidenceSubmission, NewMaterial};
pub use materials_core::models::{
    EvidenceReceipt, Material, MaterialContent, MaterialId, MaterialKind, ServerStatus,
    UploadRecord,
};
