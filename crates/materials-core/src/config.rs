//! Configuration module
//!
//! The client is configured once at construction; nothing reads the
//! environment after `ClientConfig` has been built.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_PREVIEW_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_URL,
};

/// Client configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the materials service (scheme, host and port)
    pub server_url: String,
    pub request_timeout_secs: u64,
    /// Number of text previews fetched concurrently during a list refresh
    pub preview_concurrency: usize,
    /// JPEG quality used when exporting an edited image (1-100)
    pub jpeg_quality: u8,
    /// Font used for the image text overlay. Falls back to common system fonts.
    pub overlay_font: Option<PathBuf>,
    /// Directory exported artifacts are written to
    pub download_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            preview_concurrency: DEFAULT_PREVIEW_CONCURRENCY,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            overlay_font: None,
            download_dir: PathBuf::from("."),
        }
    }

    /// Replace the base URL, dropping any trailing slash.
    pub fn set_server_url(&mut self, server_url: impl Into<String>) {
        self.server_url = server_url.into().trim_end_matches('/').to_string();
    }

    /// Load from the process environment (after reading `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("MATERIALS_SERVER_URL")
            .or_else(|| lookup("SERVER_URL"))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let mut config = Self::new(server_url);

        if let Some(raw) = lookup("MATERIALS_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("MATERIALS_REQUEST_TIMEOUT_SECS must be a number, got '{}'", raw)
            })?;
        }

        if let Some(raw) = lookup("MATERIALS_PREVIEW_CONCURRENCY") {
            config.preview_concurrency = raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("MATERIALS_PREVIEW_CONCURRENCY must be a number, got '{}'", raw)
            })?;
        }

        if let Some(raw) = lookup("MATERIALS_JPEG_QUALITY") {
            config.jpeg_quality = raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("MATERIALS_JPEG_QUALITY must be 1-100, got '{}'", raw)
            })?;
        }

        config.overlay_font = lookup("MATERIALS_OVERLAY_FONT")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        if let Some(dir) = lookup("MATERIALS_DOWNLOAD_DIR").filter(|s| !s.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Server URL must start with http:// or https://, got '{}'",
                self.server_url
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Request timeout must be at least 1 second"));
        }
        if self.preview_concurrency == 0 {
            return Err(anyhow::anyhow!("Preview concurrency must be at least 1"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }
}
