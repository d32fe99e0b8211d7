//! Error metadata
//!
//! Each crate owns its error enum (`FetchError` in the API client,
//! `EditorError` in processing). They all describe themselves through
//! [`ErrorMetadata`] so the flows can log at the right level and put a
//! readable message in front of the user without matching on foreign types.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected conditions like a missing preview
    Debug,
    /// Warning level - for recoverable issues like a server-side failure
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Self-description of an error for logging and inline display.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "HTTP_STATUS")
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same action may succeed
    fn is_recoverable(&self) -> bool;

    /// Message shown inline to the user
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Emit a tracing event for `err` at the level its metadata asks for.
pub fn log_error<E>(context: &str, err: &E)
where
    E: ErrorMetadata + std::fmt::Display,
{
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code, "{}", context),
        LogLevel::Warn => tracing::warn!(error = %err, code, "{}", context),
        LogLevel::Error => tracing::error!(error = %err, code, "{}", context),
    }
}
