// ================================================================
// File: streambell-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted channel list is unreadable or unparsable.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A streaming-platform call failed; the current polling pass is
    /// abandoned and the next one runs independently.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Token validation or refresh failed, or the platform rejected the
    /// current token. Never fatal; the stale token is kept.
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}
