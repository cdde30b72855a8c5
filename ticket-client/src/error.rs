//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 404 from a lookup-by-key endpoint
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400, the server rejected the request parameters or payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-2xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Body could not be read or was not the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local I/O error (download sinks)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Map a non-2xx status and its body to an error.
    ///
    /// The order service answers failures with an error document
    /// (`{"status", "error", "message", ...}`) or an empty body; the most
    /// specific human-readable text available is kept.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            message: Option<String>,
            #[serde(default)]
            error: Option<String>,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.filter(|m| !m.is_empty()).or(b.error))
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
        let message = if message.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            message
        };

        match status {
            404 => ClientError::NotFound(message),
            400 => ClientError::Validation(message),
            _ => ClientError::Server { status, message },
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
