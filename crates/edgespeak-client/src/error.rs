//! Internal error types for TTS server calls.
//!
//! These errors are internal to `edgespeak-client` and are mapped to
//! [`BackendError`] at the port boundary.

use edgespeak_core::BackendError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("Request to {url} failed with status {status}: {message}")]
    ApiRequestFailed {
        status: u16,
        /// Server-provided message, or the status reason.
        message: String,
        url: String,
    },

    /// The endpoint or resource does not exist.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// The server answered with something unexpected.
    #[error("Invalid response from TTS server: {message}")]
    InvalidResponse { message: String },

    /// The configured base URL cannot carry API paths.
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ApiRequestFailed {
                status, message, ..
            } => Self::Rejected { status, message },
            ClientError::NotFound { url } => Self::NotFound(url),
            ClientError::Network(e) if e.is_decode() => Self::InvalidResponse(e.to_string()),
            ClientError::Network(e) => Self::Network(e.to_string()),
            ClientError::InvalidResponse { message } => Self::InvalidResponse(message),
            ClientError::JsonParse(e) => Self::InvalidResponse(e.to_string()),
            e @ (ClientError::InvalidBaseUrl(_) | ClientError::InvalidUrl(_)) => {
                Self::Network(e.to_string())
            }
        }
    }
}

/// Pull the message out of a `{"error": "..."}` body.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parsing() {
        assert_eq!(
            error_message_from_body(r#"{"error": "Text too long (max 10,000 characters)"}"#)
                .as_deref(),
            Some("Text too long (max 10,000 characters)")
        );
        assert_eq!(error_message_from_body("<html>Bad Gateway</html>"), None);
        assert_eq!(error_message_from_body(r#"{"error": ""}"#), None);
        assert_eq!(error_message_from_body(r#"{"detail": "x"}"#), None);
    }

    #[test]
    fn test_rejection_maps_to_backend_error() {
        let err = ClientError::ApiRequestFailed {
            status: 400,
            message: "No text provided".to_string(),
            url: "http://localhost/api/synthesize".to_string(),
        };
        match BackendError::from(err) {
            BackendError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No text provided");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_not_found_maps_to_backend_error() {
        let err = ClientError::NotFound {
            url: "http://localhost/api/audio/x".to_string(),
        };
        assert!(matches!(BackendError::from(err), BackendError::NotFound(_)));
    }
}
