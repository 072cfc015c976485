//! Client error types.

/// Errors that can occur when using the record store client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The record store did not serve the request.
    ///
    /// Covers transport failures, timeouts, non-success statuses and malformed
    /// payloads alike; the reason is for logging only.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Unavailable("request timed out".to_string())
        } else if err.is_decode() {
            Self::Unavailable(format!("malformed payload: {err}"))
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unavailable(format!("malformed payload: {err}"))
    }
}
