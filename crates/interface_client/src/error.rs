//! Client error types

use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`crate::ClaimsApi`] calls
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status
    #[error("API request failed with status {status}")]
    Api { status: u16, body: Option<Value> },

    /// The request never got an answer
    #[error("Network error: {0}")]
    Network(String),

    /// The answer could not be read as the expected type
    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message to show a user
    ///
    /// Prefers the first server issue message, then the server's `message`,
    /// then its `error` code, then `"<fallback> (<status>)"`. Failures
    /// without a response fall back to `fallback` alone.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { status, body } => body
                .as_ref()
                .and_then(server_message)
                .unwrap_or_else(|| format!("{} ({})", fallback, status)),
            ClientError::Network(_) | ClientError::Decode(_) => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn server_message(body: &Value) -> Option<String> {
    let text = |v: &Value| v.as_str().filter(|s| !s.is_empty()).map(str::to_string);

    body.get("issues")
        .and_then(|issues| issues.get(0))
        .and_then(|issue| issue.get("message"))
        .and_then(text)
        .or_else(|| body.get("message").and_then(text))
        .or_else(|| body.get("error").and_then(text))
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
