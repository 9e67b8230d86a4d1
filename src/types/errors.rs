use serde::Deserialize;
use thiserror::Error;

/// Normalized failure of a remote operation.
///
/// Produced only at the transport boundary; stores never see raw
/// `reqwest` errors. `Backend` carries the text the server put into its
/// `{ "error": … }` envelope, everything else falls back to an
/// operation-specific default message via [`ApiError::user_message`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or timeout; no usable response arrived.
    #[error("Network error: {0}")]
    Network(String),
    /// Error text reported by the backend itself.
    #[error("{0}")]
    Backend(String),
    /// Non-success response without a parsable error body.
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The backend's uniform error envelope.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

impl ApiError {
    /// Displayable message for the store's `error` field: the backend's
    /// own text when it sent one, otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Classify a non-success response from its status and body text.
    pub fn from_status_body(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.error.is_empty() => ApiError::Backend(parsed.error),
            _ => ApiError::Unexpected(format!("HTTP {status}")),
        }
    }

    /// Consume a non-success response, reading its body for the envelope.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::from_status_body(status, &body)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Unexpected(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
