use kalvi_core::editor::EditorError;
use serde_json::Value;

use crate::token::TokenStoreError;

/// Errors returned by [`ApiClient`](crate::ApiClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered 401. The stored token has been cleared.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx answer.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Exercise drafts were rejected locally before sending.
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

impl ClientError {
    /// HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Best-effort human message from an error body: the `error` field, then
/// `message`, then the raw text. Empty bodies fall back to `fallback`.
pub fn extract_message(body: &str, fallback: &str) -> String {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = obj.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_error_field() {
        let body = r#"{"error": "Level with id 4 not found", "message": "other", "code": "NOT_FOUND"}"#;
        assert_eq!(extract_message(body, "x"), "Level with id 4 not found");
    }

    #[test]
    fn test_falls_back_to_message_then_text() {
        assert_eq!(extract_message(r#"{"message": "Bad gateway"}"#, "x"), "Bad gateway");
        assert_eq!(extract_message("upstream timed out\n", "x"), "upstream timed out");
        assert_eq!(extract_message(r#"{"code": 1}"#, "x"), r#"{"code": 1}"#);
    }

    #[test]
    fn test_empty_body_uses_fallback() {
        assert_eq!(extract_message("  ", "Service Unavailable"), "Service Unavailable");
    }
}
