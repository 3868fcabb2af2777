// crates/api/src/error.rs
//! Error taxonomy for the remote media-monitoring API.
//!
//! Three classes cover everything the API can do to us:
//! - [`ApiError::Network`] — the request could not be sent or received
//! - [`ApiError::Server`] — the server answered with a non-2xx status
//! - [`ApiError::Malformed`] — the payload did not have the expected shape
//!
//! Polling callers treat all three as non-fatal warnings and retry on the
//! next tick; one-shot callers surface them to the user and keep their input
//! intact for retry.

use thiserror::Error;

/// Errors produced by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, aborted body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server rejected the request with a non-2xx status.
    /// `detail` carries the `{"detail": ...}` body field when present.
    #[error("server error {status}: {detail}")]
    Server { status: u16, detail: String },

    /// The response decoded as JSON but lacked the expected fields.
    #[error("malformed response: {context}")]
    Malformed { context: String },
}

impl ApiError {
    /// Build a [`ApiError::Server`] from a status code and raw body text.
    ///
    /// FastAPI error bodies are `{"detail": <string or object>}`; anything
    /// else is passed through verbatim (truncated) so the user still sees
    /// what the server said.
    pub fn server(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| {
                let text = body.trim();
                if text.is_empty() {
                    return "(empty body)".to_string();
                }
                // Char-based: byte truncation can split a multibyte char.
                text.chars().take(200).collect()
            });
        ApiError::Server { status, detail }
    }

    /// True when a retry on the next poll tick is reasonable.
    ///
    /// Everything is retryable for a poller; this exists so one-shot callers
    /// can distinguish "the server said no" from "the wire ate it".
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Result alias used throughout the client.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_extracts_fastapi_detail() {
        let err = ApiError::server(404, r#"{"detail": "Source ID not found"}"#);
        match err {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Source ID not found");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn server_error_keeps_non_json_body() {
        let err = ApiError::server(502, "Bad Gateway");
        assert_eq!(err.to_string(), "server error 502: Bad Gateway");
    }

    #[test]
    fn server_error_empty_body() {
        let err = ApiError::server(500, "   ");
        assert_eq!(err.to_string(), "server error 500: (empty body)");
    }

    #[test]
    fn server_error_truncates_multibyte_body_on_char_boundary() {
        // Proxy error pages are not JSON and not ASCII; truncation must not
        // split a multibyte character.
        let body = "€".repeat(300);
        let err = ApiError::server(502, &body);
        match err {
            ApiError::Server { detail, .. } => {
                assert_eq!(detail.chars().count(), 200);
                assert_eq!(detail, "€".repeat(200));
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn server_error_object_detail_is_stringified() {
        let err = ApiError::server(422, r#"{"detail": [{"loc": ["body"]}]}"#);
        match err {
            ApiError::Server { detail, .. } => assert!(detail.contains("loc")),
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn malformed_is_not_transient() {
        let err = ApiError::Malformed {
            context: "progress payload".into(),
        };
        assert!(!err.is_transient());
    }
}
