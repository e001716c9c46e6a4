//! Error types for the crumb-link client.
//!
//! Every failure surfaced by the client maps onto one [`CrumbLinkError`]
//! variant so calling code can branch on the kind of failure (and, for
//! server errors, on the HTTP status) without string matching.

use serde_json::Value;

/// Result type for crumb-link operations.
pub type Result<T> = std::result::Result<T, CrumbLinkError>;

/// The error payload returned by the server alongside a non-2xx status.
///
/// The CrumbCompass backend normally answers errors with a JSON body; when
/// the body is not valid JSON the raw response text is kept instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// Parsed JSON error body.
    Json(Value),
    /// Raw response text (body was not valid JSON).
    Text(String),
}

impl ErrorPayload {
    /// Parse a raw response body, falling back to raw text.
    pub fn from_body(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(text),
        }
    }

    /// Best-effort human-readable message.
    ///
    /// Looks for the conventional `message` / `error` fields in a JSON
    /// payload before falling back to the serialized body.
    pub fn message(&self) -> String {
        match self {
            ErrorPayload::Json(value) => value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| value.to_string()),
            ErrorPayload::Text(text) => text.clone(),
        }
    }
}

/// Errors that can occur in the crumb-link client.
///
/// The enum is `Clone` so a single refresh failure can be delivered to
/// every caller waiting on the same coalesced refresh.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CrumbLinkError {
    /// Underlying transport failure (connection refused, DNS, TLS, CORS).
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The request exceeded its deadline.
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// The request was cancelled, individually or by a bulk cancel.
    #[error("Request was cancelled")]
    Cancelled,

    /// Authentication failed and the session could not be recovered.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status_code}): {}", .payload.message())]
    ServerError {
        /// HTTP status code of the response.
        status_code: u16,
        /// Parsed error body, or raw text when not valid JSON.
        payload: ErrorPayload,
    },

    /// Request or response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid client configuration (bad base URL, unusable token file).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Bug-level invariant violation inside the client.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CrumbLinkError {
    /// Construct a server error from a status code and raw body text.
    pub fn server(status_code: u16, body: String) -> Self {
        CrumbLinkError::ServerError {
            status_code,
            payload: ErrorPayload::from_body(body),
        }
    }

    /// HTTP status carried by this error, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CrumbLinkError::ServerError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CrumbLinkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CrumbLinkError::TimeoutError("request timed out or was cancelled".to_string())
        } else if e.is_connect() {
            CrumbLinkError::NetworkError(format!(
                "Cannot reach the CrumbCompass server: {}. Check that the backend is running and reachable.",
                e
            ))
        } else if e.is_decode() {
            CrumbLinkError::SerializationError(e.to_string())
        } else if e.is_builder() {
            CrumbLinkError::ConfigurationError(e.to_string())
        } else {
            CrumbLinkError::NetworkError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CrumbLinkError {
    fn from(e: serde_json::Error) -> Self {
        CrumbLinkError::SerializationError(e.to_string())
    }
}
