//! Response body interpretation.
//!
//! The server's Content-Type header is classified into a small closed set
//! of categories, and the body is decoded into the matching
//! [`ResponseBody`] arm. An unexpected content type is never an error by
//! itself; it yields the diagnostic [`ResponseBody::Other`] arm carrying
//! the raw text.

use crate::error::{CrumbLinkError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Closed set of content-type categories the client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json` and `*+json` media types.
    Json,
    /// `text/*` media types.
    Text,
    /// Binary streams (octet-stream, images, audio, video, pdf).
    Binary,
    /// Anything else, including a missing Content-Type header.
    Other,
}

impl BodyKind {
    /// Classify a Content-Type header value.
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return BodyKind::Other;
        };
        // Strip parameters such as "; charset=utf-8".
        let media_type = raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

        if media_type == "application/json" || media_type.ends_with("+json") {
            BodyKind::Json
        } else if media_type.starts_with("text/") {
            BodyKind::Text
        } else if media_type == "application/octet-stream"
            || media_type == "application/pdf"
            || media_type.starts_with("image/")
            || media_type.starts_with("audio/")
            || media_type.starts_with("video/")
        {
            BodyKind::Binary
        } else {
            BodyKind::Other
        }
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON value.
    Json(Value),
    /// Plain text body.
    Text(String),
    /// Raw bytes of a binary response.
    Binary(Bytes),
    /// Diagnostic wrapper for an unrecognized content type.
    Other {
        /// What the client could not make sense of.
        message: String,
        /// Raw response text, best effort.
        content: String,
    },
}

impl ResponseBody {
    /// Decode a response according to its Content-Type header.
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        match BodyKind::classify(content_type.as_deref()) {
            BodyKind::Json => {
                let text = response.text().await?;
                if text.trim().is_empty() {
                    // 204-style empty bodies labeled JSON.
                    return Ok(ResponseBody::Json(Value::Null));
                }
                let value = serde_json::from_str(&text).map_err(|e| {
                    CrumbLinkError::SerializationError(format!(
                        "response labeled JSON but failed to parse: {}",
                        e
                    ))
                })?;
                Ok(ResponseBody::Json(value))
            }
            BodyKind::Text => Ok(ResponseBody::Text(response.text().await?)),
            BodyKind::Binary => Ok(ResponseBody::Binary(response.bytes().await?)),
            BodyKind::Other => {
                let content = response.text().await.unwrap_or_default();
                Ok(ResponseBody::Other {
                    message: format!(
                        "unexpected content type '{}'",
                        content_type.as_deref().unwrap_or("<none>")
                    ),
                    content,
                })
            }
        }
    }

    /// Borrow the JSON value, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the body and return its JSON value.
    pub fn into_json_value(self) -> Result<Value> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            other => Err(CrumbLinkError::SerializationError(format!(
                "expected a JSON response, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Deserialize the JSON arm into a typed model.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        let value = self.into_json_value()?;
        serde_json::from_value(value)
            .map_err(|e| CrumbLinkError::SerializationError(e.to_string()))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ResponseBody::Json(_) => "json",
            ResponseBody::Text(_) => "text",
            ResponseBody::Binary(_) => "binary",
            ResponseBody::Other { .. } => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_json() {
        assert_eq!(BodyKind::classify(Some("application/json")), BodyKind::Json);
        assert_eq!(
            BodyKind::classify(Some("application/json; charset=utf-8")),
            BodyKind::Json
        );
        assert_eq!(
            BodyKind::classify(Some("application/problem+json")),
            BodyKind::Json
        );
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(BodyKind::classify(Some("text/plain")), BodyKind::Text);
        assert_eq!(
            BodyKind::classify(Some("text/html; charset=utf-8")),
            BodyKind::Text
        );
    }

    #[test]
    fn test_classify_binary() {
        assert_eq!(
            BodyKind::classify(Some("application/octet-stream")),
            BodyKind::Binary
        );
        assert_eq!(BodyKind::classify(Some("image/png")), BodyKind::Binary);
        assert_eq!(BodyKind::classify(Some("application/pdf")), BodyKind::Binary);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(BodyKind::classify(Some("application/x-crumb")), BodyKind::Other);
        assert_eq!(BodyKind::classify(None), BodyKind::Other);
        assert_eq!(BodyKind::classify(Some("")), BodyKind::Other);
    }

    #[test]
    fn test_json_extraction() {
        let body = ResponseBody::Json(serde_json::json!({"name": "Sourdough"}));
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }
        let named: Named = body.json().unwrap();
        assert_eq!(named.name, "Sourdough");
    }

    #[test]
    fn test_json_extraction_rejects_text() {
        let body = ResponseBody::Text("hello".into());
        assert!(body.into_json_value().is_err());
    }
}
