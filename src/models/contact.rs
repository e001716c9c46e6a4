use serde::{Deserialize, Serialize};

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Unique submission id
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body
    pub message: String,
    /// Creation timestamp in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,
}
