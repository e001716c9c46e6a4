use serde::{Deserialize, Serialize};

/// A registered CrumbCompass user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user id
    pub id: i64,
    /// Unique username
    pub username: String,
    /// Email address
    pub email: String,
    /// Role ("user" or "admin")
    #[serde(default)]
    pub role: Option<String>,
    /// Creation timestamp in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,
}
