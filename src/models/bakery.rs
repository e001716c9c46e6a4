use serde::{Deserialize, Serialize};

/// A bakery listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bakery {
    /// Unique bakery id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Website URL
    #[serde(default)]
    pub website: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Average cookie rating across reviews (1.0 to 5.0)
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Number of reviews backing the average
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Creation timestamp in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,
}
