use serde::{Deserialize, Serialize};

/// A product sold by a bakery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product id
    pub id: i64,
    /// Owning bakery id
    pub bakery_id: i64,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price
    #[serde(default)]
    pub price: Option<f64>,
    /// Category id, if categorized
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Subcategory id, if categorized
    #[serde(default)]
    pub subcategory_id: Option<i64>,
    /// Image URL
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
