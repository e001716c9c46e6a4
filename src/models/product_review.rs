use serde::{Deserialize, Serialize};

/// A cookie-rating review left on a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductReview {
    /// Unique review id
    pub id: i64,
    /// Reviewed product id
    pub product_id: i64,
    /// Author user id
    pub user_id: i64,
    /// Cookie rating, 1 to 5
    pub rating: u8,
    /// Optional review text
    #[serde(default)]
    pub comment: Option<String>,
    /// Creation timestamp in RFC3339 format
    #[serde(default)]
    pub created_at: Option<String>,
}
