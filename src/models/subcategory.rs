use serde::{Deserialize, Serialize};

/// A subcategory nested under a [`Category`](super::Category).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcategory {
    /// Unique subcategory id
    pub id: i64,
    /// Parent category id
    pub category_id: i64,
    /// Display name
    pub name: String,
}
