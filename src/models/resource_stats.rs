use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aggregate statistics returned by a collection's `/stats` sub-resource.
///
/// The backend varies the exact fields per resource, so anything beyond
/// the common ones is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceStats {
    /// Total number of entities in the collection
    #[serde(default)]
    pub total: Option<u64>,
    /// Average rating across the collection, where applicable
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Resource-specific fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
