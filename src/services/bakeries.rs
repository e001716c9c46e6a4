//! Bakery collection service.

use super::resource::ResourceClient;
use crate::error::Result;
use crate::http::HttpCore;
use crate::models::{Bakery, ResourceStats};
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the `/bakeries` collection.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> crumb_link::Result<()> {
/// # let client = crumb_link::CrumbLinkClient::builder().base_url("http://localhost:5000").build()?;
/// let bakeries = client.bakeries().search("sourdough").await?;
/// for bakery in bakeries {
///     println!("{} (rating {:?})", bakery.name, bakery.average_rating);
/// }
/// # Ok(())
/// # }
/// ```
pub struct BakeryService {
    resource: ResourceClient,
}

impl BakeryService {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self {
            resource: ResourceClient::new(core, "/bakeries", "bakeries"),
        }
    }

    /// List all bakeries.
    pub async fn get_all(&self) -> Result<Vec<Bakery>> {
        self.resource.get_all().await
    }

    /// Fetch one bakery by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Bakery> {
        self.resource.get_by_id(id).await
    }

    /// Create a bakery from any serializable payload.
    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Bakery> {
        self.resource.create(payload).await
    }

    /// Apply a partial update.
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, payload: &B) -> Result<Bakery> {
        self.resource.update(id, payload).await
    }

    /// Delete a bakery.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }

    /// Search bakeries by name or description.
    pub async fn search(&self, query: &str) -> Result<Vec<Bakery>> {
        self.resource.search(query).await
    }

    /// The highest-rated bakeries.
    pub async fn top(&self, limit: usize) -> Result<Vec<Bakery>> {
        self.resource.top(limit).await
    }

    /// Collection statistics.
    pub async fn stats(&self) -> Result<ResourceStats> {
        self.resource.stats().await
    }
}
