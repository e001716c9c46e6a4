//! Product collection service.

use super::resource::ResourceClient;
use crate::error::Result;
use crate::http::HttpCore;
use crate::models::{Product, ResourceStats};
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the `/products` collection.
pub struct ProductService {
    resource: ResourceClient,
}

impl ProductService {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self {
            resource: ResourceClient::new(core, "/products", "products"),
        }
    }

    /// List all products.
    pub async fn get_all(&self) -> Result<Vec<Product>> {
        self.resource.get_all().await
    }

    /// Fetch one product by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Product> {
        self.resource.get_by_id(id).await
    }

    /// Create a product from any serializable payload.
    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Product> {
        self.resource.create(payload).await
    }

    /// Apply a partial update.
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, payload: &B) -> Result<Product> {
        self.resource.update(id, payload).await
    }

    /// Delete a product.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }

    /// Search products by name or description.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
        self.resource.search(query).await
    }

    /// The highest-rated products.
    pub async fn top(&self, limit: usize) -> Result<Vec<Product>> {
        self.resource.top(limit).await
    }

    /// Collection statistics.
    pub async fn stats(&self) -> Result<ResourceStats> {
        self.resource.stats().await
    }
}
