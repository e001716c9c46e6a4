//! Category collection service.

use super::resource::ResourceClient;
use crate::error::Result;
use crate::http::HttpCore;
use crate::models::{Category, ResourceStats};
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the `/categories` collection.
pub struct CategoryService {
    resource: ResourceClient,
}

impl CategoryService {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self {
            resource: ResourceClient::new(core, "/categories", "categories"),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Category>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Category> {
        self.resource.get_by_id(id).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Category> {
        self.resource.create(payload).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, payload: &B) -> Result<Category> {
        self.resource.update(id, payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Category>> {
        self.resource.search(query).await
    }

    pub async fn top(&self, limit: usize) -> Result<Vec<Category>> {
        self.resource.top(limit).await
    }

    pub async fn stats(&self) -> Result<ResourceStats> {
        self.resource.stats().await
    }
}
