//! Product review collection service.

use super::resource::ResourceClient;
use crate::error::Result;
use crate::http::HttpCore;
use crate::models::{ProductReview, ResourceStats};
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the `/productreviews` collection.
pub struct ProductReviewService {
    resource: ResourceClient,
}

impl ProductReviewService {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self {
            resource: ResourceClient::new(core, "/productreviews", "productreviews"),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<ProductReview>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ProductReview> {
        self.resource.get_by_id(id).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<ProductReview> {
        self.resource.create(payload).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: i64,
        payload: &B,
    ) -> Result<ProductReview> {
        self.resource.update(id, payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ProductReview>> {
        self.resource.search(query).await
    }

    pub async fn top(&self, limit: usize) -> Result<Vec<ProductReview>> {
        self.resource.top(limit).await
    }

    pub async fn stats(&self) -> Result<ResourceStats> {
        self.resource.stats().await
    }
}
