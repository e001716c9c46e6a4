//! Bakery review collection service.

use super::resource::ResourceClient;
use crate::error::Result;
use crate::http::HttpCore;
use crate::models::{BakeryReview, ResourceStats};
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the `/bakeryreviews` collection.
pub struct BakeryReviewService {
    resource: ResourceClient,
}

impl BakeryReviewService {
    pub(crate) fn new(core: Arc<HttpCore>) -> Self {
        Self {
            resource: ResourceClient::new(core, "/bakeryreviews", "bakeryreviews"),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<BakeryReview>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<BakeryReview> {
        self.resource.get_by_id(id).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<BakeryReview> {
        self.resource.create(payload).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, payload: &B) -> Result<BakeryReview> {
        self.resource.update(id, payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.delete(id).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<BakeryReview>> {
        self.resource.search(query).await
    }

    pub async fn top(&self, limit: usize) -> Result<Vec<BakeryReview>> {
        self.resource.top(limit).await
    }

    pub async fn stats(&self) -> Result<ResourceStats> {
        self.resource.stats().await
    }
}
