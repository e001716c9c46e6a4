//! Generic collection client backing every domain service.
//!
//! The CrumbCompass backend exposes the same contract on every
//! collection: `get_all / get_by_id / create / update / delete` plus the
//! `search`, `top` and `stats` sub-resources. Collection responses are
//! `{ "<entityPlural>": [...] }` with a bare top-level array as the
//! accepted fallback; item responses are a single entity object.

use crate::body::ResponseBody;
use crate::error::{CrumbLinkError, Result};
use crate::http::{HttpCore, RequestOptions};
use crate::models::ResourceStats;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub(crate) struct ResourceClient {
    core: Arc<HttpCore>,
    base_path: &'static str,
    collection_key: &'static str,
}

impl ResourceClient {
    pub(crate) fn new(
        core: Arc<HttpCore>,
        base_path: &'static str,
        collection_key: &'static str,
    ) -> Self {
        Self {
            core,
            base_path,
            collection_key,
        }
    }

    pub(crate) async fn get_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let body = self.core.request(self.base_path, RequestOptions::get()).await?;
        self.extract_list(body)
    }

    pub(crate) async fn get_by_id<T: DeserializeOwned>(&self, id: i64) -> Result<T> {
        self.core
            .request(&format!("{}/{}", self.base_path, id), RequestOptions::get())
            .await?
            .json()
    }

    pub(crate) async fn create<T, B>(&self, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.core
            .request(
                self.base_path,
                RequestOptions::new(Method::POST).json(payload)?,
            )
            .await?
            .json()
    }

    pub(crate) async fn update<T, B>(&self, id: i64, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.core
            .request(
                &format!("{}/{}", self.base_path, id),
                RequestOptions::new(Method::PATCH).json(payload)?,
            )
            .await?
            .json()
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<()> {
        self.core
            .request(
                &format!("{}/{}", self.base_path, id),
                RequestOptions::new(Method::DELETE),
            )
            .await?;
        Ok(())
    }

    pub(crate) async fn search<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>> {
        let body = self
            .core
            .request(
                &format!("{}/search", self.base_path),
                RequestOptions::get().query("q", query),
            )
            .await?;
        self.extract_list(body)
    }

    pub(crate) async fn top<T: DeserializeOwned>(&self, limit: usize) -> Result<Vec<T>> {
        let body = self
            .core
            .request(
                &format!("{}/top", self.base_path),
                RequestOptions::get().query("limit", limit.to_string()),
            )
            .await?;
        self.extract_list(body)
    }

    pub(crate) async fn stats(&self) -> Result<ResourceStats> {
        self.core
            .request(&format!("{}/stats", self.base_path), RequestOptions::get())
            .await?
            .json()
    }

    fn extract_list<T: DeserializeOwned>(&self, body: ResponseBody) -> Result<Vec<T>> {
        let value = body.into_json_value()?;
        let items = match value {
            Value::Array(_) => value,
            Value::Object(ref map) if map.contains_key(self.collection_key) => {
                map[self.collection_key].clone()
            }
            _ => {
                return Err(CrumbLinkError::SerializationError(format!(
                    "expected a '{}' collection or a bare array",
                    self.collection_key
                )))
            }
        };
        serde_json::from_value(items).map_err(|e| CrumbLinkError::SerializationError(e.to_string()))
    }
}
