//! Main CrumbCompass client with builder pattern.
//!
//! Provides the primary interface for talking to a CrumbCompass backend:
//! raw requests, the convenience verbs, cancellation, and access to the
//! typed domain services.

use crate::error::{CrumbLinkError, Result};
use crate::http::{HttpCore, RequestOptions, SessionExpiredCallback};
use crate::body::ResponseBody;
use crate::services::{
    BakeryReviewService, BakeryService, CategoryService, ContactService, ProductReviewService,
    ProductService, SubcategoryService, UserService,
};
use crate::timeouts::CrumbLinkTimeouts;
use crate::token_store::{MemoryTokenStore, TokenStore};
use log::debug;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Main CrumbCompass client.
///
/// Use [`CrumbLinkClientBuilder`] to construct instances with custom
/// configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use crumb_link::CrumbLinkClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CrumbLinkClient::builder()
///     .base_url("http://localhost:5000")
///     .request_timeout(std::time::Duration::from_secs(30))
///     .build()?;
///
/// let bakeries = client.bakeries().get_all().await?;
/// println!("{} bakeries", bakeries.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CrumbLinkClient {
    core: Arc<HttpCore>,
}

impl CrumbLinkClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> CrumbLinkClientBuilder {
        CrumbLinkClientBuilder::new()
    }

    /// Issue a request with full control over the options.
    ///
    /// Relative paths are resolved against the configured base URL; the
    /// stored access token, when present, is attached as a bearer header.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<ResponseBody> {
        self.core.request(path, options).await
    }

    /// GET a path.
    pub async fn get(&self, path: &str) -> Result<ResponseBody> {
        self.core.request(path, RequestOptions::get()).await
    }

    /// POST a JSON body to a path.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody> {
        self.core
            .request(path, RequestOptions::new(Method::POST).json(body)?)
            .await
    }

    /// PATCH a path with a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody> {
        self.core
            .request(path, RequestOptions::new(Method::PATCH).json(body)?)
            .await
    }

    /// PUT a JSON body to a path.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ResponseBody> {
        self.core
            .request(path, RequestOptions::new(Method::PUT).json(body)?)
            .await
    }

    /// DELETE a path.
    pub async fn delete(&self, path: &str) -> Result<ResponseBody> {
        self.core
            .request(path, RequestOptions::new(Method::DELETE))
            .await
    }

    /// Whether an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.core.tokens.get(), Ok(Some(_)))
    }

    /// Abort and remove a single tracked request by id.
    ///
    /// Returns `true` if a request with that id was in flight.
    pub fn cancel_request(&self, id: &str) -> bool {
        debug!("[CANCEL] request id={}", id);
        self.core.tracker.cancel(id)
    }

    /// Abort and remove every tracked in-flight request.
    pub fn cancel_all_requests(&self) {
        debug!("[CANCEL] all pending requests");
        self.core.tracker.cancel_all();
    }

    /// Number of requests currently in flight.
    pub fn pending_requests(&self) -> usize {
        self.core.tracker.pending_count()
    }

    /// Typed access to the `/bakeries` collection.
    pub fn bakeries(&self) -> BakeryService {
        BakeryService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/products` collection.
    pub fn products(&self) -> ProductService {
        ProductService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/categories` collection.
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/subcategories` collection.
    pub fn subcategories(&self) -> SubcategoryService {
        SubcategoryService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/users` collection.
    pub fn users(&self) -> UserService {
        UserService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/bakeryreviews` collection.
    pub fn bakery_reviews(&self) -> BakeryReviewService {
        BakeryReviewService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/productreviews` collection.
    pub fn product_reviews(&self) -> ProductReviewService {
        ProductReviewService::new(Arc::clone(&self.core))
    }

    /// Typed access to the `/contacts` collection.
    pub fn contacts(&self) -> ContactService {
        ContactService::new(Arc::clone(&self.core))
    }

    pub(crate) fn core(&self) -> &Arc<HttpCore> {
        &self.core
    }
}

/// Builder for configuring [`CrumbLinkClient`] instances.
pub struct CrumbLinkClientBuilder {
    base_url: Option<String>,
    timeouts: CrumbLinkTimeouts,
    token_store: Option<Arc<dyn TokenStore>>,
    on_session_expired: Option<SessionExpiredCallback>,
}

impl CrumbLinkClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeouts: CrumbLinkTimeouts::default(),
            token_store: None,
            on_session_expired: None,
        }
    }

    /// Set the base URL of the CrumbCompass backend.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the full timeout configuration.
    pub fn timeouts(mut self, timeouts: CrumbLinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Shorthand for setting just the per-request deadline.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Inject a token storage backend.
    ///
    /// Defaults to an in-memory store; pass a
    /// [`FileTokenStore`](crate::FileTokenStore) for persistence across
    /// runs, or a test double in tests.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Register a callback fired when the session cannot be recovered
    /// (failed or impossible token refresh). The tokens are already
    /// cleared by the time it runs.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use crumb_link::CrumbLinkClient;
    ///
    /// # fn example() -> crumb_link::Result<()> {
    /// let client = CrumbLinkClient::builder()
    ///     .base_url("http://localhost:5000")
    ///     .on_session_expired(|| {
    ///         println!("Session expired, please log in again");
    ///     })
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn on_session_expired<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_session_expired = Some(Arc::new(callback));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CrumbLinkClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| CrumbLinkError::ConfigurationError("base_url is required".into()))?;

        // Connection pooling keeps TCP handshake overhead off the hot
        // path; the per-request deadline is enforced by the client itself
        // rather than reqwest, so only the connect timeout is set here.
        let http = reqwest::Client::builder()
            .connect_timeout(self.timeouts.connect_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| CrumbLinkError::ConfigurationError(e.to_string()))?;

        let tokens = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        Ok(CrumbLinkClient {
            core: Arc::new(HttpCore::new(
                base_url,
                http,
                tokens,
                self.timeouts,
                self.on_session_expired,
            )),
        })
    }
}
