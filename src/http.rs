//! HTTP request dispatch and the 401/refresh protocol.
//!
//! All network traffic funnels through [`HttpCore::request`]: URL
//! building, bearer-token attachment, per-request deadline, cancellation,
//! and the transparent refresh-and-retry handling of 401 responses.

use crate::body::ResponseBody;
use crate::error::{CrumbLinkError, Result};
use crate::models::{AuthResponse, RefreshRequest};
use crate::timeouts::CrumbLinkTimeouts;
use crate::token_store::{TokenPair, TokenStore};
use crate::tracker::{RequestTracker, UntrackGuard};
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Callback fired when the session cannot be recovered (failed or
/// impossible refresh). The embedding application typically navigates to
/// its login screen here.
pub type SessionExpiredCallback = Arc<dyn Fn() + Send + Sync>;

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// JSON body; sets `Content-Type: application/json`.
    Json(Value),
    /// Raw bytes with an explicit content type (uploads). The automatic
    /// JSON content type is not applied.
    Bytes {
        /// Payload bytes
        data: Vec<u8>,
        /// Content-Type header value
        content_type: String,
    },
}

/// Per-call options for [`HttpCore::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Extra headers, applied after the automatic ones.
    pub headers: Vec<(String, String)>,
    /// Query-string parameters (percent-encoded on dispatch).
    pub query: Vec<(String, String)>,
    /// Request payload.
    pub body: RequestBody,
    /// Per-call deadline; defaults to the client's request timeout.
    pub timeout: Option<Duration>,
    /// Caller-supplied request id, for later targeted cancellation.
    pub request_id: Option<String>,
}

impl RequestOptions {
    /// Options for the given method with no body.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: RequestBody::None,
            timeout: None,
            request_id: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// Attach a JSON body serialized from any model.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        Ok(self.json_value(serde_json::to_value(body)?))
    }

    /// Attach an already-built JSON value.
    pub fn json_value(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Attach a raw-bytes body with its own content type.
    pub fn bytes(mut self, data: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = RequestBody::Bytes {
            data,
            content_type: content_type.into(),
        };
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query-string parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Override the per-call deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Track this request under a known id so it can be cancelled with
    /// [`crate::CrumbLinkClient::cancel_request`].
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Generate an opaque request id.
fn next_request_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("req_{}", nanos)
}

/// Join a relative path onto the configured base URL. Absolute URLs pass
/// through untouched.
fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Endpoints that carry credentials in their body rather than a session.
/// A 401 from these must not trigger a refresh attempt.
fn is_credential_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path).trim_end_matches('/');
    path.ends_with("/auth/login")
        || path.ends_with("/auth/register")
        || path.ends_with("/auth/refresh")
        || path.ends_with("/auth/logout")
}

/// Shared internals behind [`crate::CrumbLinkClient`] and the domain
/// services.
pub(crate) struct HttpCore {
    pub(crate) base_url: String,
    pub(crate) http: reqwest::Client,
    pub(crate) tokens: Arc<dyn TokenStore>,
    pub(crate) tracker: RequestTracker,
    pub(crate) timeouts: CrumbLinkTimeouts,
    refresh: RefreshCoordinator,
    on_session_expired: Option<SessionExpiredCallback>,
}

impl HttpCore {
    pub(crate) fn new(
        base_url: String,
        http: reqwest::Client,
        tokens: Arc<dyn TokenStore>,
        timeouts: CrumbLinkTimeouts,
        on_session_expired: Option<SessionExpiredCallback>,
    ) -> Self {
        Self {
            base_url,
            http,
            tokens,
            tracker: RequestTracker::new(),
            timeouts,
            refresh: RefreshCoordinator::new(),
            on_session_expired,
        }
    }

    /// Issue a request and decode its response body.
    ///
    /// The request is tracked for cancellation before dispatch and
    /// untracked on every exit path.
    pub(crate) async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody> {
        let request_id = options.request_id.clone().unwrap_or_else(next_request_id);
        let cancel = self.tracker.track(&request_id);
        let _guard = UntrackGuard::new(&self.tracker, &request_id);

        let deadline = options.timeout.unwrap_or(self.timeouts.request_timeout);
        let started = Instant::now();
        debug!(
            "[REQUEST] {} {} id={} timeout={:?}",
            options.method, path, request_id, deadline
        );

        let outcome = tokio::select! {
            res = tokio::time::timeout(deadline, self.dispatch(path, &options)) => match res {
                Ok(inner) => inner,
                Err(_) => Err(CrumbLinkError::TimeoutError(format!(
                    "{} {} exceeded its {:?} deadline",
                    options.method, path, deadline
                ))),
            },
            _ = cancel.cancelled() => Err(CrumbLinkError::Cancelled),
        };

        match &outcome {
            Ok(_) => debug!(
                "[REQUEST] {} {} id={} ok duration_ms={}",
                options.method,
                path,
                request_id,
                started.elapsed().as_millis()
            ),
            Err(e) => debug!(
                "[REQUEST] {} {} id={} failed: {} duration_ms={}",
                options.method,
                path,
                request_id,
                e,
                started.elapsed().as_millis()
            ),
        }

        outcome
    }

    async fn dispatch(&self, path: &str, options: &RequestOptions) -> Result<ResponseBody> {
        let response = self.send_once(path, options).await?;

        if response.status() == StatusCode::UNAUTHORIZED && !is_credential_endpoint(path) {
            let refresh_available = matches!(
                self.tokens.get()?,
                Some(TokenPair {
                    refresh_token: Some(_),
                    ..
                })
            );

            if !refresh_available {
                self.expire_session();
                return Err(CrumbLinkError::AuthenticationError(
                    "session expired and no refresh token is stored".to_string(),
                ));
            }

            debug!("[REQUEST] {} got 401, attempting token refresh", path);
            if let Err(e) = self.refresh.refresh(self.refresh_context()).await {
                self.expire_session();
                return Err(e);
            }

            // Retried exactly once; the fresh access token is read from
            // the store at send time.
            let retry = self.send_once(path, options).await?;
            return Self::conclude(retry).await;
        }

        Self::conclude(response).await
    }

    /// Build and send one request attempt. Each attempt builds the
    /// request fresh and reads the access token at call time, so a retry
    /// after refresh carries the new token.
    async fn send_once(&self, path: &str, options: &RequestOptions) -> Result<reqwest::Response> {
        let url = join_url(&self.base_url, path);
        let mut builder = self.http.request(options.method.clone(), &url);

        if let Some(pair) = self.tokens.get()? {
            builder = builder.bearer_auth(&pair.access_token);
        }

        match &options.body {
            RequestBody::None => {}
            RequestBody::Json(value) => {
                builder = builder.json(value);
            }
            RequestBody::Bytes { data, content_type } => {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, content_type.as_str())
                    .body(data.clone());
            }
        }

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        Ok(builder.send().await?)
    }

    async fn conclude(response: reqwest::Response) -> Result<ResponseBody> {
        let status = response.status();
        if status.is_success() {
            return ResponseBody::from_response(response).await;
        }

        let text = response.text().await.unwrap_or_default();
        Err(CrumbLinkError::server(status.as_u16(), text))
    }

    /// Clear the stored tokens and notify the application that the
    /// session is gone.
    fn expire_session(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!("[AUTH] failed to clear stored tokens: {}", e);
        }
        if let Some(callback) = &self.on_session_expired {
            callback();
        }
    }

    fn refresh_context(&self) -> RefreshContext {
        RefreshContext {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            tokens: Arc::clone(&self.tokens),
            timeout: self.timeouts.refresh_timeout,
        }
    }
}

type SharedRefresh = Shared<BoxFuture<'static, Result<String>>>;

/// Everything a refresh attempt needs, owned, so the shared future is
/// `'static`.
#[derive(Clone)]
struct RefreshContext {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    timeout: Duration,
}

#[derive(Default)]
struct RefreshSlot {
    generation: u64,
    in_flight: Option<(u64, SharedRefresh)>,
}

/// Coalesces concurrent token refreshes into a single network call.
///
/// The first 401 installs a shared future; every later 401 arriving while
/// it is pending awaits the same future and observes the same outcome.
/// The slot is cleared once the attempt settles so a later 401 can start
/// a fresh one.
struct RefreshCoordinator {
    slot: Mutex<RefreshSlot>,
}

impl RefreshCoordinator {
    fn new() -> Self {
        Self {
            slot: Mutex::new(RefreshSlot::default()),
        }
    }

    async fn refresh(&self, ctx: RefreshContext) -> Result<String> {
        let (generation, future) = {
            let mut slot = self.slot.lock().await;
            match &slot.in_flight {
                Some((generation, future)) => (*generation, future.clone()),
                None => {
                    slot.generation += 1;
                    let generation = slot.generation;
                    let future: SharedRefresh = run_refresh(ctx).boxed().shared();
                    slot.in_flight = Some((generation, future.clone()));
                    (generation, future)
                }
            }
        };

        let result = future.await;

        let mut slot = self.slot.lock().await;
        if slot.in_flight.as_ref().map(|(g, _)| *g) == Some(generation) {
            slot.in_flight = None;
        }
        drop(slot);

        result
    }
}

async fn run_refresh(ctx: RefreshContext) -> Result<String> {
    let stored = ctx.tokens.get()?.ok_or_else(|| {
        CrumbLinkError::AuthenticationError("no stored tokens to refresh".to_string())
    })?;
    let refresh_token = stored.refresh_token.ok_or_else(|| {
        CrumbLinkError::AuthenticationError("no refresh token is stored".to_string())
    })?;

    let url = join_url(&ctx.base_url, "/auth/refresh");
    debug!("[REFRESH] POST {}", url);
    let started = Instant::now();

    let send = ctx
        .http
        .post(&url)
        .json(&RefreshRequest {
            refresh_token: refresh_token.clone(),
        })
        .send();
    let response = tokio::time::timeout(ctx.timeout, send).await.map_err(|_| {
        CrumbLinkError::TimeoutError(format!(
            "token refresh exceeded its {:?} deadline",
            ctx.timeout
        ))
    })??;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        warn!(
            "[REFRESH] rejected: status={} duration_ms={}",
            status,
            started.elapsed().as_millis()
        );
        return Err(CrumbLinkError::AuthenticationError(format!(
            "token refresh rejected ({}): {}",
            status.as_u16(),
            text
        )));
    }

    let body: AuthResponse = response
        .json()
        .await
        .map_err(|e| CrumbLinkError::SerializationError(e.to_string()))?;

    // The refresh token is replaced only when the server issued a new one.
    let new_pair = TokenPair {
        access_token: body.access_token.clone(),
        refresh_token: body.refresh_token.or(Some(refresh_token)),
    };
    ctx.tokens.set(&new_pair)?;

    debug!(
        "[REFRESH] success duration_ms={}",
        started.elapsed().as_millis()
    );
    Ok(new_pair.access_token)
}
