//! Authentication operations: login, registration, profile, logout.
//!
//! Token refresh lives in the request path (`http.rs`); this module
//! covers the explicit auth endpoints. Successful login/registration
//! persists the issued tokens to the injected store before the caller
//! sees the session.

use crate::client::CrumbLinkClient;
use crate::error::{CrumbLinkError, Result};
use crate::http::RequestOptions;
use crate::models::{AuthResponse, AuthSession, LoginRequest, RegisterRequest, User};
use crate::token_store::TokenPair;
use log::{debug, warn};
use reqwest::Method;
use serde_json::Value;

impl CrumbLinkClient {
    /// Log in with email and password.
    ///
    /// On success both tokens are stored; subsequent requests carry the
    /// new bearer token automatically.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use crumb_link::{CrumbLinkClient, LoginRequest};
    ///
    /// # async fn example() -> crumb_link::Result<()> {
    /// let client = CrumbLinkClient::builder()
    ///     .base_url("http://localhost:5000")
    ///     .build()?;
    ///
    /// let session = client
    ///     .login(LoginRequest::new("alice@example.com", "secret123"))
    ///     .await?;
    /// println!("logged in as {:?}", session.user);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, credentials: LoginRequest) -> Result<AuthSession> {
        self.authenticate("/auth/login", serde_json::to_value(&credentials)?)
            .await
    }

    /// Register a new account. On success the issued tokens are stored,
    /// exactly as with [`login`](Self::login).
    pub async fn register(&self, registration: RegisterRequest) -> Result<AuthSession> {
        self.authenticate("/auth/register", serde_json::to_value(&registration)?)
            .await
    }

    async fn authenticate(&self, path: &str, payload: Value) -> Result<AuthSession> {
        debug!("[AUTH] POST {}", path);
        let body = self
            .core()
            .request(path, RequestOptions::new(Method::POST).json_value(payload))
            .await?;
        let response: AuthResponse = body.json()?;

        let tokens = TokenPair {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
        };
        // Persist before resolving so follow-up calls are authenticated.
        self.core().tokens.set(&tokens)?;

        debug!("[AUTH] session established via {}", path);
        Ok(AuthSession {
            user: response.user,
            tokens,
        })
    }

    /// Fetch the authenticated user's profile.
    pub async fn profile(&self) -> Result<User> {
        let value = self
            .core()
            .request("/auth/profile", RequestOptions::get())
            .await?
            .into_json_value()?;

        // The backend answers either the user object directly or
        // wrapped as { "user": {...} }.
        let user_value = match value.get("user") {
            Some(user) => user.clone(),
            None => value,
        };
        serde_json::from_value(user_value)
            .map_err(|e| CrumbLinkError::SerializationError(e.to_string()))
    }

    /// Log out.
    ///
    /// The server notification is best effort: a network failure is
    /// logged and never blocks local cleanup. The stored tokens are
    /// cleared and every pending request is aborted unconditionally, so
    /// stale responses cannot land after the credentials are gone.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self
            .core()
            .request("/auth/logout", RequestOptions::new(Method::POST))
            .await
        {
            warn!("[LOGOUT] server logout failed: {}", e);
        }

        // Abort in-flight requests before touching the store; a failing
        // clear must not leave them running.
        self.core().tracker.cancel_all();
        self.core().tokens.clear()?;
        debug!("[LOGOUT] local session cleared");
        Ok(())
    }
}
