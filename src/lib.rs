//! # crumb-link: CrumbCompass Client Library
//!
//! Client library for the CrumbCompass bakery discovery and review API.
//! Provides authenticated HTTP access to every backend collection with
//! transparent token refresh and per-request cancellation.
//!
//! ## Features
//!
//! - **Typed domain services**: bakeries, products, categories,
//!   subcategories, users, reviews and contacts behind one canonical
//!   `get_all / get_by_id / create / update / delete` contract
//! - **Token lifecycle**: login/register/refresh/logout with an
//!   injectable [`TokenStore`] (in-memory or config-dir file)
//! - **Transparent refresh**: a 401 triggers at most one coalesced
//!   refresh call and a single retry of the original request
//! - **Cancellation**: every request is tracked and individually
//!   abortable; logout aborts everything in flight
//! - **Configurable timeouts**: connect, per-request and refresh
//!   deadlines via [`CrumbLinkTimeouts`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crumb_link::{CrumbLinkClient, LoginRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CrumbLinkClient::builder()
//!         .base_url("http://localhost:5000")
//!         .build()?;
//!
//!     client
//!         .login(LoginRequest::new("alice@example.com", "secret123"))
//!         .await?;
//!
//!     for bakery in client.bakeries().top(5).await? {
//!         println!("{}: {:?}", bakery.name, bakery.average_rating);
//!     }
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```

pub mod body;
pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod timeouts;
pub mod token_store;
pub mod tracker;

mod auth;

// Re-export main types for convenience
pub use body::{BodyKind, ResponseBody};
pub use client::{CrumbLinkClient, CrumbLinkClientBuilder};
pub use error::{CrumbLinkError, ErrorPayload, Result};
pub use http::{RequestBody, RequestOptions, SessionExpiredCallback};
pub use models::{
    AuthSession, Bakery, BakeryReview, Category, Contact, LoginRequest, Product, ProductReview,
    RegisterRequest, ResourceStats, Subcategory, User,
};
pub use services::{
    BakeryReviewService, BakeryService, CategoryService, ContactService, ProductReviewService,
    ProductService, SubcategoryService, UserService,
};
pub use timeouts::CrumbLinkTimeouts;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};
pub use tracker::RequestTracker;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
