//! Data models for the crumb-link client library.
//!
//! Plain wire-format records exchanged with the CrumbCompass backend.
//! They carry no behavior beyond serde (de)serialization.

pub mod auth_response;
pub mod auth_session;
pub mod bakery;
pub mod bakery_review;
pub mod category;
pub mod contact;
pub mod login_request;
pub mod product;
pub mod product_review;
pub mod refresh_request;
pub mod register_request;
pub mod resource_stats;
pub mod subcategory;
pub mod user;

pub use auth_response::AuthResponse;
pub use auth_session::AuthSession;
pub use bakery::Bakery;
pub use bakery_review::BakeryReview;
pub use category::Category;
pub use contact::Contact;
pub use login_request::LoginRequest;
pub use product::Product;
pub use product_review::ProductReview;
pub use refresh_request::RefreshRequest;
pub use register_request::RegisterRequest;
pub use resource_stats::ResourceStats;
pub use subcategory::Subcategory;
pub use user::User;
