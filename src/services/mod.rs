//! Typed domain services over the CrumbCompass collections.
//!
//! Thin wrappers around the shared resource client; every service
//! exposes the same canonical contract.

mod bakeries;
mod bakery_reviews;
mod categories;
mod contacts;
mod product_reviews;
mod products;
mod resource;
mod subcategories;
mod users;

pub use bakeries::BakeryService;
pub use bakery_reviews::BakeryReviewService;
pub use categories::CategoryService;
pub use contacts::ContactService;
pub use product_reviews::ProductReviewService;
pub use products::ProductService;
pub use subcategories::SubcategoryService;
pub use users::UserService;
