//! Category routes - list, create, delete
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{api_categories, api_category_create, api_category_delete};
