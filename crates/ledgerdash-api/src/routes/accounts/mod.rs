//! Account routes - list, create, delete
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{api_account_create, api_account_delete, api_accounts};
