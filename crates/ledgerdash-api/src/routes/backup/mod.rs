//! Backup routes - export and restore the whole document

pub mod api;

pub use api::{api_backup, api_restore};
