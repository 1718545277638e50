//! Transaction routes - list, detail, create, edit, status toggle, delete
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{
    api_transaction_create,
    api_transaction_delete,
    api_transaction_detail,
    api_transaction_toggle,
    api_transaction_update,
    api_transactions,
    TransactionsResponse,
};
