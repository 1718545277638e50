//! Report routes - dashboard and individual report sections
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{
    api_balances,
    api_breakdown,
    api_dashboard,
    api_income_statement,
    api_issues,
    api_kpis,
    api_series,
    api_treasury,
    SeriesResponse,
};
