//! Reports API endpoints
//!
//! Every endpoint resolves the selectors from the query string, builds the
//! dashboard from the current working set and returns the requested part.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use ledgerdash_core::{
    BalanceReport, CategorySlice, CumulativePoint, Dashboard, DataIssue, ExpenseStackPoint, FlowPoint,
    IncomeStatement, Kpis, Treasury,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::routes::time::resolve_query;
use crate::AppState;

/// Reference date for period selectors
fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

async fn dashboard(state: &AppState, params: &HashMap<String, String>) -> ApiResult<Dashboard> {
    let ledger = state.ledger.read().await;
    let query = resolve_query(params, &ledger, &state.config)?;
    Ok(ledger.dashboard(&query, today()))
}

pub async fn api_dashboard(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(dashboard(&state, &params).await?))
}

pub async fn api_balances(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<BalanceReport>> {
    Ok(Json(dashboard(&state, &params).await?.balances))
}

pub async fn api_kpis(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Kpis>> {
    Ok(Json(dashboard(&state, &params).await?.kpis))
}

pub async fn api_treasury(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Treasury>> {
    Ok(Json(dashboard(&state, &params).await?.treasury))
}

/// All three chart series for a scope and regime
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub flow: Vec<FlowPoint>,
    pub cumulative: Vec<CumulativePoint>,
    pub expense_stack: Vec<ExpenseStackPoint>,
}

pub async fn api_series(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<SeriesResponse>> {
    let dashboard = dashboard(&state, &params).await?;
    Ok(Json(SeriesResponse {
        flow: dashboard.flow_series,
        cumulative: dashboard.cumulative_series,
        expense_stack: dashboard.expense_stack_series,
    }))
}

pub async fn api_breakdown(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<CategorySlice>>> {
    Ok(Json(dashboard(&state, &params).await?.category_breakdown))
}

pub async fn api_income_statement(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<IncomeStatement>> {
    Ok(Json(dashboard(&state, &params).await?.income_statement))
}

/// Records the reports handle with a fallback
pub async fn api_issues(State(state): State<AppState>) -> Json<Vec<DataIssue>> {
    let ledger = state.ledger.read().await;
    Json(ledger.issues())
}
