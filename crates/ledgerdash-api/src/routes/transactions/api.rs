//! Transactions API endpoints
//!
//! Endpoints:
//! - api_transactions: list with scope filter, keyword search and pagination
//! - api_transaction_detail: single transaction
//! - api_transaction_create: create and notify the webhook
//! - api_transaction_update: replace every field but the id
//! - api_transaction_toggle: flip settled/pending
//! - api_transaction_delete: remove

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ledgerdash_core::{Scope, Transaction, TransactionDraft};
use serde::Serialize;

use crate::error::ApiResult;
use crate::routes::{persist, Mutation};
use crate::AppState;

const DEFAULT_PAGE_SIZE: usize = 50;

/// One page of the transaction list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

fn matches_keyword(tx: &Transaction, keyword: &str) -> bool {
    tx.description.to_lowercase().contains(keyword)
        || tx.category.to_lowercase().contains(keyword)
        || tx.account_id.to_lowercase().contains(keyword)
}

/// List transactions, newest first
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<TransactionsResponse>> {
    let ledger = state.ledger.read().await;

    let limit = params
        .get("limit")
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = params.get("offset").and_then(|s| s.parse().ok()).unwrap_or(0);

    let scope = match params.get("scope").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(value) => ledger.parse_scope(value)?,
        None => Scope::Consolidated,
    };
    let keyword = params
        .get("q")
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let matching: Vec<Transaction> = ledger
        .transactions_sorted()
        .into_iter()
        .filter(|tx| scope.includes(&tx.company_id))
        .filter(|tx| keyword.as_deref().map_or(true, |k| matches_keyword(tx, k)))
        .collect();

    let total_count = matching.len();
    let transactions = matching.into_iter().skip(offset).take(limit).collect();

    Ok(Json(TransactionsResponse {
        transactions,
        total_count,
        page: offset / limit + 1,
        page_size: limit,
    }))
}

pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Transaction>> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.transaction(&id)?.clone()))
}

/// Create a transaction, persist, then hand it to the webhook
pub async fn api_transaction_create(
    State(state): State<AppState>,
    Json(draft): Json<TransactionDraft>,
) -> ApiResult<(StatusCode, Json<Mutation<Transaction>>)> {
    let response = {
        let mut ledger = state.ledger.write().await;
        let created = ledger.create_transaction(draft)?;
        let notice = persist(&state, &ledger).await;
        Mutation::new(created, &ledger, notice)
    };

    // Lock released; delivery runs on its own task
    state.webhook.dispatch(response.data.clone()).await;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn api_transaction_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<TransactionDraft>,
) -> ApiResult<Json<Mutation<Transaction>>> {
    let mut ledger = state.ledger.write().await;
    let updated = ledger.update_transaction(&id, draft)?;
    let notice = persist(&state, &ledger).await;
    Ok(Json(Mutation::new(updated, &ledger, notice)))
}

pub async fn api_transaction_toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<Transaction>>> {
    let mut ledger = state.ledger.write().await;
    let toggled = ledger.toggle_status(&id)?;
    let notice = persist(&state, &ledger).await;
    Ok(Json(Mutation::new(toggled, &ledger, notice)))
}

pub async fn api_transaction_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<Transaction>>> {
    let mut ledger = state.ledger.write().await;
    let removed = ledger.delete_transaction(&id)?;
    let notice = persist(&state, &ledger).await;
    Ok(Json(Mutation::new(removed, &ledger, notice)))
}
