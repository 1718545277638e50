//! Accounts API endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ledgerdash_core::{Account, AccountDraft};

use crate::error::ApiResult;
use crate::routes::{persist, Mutation};
use crate::AppState;

pub async fn api_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let ledger = state.ledger.read().await;
    Json(ledger.accounts().to_vec())
}

pub async fn api_account_create(
    State(state): State<AppState>,
    Json(draft): Json<AccountDraft>,
) -> ApiResult<(StatusCode, Json<Mutation<Account>>)> {
    let mut ledger = state.ledger.write().await;
    let created = ledger.add_account(draft)?;
    let notice = persist(&state, &ledger).await;
    Ok((StatusCode::CREATED, Json(Mutation::new(created, &ledger, notice))))
}

/// Remove an account; its transactions show up as unassigned in balances
pub async fn api_account_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<Account>>> {
    let mut ledger = state.ledger.write().await;
    let removed = ledger.delete_account(&id)?;
    let notice = persist(&state, &ledger).await;
    Ok(Json(Mutation::new(removed, &ledger, notice)))
}
