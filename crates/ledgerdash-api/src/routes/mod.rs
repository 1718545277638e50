//! Route modules for the API server
//!
//! - transactions: CRUD and status toggle
//! - categories: category list, create, delete
//! - accounts: account list, create, delete
//! - reports: dashboard and the individual report sections
//! - settings: configuration, companies and webhook endpoint
//! - backup: export and restore of the full document
//! - time: selector parsing and period options
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints

pub mod accounts;
pub mod backup;
pub mod categories;
pub mod reports;
pub mod settings;
pub mod time;
pub mod transactions;

use ledgerdash_core::Ledger;
use serde::Serialize;

use crate::AppState;

/// Response body for every mutating endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mutation<T> {
    pub success: bool,
    pub data: T,
    /// Working-set version after the change
    pub version: u64,
    /// False when the change is live but could not be written to the store
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Mutation<T> {
    pub fn new(data: T, ledger: &Ledger, notice: Option<String>) -> Self {
        Self {
            success: true,
            data,
            version: ledger.version(),
            persisted: notice.is_none(),
            message: notice,
        }
    }
}

/// Write the working set to the store while the caller still holds the write lock.
///
/// A failed write keeps the in-memory change and returns a notice for the client.
pub(crate) async fn persist(state: &AppState, ledger: &Ledger) -> Option<String> {
    match state.store.save(ledger.data()).await {
        Ok(()) => None,
        Err(e) => {
            log::error!(target: "ledgerdash::api", "Failed to persist ledger: {}", e);
            Some(format!("Change applied but not saved: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use ledgerdash_config::Config;
    use ledgerdash_core::{BackupDocument, Ledger, LedgerData};
    use ledgerdash_store::{LedgerStore, StoreError, StoreResult};
    use serde_json::json;

    use crate::test_support::{body_json, request};
    use crate::AppState;

    struct ReadOnlyStore;

    #[async_trait]
    impl LedgerStore for ReadOnlyStore {
        async fn load(&self) -> StoreResult<Option<BackupDocument>> {
            Ok(None)
        }

        async fn save(&self, _data: &LedgerData) -> StoreResult<()> {
            Err(StoreError::Io {
                path: "ledger.json".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_change() {
        let config = Config::default();
        let ledger = Ledger::with_companies(LedgerData::seeded(), &config.companies);
        let state = AppState::new(config, ledger, Arc::new(ReadOnlyStore)).unwrap();
        let app = crate::create_router(state.clone());

        let body = json!({"name": "Eventos", "direction": "outflow", "reportGroup": "VariableExpense"});
        let response = request(&app, "POST", "/api/categories", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert_eq!(created["success"], json!(true));
        assert_eq!(created["persisted"], json!(false));
        assert!(created["message"].as_str().unwrap().contains("read-only"));
        assert_eq!(created["version"], json!(1));
        assert_eq!(state.ledger.read().await.categories().len(), 13);
    }
}
