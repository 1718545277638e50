//! Backup API endpoints
//!
//! The exported document uses the same keys as the data file, so a backup
//! can be restored here or dropped in place of the file.

use axum::extract::State;
use axum::Json;
use ledgerdash_core::{BackupDocument, RestoreSummary};

use crate::error::ApiResult;
use crate::routes::{persist, Mutation};
use crate::AppState;

pub async fn api_backup(State(state): State<AppState>) -> Json<BackupDocument> {
    let ledger = state.ledger.read().await;
    Json(ledger.export())
}

/// Replace the collections present in the uploaded document
pub async fn api_restore(
    State(state): State<AppState>,
    Json(document): Json<BackupDocument>,
) -> ApiResult<Json<Mutation<RestoreSummary>>> {
    let mut ledger = state.ledger.write().await;
    let summary = ledger.restore(document);

    for issue in ledger.issues() {
        log::warn!(target: "ledgerdash::api", "Restored data: {}", issue);
    }

    let notice = persist(&state, &ledger).await;
    Ok(Json(Mutation::new(summary, &ledger, notice)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_json, request, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_restore_then_backup() {
        let (state, store) = test_state();
        let app = crate::create_router(state);

        let document = json!({
            "transacoes": [
                {"id": 7, "empresa": "matt", "descricao": "Aluguel", "valor": 3200, "tipo": "saida",
                 "status": "pendente", "data": "2024-01-05", "categoria": "Aluguel", "grupoDRE": "Despesas Fixas"}
            ]
        });
        let response = request(&app, "POST", "/api/restore", Some(document)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let restored = body_json(response).await;
        assert_eq!(restored["data"]["transactions"], json!(1));
        assert_eq!(restored["data"]["categories"], json!(null));
        assert!(store.content().await.unwrap().contains("Aluguel"));

        let backup = body_json(request(&app, "GET", "/api/backup", None).await).await;
        assert_eq!(backup["transacoes"][0]["id"], json!("7"));
        assert_eq!(backup["transacoes"][0]["accountId"], json!("principal"));
        assert_eq!(backup["categorias"].as_array().unwrap().len(), 12);
        assert_eq!(backup["contas"].as_array().unwrap().len(), 4);
    }
}
