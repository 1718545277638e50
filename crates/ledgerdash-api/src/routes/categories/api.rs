//! Categories API endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ledgerdash_core::{Category, CategoryDraft};

use crate::error::ApiResult;
use crate::routes::{persist, Mutation};
use crate::AppState;

pub async fn api_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let ledger = state.ledger.read().await;
    Json(ledger.categories().to_vec())
}

pub async fn api_category_create(
    State(state): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> ApiResult<(StatusCode, Json<Mutation<Category>>)> {
    let mut ledger = state.ledger.write().await;
    let created = ledger.add_category(draft)?;
    let notice = persist(&state, &ledger).await;
    Ok((StatusCode::CREATED, Json(Mutation::new(created, &ledger, notice))))
}

/// Remove a category; transactions keep their category name
pub async fn api_category_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<Category>>> {
    let mut ledger = state.ledger.write().await;
    let removed = ledger.delete_category(&id)?;
    let notice = persist(&state, &ledger).await;
    Ok(Json(Mutation::new(removed, &ledger, notice)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_json, request, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_category_lifecycle() {
        let (state, _store) = test_state();
        let app = crate::create_router(state);

        let list = body_json(request(&app, "GET", "/api/categories", None).await).await;
        assert_eq!(list.as_array().unwrap().len(), 12);

        let body = json!({"name": "Consultoria", "direction": "inflow", "reportGroup": "GrossRevenue"});
        let response = request(&app, "POST", "/api/categories", Some(body.clone())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["data"]["id"].as_str().unwrap().to_string();

        let duplicate = request(&app, "POST", "/api/categories", Some(body)).await;
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let response = request(&app, "DELETE", &format!("/api/categories/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = request(&app, "DELETE", &format!("/api/categories/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
