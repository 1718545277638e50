//! Settings API endpoints

use std::path::PathBuf;

use axum::extract::State;
use axum::Json;
use ledgerdash_config::{is_http_url, Config};
use ledgerdash_core::Company;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Effective configuration, with the webhook endpoint as currently set
pub async fn api_settings(State(state): State<AppState>) -> Json<Config> {
    let mut config = state.config.clone();
    config.webhook.url = state.webhook.url().await;
    Json(config)
}

pub async fn api_companies(State(state): State<AppState>) -> Json<Vec<Company>> {
    let ledger = state.ledger.read().await;
    Json(ledger.companies().to_vec())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookUpdate {
    /// New endpoint; null or empty disables delivery
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSetting {
    pub url: Option<String>,
    /// True once the endpoint is written to the configuration file
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Replace the webhook endpoint and write it back to the configuration file
pub async fn api_set_webhook(
    State(state): State<AppState>,
    Json(update): Json<WebhookUpdate>,
) -> ApiResult<Json<WebhookSetting>> {
    let url = update.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
    if let Some(url) = &url {
        if !is_http_url(url) {
            return Err(ApiError::bad_request("Webhook URL must start with http:// or https://"));
        }
    }

    let _guard = state.settings_lock.lock().await;
    state.webhook.set_url(url.clone()).await;

    let (persisted, message) = match &state.config_path {
        Some(path) => match save_webhook(&state.config, path.clone(), url.clone()).await {
            Ok(()) => (true, None),
            Err(e) => {
                log::error!(target: "ledgerdash::api", "Failed to save webhook setting: {}", e);
                (false, Some(format!("Webhook updated but not saved: {}", e)))
            }
        },
        None => (false, Some("No configuration file; the webhook lasts until restart".to_string())),
    };

    Ok(Json(WebhookSetting { url, persisted, message }))
}

async fn save_webhook(config: &Config, path: PathBuf, url: Option<String>) -> anyhow::Result<()> {
    let mut config = config.clone();
    config.webhook.url = url;
    tokio::task::spawn_blocking(move || config.save(&path)).await??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_support::{body_json, request, test_state};
    use crate::AppState;
    use ledgerdash_config::Config;
    use ledgerdash_core::{Ledger, LedgerData};
    use ledgerdash_store::MemoryStore;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_webhook_setting() {
        let (state, _store) = test_state();
        let app = crate::create_router(state);

        let response = request(&app, "PUT", "/api/settings/webhook", Some(json!({"url": "ftp://nope"}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let updated = body_json(
            request(&app, "PUT", "/api/settings/webhook", Some(json!({"url": "https://hooks.example.com/tx"}))).await,
        )
        .await;
        assert_eq!(updated["url"], json!("https://hooks.example.com/tx"));

        let settings = body_json(request(&app, "GET", "/api/settings", None).await).await;
        assert_eq!(settings["webhook"]["url"], json!("https://hooks.example.com/tx"));

        let cleared = body_json(request(&app, "PUT", "/api/settings/webhook", Some(json!({"url": null}))).await).await;
        assert_eq!(cleared["url"], json!(null));
        assert_eq!(cleared["persisted"], json!(false));
    }

    #[tokio::test]
    async fn test_webhook_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let (state, _store) = test_state();
        let app = crate::create_router(state.with_config_path(&path));

        let updated = body_json(
            request(&app, "PUT", "/api/settings/webhook", Some(json!({"url": "https://hooks.example.com/tx"}))).await,
        )
        .await;
        assert_eq!(updated["persisted"], json!(true));
        assert!(updated.get("message").is_none());

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.webhook.url.as_deref(), Some("https://hooks.example.com/tx"));

        let ledger = Ledger::with_companies(LedgerData::seeded(), &reloaded.companies);
        let restarted = AppState::new(reloaded, ledger, Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(restarted.webhook.url().await.as_deref(), Some("https://hooks.example.com/tx"));
    }

    #[tokio::test]
    async fn test_companies() {
        let (state, _store) = test_state();
        let app = crate::create_router(state);

        let companies = body_json(request(&app, "GET", "/api/companies", None).await).await;
        let ids: Vec<&str> = companies
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["ps", "matt", "afm"]);
    }
}
