//! JSON HTTP API for the ledgerdash dashboard
//!
//! Routes are organized into modules:
//! - routes::transactions: transaction CRUD and status toggle
//! - routes::categories / routes::accounts: reference data
//! - routes::reports: dashboard and report sections
//! - routes::settings: configuration, companies, webhook endpoint
//! - routes::backup: export and restore
//! - routes::time: selector parsing and period options

pub mod error;
pub mod routes;
pub mod webhook;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use ledgerdash_config::Config;
use ledgerdash_core::Ledger;
use ledgerdash_store::StoreRef;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};
pub use webhook::{DeliveryOutcome, WebhookDispatcher};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub config: Config,
    pub store: StoreRef,
    pub webhook: WebhookDispatcher,
    /// File that runtime settings changes are written back to
    pub config_path: Option<PathBuf>,
    /// Serializes settings writes so the file matches the last change
    settings_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config, ledger: Ledger, store: StoreRef) -> anyhow::Result<Self> {
        let webhook = WebhookDispatcher::new(&config.webhook)?;
        Ok(Self {
            ledger: Arc::new(RwLock::new(ledger)),
            config,
            store,
            webhook,
            config_path: None,
            settings_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_account_create, api_account_delete, api_accounts};
    use routes::backup::{api_backup, api_restore};
    use routes::categories::{api_categories, api_category_create, api_category_delete};
    use routes::reports::{
        api_balances, api_breakdown, api_dashboard, api_income_statement, api_issues, api_kpis, api_series,
        api_treasury,
    };
    use routes::settings::{api_companies, api_set_webhook, api_settings};
    use routes::time::{api_months, api_periods};
    use routes::transactions::{
        api_transaction_create, api_transaction_delete, api_transaction_detail, api_transaction_toggle,
        api_transaction_update, api_transactions,
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        // Reports
        .route("/api/dashboard", get(api_dashboard))
        .route("/api/balances", get(api_balances))
        .route("/api/kpis", get(api_kpis))
        .route("/api/treasury", get(api_treasury))
        .route("/api/series", get(api_series))
        .route("/api/breakdown", get(api_breakdown))
        .route("/api/income-statement", get(api_income_statement))
        .route("/api/issues", get(api_issues))
        .route("/api/periods", get(api_periods))
        .route("/api/periods/months", get(api_months))
        // Working set
        .route("/api/transactions", get(api_transactions).post(api_transaction_create))
        .route(
            "/api/transactions/:id",
            get(api_transaction_detail)
                .put(api_transaction_update)
                .delete(api_transaction_delete),
        )
        .route("/api/transactions/:id/toggle", post(api_transaction_toggle))
        .route("/api/categories", get(api_categories).post(api_category_create))
        .route("/api/categories/:id", axum::routing::delete(api_category_delete))
        .route("/api/accounts", get(api_accounts).post(api_account_create))
        .route("/api/accounts/:id", axum::routing::delete(api_account_delete))
        .route("/api/companies", get(api_companies))
        .route("/api/backup", get(api_backup))
        .route("/api/restore", post(api_restore))
        .route("/api/settings", get(api_settings))
        .route("/api/settings/webhook", put(api_set_webhook))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    transactions: usize,
    categories: usize,
    accounts: usize,
    companies: usize,
    version: u64,
}

/// Working-set counts
async fn api_summary(axum::extract::State(state): axum::extract::State<AppState>) -> Json<Summary> {
    let ledger = state.ledger.read().await;
    Json(Summary {
        transactions: ledger.data().transactions.len(),
        categories: ledger.categories().len(),
        accounts: ledger.accounts().len(),
        companies: ledger.companies().len(),
        version: ledger.version(),
    })
}

/// Bind the configured address and serve until the process stops
pub async fn start_server(
    config: Config,
    config_path: PathBuf,
    ledger: Ledger,
    store: StoreRef,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, ledger, store)?.with_config_path(config_path);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "ledgerdash::api", "Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
