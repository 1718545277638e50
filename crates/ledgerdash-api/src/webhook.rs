//! Outbound webhook for newly created transactions
//!
//! Delivery runs on its own task after the ledger write has completed.
//! Failures are logged and never touch the working set.

use std::sync::Arc;
use std::time::Duration;

use ledgerdash_config::WebhookConfig;
use ledgerdash_core::Transaction;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Result of one delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { status: u16 },
    Rejected { status: u16 },
    Failed { reason: String },
}

#[derive(Clone)]
pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: Arc<RwLock<Option<String>>>,
}

impl WebhookDispatcher {
    pub fn new(config: &WebhookConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: Arc::new(RwLock::new(config.url.clone().filter(|u| !u.trim().is_empty()))),
        })
    }

    /// Currently configured endpoint
    pub async fn url(&self) -> Option<String> {
        self.url.read().await.clone()
    }

    /// Change or clear the endpoint at runtime
    pub async fn set_url(&self, url: Option<String>) {
        let url = url.filter(|u| !u.trim().is_empty());
        match &url {
            Some(u) => log::info!(target: "ledgerdash::webhook", "Webhook endpoint set to {}", u),
            None => log::info!(target: "ledgerdash::webhook", "Webhook delivery disabled"),
        }
        *self.url.write().await = url;
    }

    /// Start delivering `transaction` in the background.
    ///
    /// Returns `None` when no endpoint is configured. The handle may be dropped.
    pub async fn dispatch(&self, transaction: Transaction) -> Option<JoinHandle<DeliveryOutcome>> {
        let url = self.url().await?;
        let client = self.client.clone();
        Some(tokio::spawn(async move { deliver(&client, &url, &transaction).await }))
    }
}

async fn deliver(client: &reqwest::Client, url: &str, transaction: &Transaction) -> DeliveryOutcome {
    match client.post(url).json(transaction).send().await {
        Ok(response) if response.status().is_success() => {
            log::debug!(target: "ledgerdash::webhook", "Delivered transaction {} to {}", transaction.id, url);
            DeliveryOutcome::Delivered {
                status: response.status().as_u16(),
            }
        }
        Ok(response) => {
            log::warn!(
                target: "ledgerdash::webhook",
                "Webhook rejected transaction {} with status {}",
                transaction.id,
                response.status()
            );
            DeliveryOutcome::Rejected {
                status: response.status().as_u16(),
            }
        }
        Err(e) => {
            log::warn!(target: "ledgerdash::webhook", "Webhook delivery of {} failed: {}", transaction.id, e);
            DeliveryOutcome::Failed { reason: e.to_string() }
        }
    }
}
