//! JSON persistence for the ledger working set
//!
//! The on-disk format is the backup document, so a data file and a
//! downloaded backup are interchangeable.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ledgerdash_core::{BackupDocument, LedgerData};

pub mod error;

pub use error::{StoreError, StoreResult};

/// Store reference type
pub type StoreRef = Arc<dyn LedgerStore>;

/// Trait for ledger document stores
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Read the stored document; `None` when nothing has been saved yet
    async fn load(&self) -> StoreResult<Option<BackupDocument>>;

    /// Replace the stored document with the full working set
    async fn save(&self, data: &LedgerData) -> StoreResult<()>;
}

/// Load the working set, seeding defaults for anything the document lacks
pub async fn load_or_seed(store: &dyn LedgerStore) -> StoreResult<LedgerData> {
    let mut data = LedgerData::seeded();
    match store.load().await? {
        Some(document) => {
            if let Some(transactions) = document.transactions {
                data.transactions = transactions;
            }
            if let Some(categories) = document.categories {
                data.categories = categories;
            }
            if let Some(accounts) = document.accounts {
                data.accounts = accounts;
            }
        }
        None => log::info!(target: "ledgerdash::store", "No ledger document yet, starting from defaults"),
    }
    Ok(data)
}

/// Parse a backup document from JSON text
pub fn parse_document(content: &str, origin: &str) -> StoreResult<BackupDocument> {
    serde_json::from_str(content).map_err(|source| StoreError::InvalidDocument {
        path: origin.to_string(),
        source,
    })
}

/// Ledger document kept in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Option<BackupDocument>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let document = parse_document(&content, &self.path.display().to_string())?;
        log::debug!(target: "ledgerdash::store", "Loaded ledger document from {}", self.path.display());
        Ok(Some(document))
    }

    async fn save(&self, data: &LedgerData) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&BackupDocument::from(data))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        // Write beside the target then rename so a crash never leaves half a file
        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| StoreError::io(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        log::debug!(
            target: "ledgerdash::store",
            "Saved {} transactions to {}",
            data.transactions.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Store that keeps the serialized document in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: tokio::sync::Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing JSON document
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: tokio::sync::Mutex::new(Some(content.into())),
        }
    }

    /// The last saved JSON text
    pub async fn content(&self) -> Option<String> {
        self.content.lock().await.clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> StoreResult<Option<BackupDocument>> {
        match self.content.lock().await.as_deref() {
            Some(content) => parse_document(content, "memory").map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, data: &LedgerData) -> StoreResult<()> {
        let content = serde_json::to_string(&BackupDocument::from(data))?;
        *self.content.lock().await = Some(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdash_core::{Direction, ReportGroup, Status, Transaction};

    fn invoice(amount: i64) -> Transaction {
        serde_json::from_value(serde_json::json!({
            "id": "t1", "companyId": "ps", "description": "Invoice", "amount": amount,
            "direction": "inflow", "status": "pending", "accountId": "stripe",
            "date": "2024-02-10", "category": "Vendas", "reportGroup": "GrossRevenue"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        assert!(store.load().await.unwrap().is_none());

        let data = load_or_seed(&store).await.unwrap();
        assert_eq!(data, LedgerData::seeded());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("ledger.json"));

        let mut data = LedgerData::seeded();
        data.transactions.push(invoice(1200));
        store.save(&data).await.unwrap();

        assert!(!store.temp_path().exists());
        let loaded = load_or_seed(&store).await.unwrap();
        assert_eq!(loaded, data);
        let tx: &Transaction = &loaded.transactions[0];
        assert_eq!(tx.status, Status::Pending);
        assert_eq!(tx.direction, Direction::Inflow);
        assert_eq!(tx.report_group, ReportGroup::GrossRevenue);
    }

    #[tokio::test]
    async fn test_partial_document_keeps_seeded_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"transacoes": []}"#).unwrap();

        let data = load_or_seed(&JsonFileStore::new(&path)).await.unwrap();
        assert!(data.transactions.is_empty());
        assert_eq!(data.categories.len(), 12);
        assert_eq!(data.accounts.len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());

        let data = LedgerData::seeded();
        store.save(&data).await.unwrap();
        assert!(store.content().await.unwrap().contains("categorias"));
        assert_eq!(load_or_seed(&store).await.unwrap(), data);
    }
}
