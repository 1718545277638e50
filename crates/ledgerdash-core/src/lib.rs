//! Core ledger processing and business logic
//!
//! The report builders are plain functions over borrowed transactions.
//! [`Ledger`] owns the editable working set and validates every write.

pub mod arith;
pub mod balance;
pub mod breakdown;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod income;
pub mod kpi;
pub mod models;
pub mod quality;
pub mod reports;
pub mod series;
pub mod time;
pub mod treasury;
pub mod types;

use chrono::NaiveDate;
use ledgerdash_config::CompanyConfig;
use rust_decimal::Decimal;

pub use dashboard::DashboardQuery;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{
    Account, AccountDraft, BackupDocument, Category, CategoryDraft, Company, LedgerData,
    Transaction, TransactionDraft,
};
pub use quality::{DataIssue, IssueKind};
pub use reports::*;
pub use time::{DateRange, TimeContext, TimeFilter};
pub use types::{AccountKind, Direction, ReportGroup, Scope, Status};

/// Largest amount a single transaction may carry (10^15)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// What a restore replaced
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreSummary {
    pub transactions: Option<usize>,
    pub categories: Option<usize>,
    pub accounts: Option<usize>,
}

/// Main ledger structure
#[derive(Debug, Clone)]
pub struct Ledger {
    data: LedgerData,
    companies: Vec<Company>,
    /// Bumped on every successful mutation
    version: u64,
}

impl Ledger {
    /// Create a ledger over existing data
    pub fn new(data: LedgerData, companies: Vec<Company>) -> Self {
        Self {
            data,
            companies,
            version: 0,
        }
    }

    /// Create a ledger with the configured companies
    pub fn with_companies(data: LedgerData, companies: &[CompanyConfig]) -> Self {
        Self::new(data, companies.iter().map(Company::from).collect())
    }

    pub fn data(&self) -> &LedgerData {
        &self.data
    }

    /// Owned copy of the working set for persisting outside a lock
    pub fn snapshot(&self) -> LedgerData {
        self.data.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn accounts(&self) -> &[Account] {
        &self.data.accounts
    }

    // ==================== Transactions ====================

    /// All transactions, newest date first. Invalid dates sort last.
    pub fn transactions_sorted(&self) -> Vec<Transaction> {
        let mut txs = self.data.transactions.clone();
        txs.sort_by(|a, b| b.date_naive().cmp(&a.date_naive()));
        txs
    }

    pub fn transaction(&self, id: &str) -> CoreResult<&Transaction> {
        self.data
            .transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })
    }

    /// Record a new transaction; it is placed first in the list
    pub fn create_transaction(&mut self, draft: TransactionDraft) -> CoreResult<Transaction> {
        let draft = self.prepare_draft(draft)?;
        let tx = draft.into_transaction(ledgerdash_utils::generate_id());
        self.data.transactions.insert(0, tx.clone());
        self.touch();
        log::debug!(target: "ledgerdash::ledger", "Created transaction {} ({})", tx.id, tx.description);
        Ok(tx)
    }

    /// Replace every field of a transaction, keeping its id
    pub fn update_transaction(&mut self, id: &str, draft: TransactionDraft) -> CoreResult<Transaction> {
        let position = self.position_of(id)?;
        let draft = self.prepare_draft(draft)?;
        let tx = draft.into_transaction(id.to_string());
        self.data.transactions[position] = tx.clone();
        self.touch();
        log::debug!(target: "ledgerdash::ledger", "Updated transaction {}", id);
        Ok(tx)
    }

    /// Flip between settled and pending
    pub fn toggle_status(&mut self, id: &str) -> CoreResult<Transaction> {
        let position = self.position_of(id)?;
        let tx = &mut self.data.transactions[position];
        tx.status = tx.status.toggled();
        let tx = tx.clone();
        self.touch();
        log::debug!(target: "ledgerdash::ledger", "Transaction {} is now {}", id, tx.status);
        Ok(tx)
    }

    pub fn delete_transaction(&mut self, id: &str) -> CoreResult<Transaction> {
        let position = self.position_of(id)?;
        let tx = self.data.transactions.remove(position);
        self.touch();
        log::debug!(target: "ledgerdash::ledger", "Deleted transaction {}", id);
        Ok(tx)
    }

    fn position_of(&self, id: &str) -> CoreResult<usize> {
        self.data
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })
    }

    /// Validate a draft and snapshot the report group of its category
    fn prepare_draft(&self, mut draft: TransactionDraft) -> CoreResult<TransactionDraft> {
        if draft.description.trim().is_empty() {
            return Err(CoreError::ValidationError {
                message: "Description must not be empty".to_string(),
            });
        }
        if draft.category.trim().is_empty() {
            return Err(CoreError::ValidationError {
                message: "Category must not be empty".to_string(),
            });
        }
        if draft.amount < Decimal::ZERO {
            return Err(CoreError::ValidationError {
                message: format!("Amount must not be negative, got {}", draft.amount),
            });
        }
        if draft.amount > MAX_AMOUNT {
            return Err(CoreError::ValidationError {
                message: format!("Amount must not exceed {}, got {}", MAX_AMOUNT, draft.amount),
            });
        }
        if NaiveDate::parse_from_str(&draft.date, "%Y-%m-%d").is_err() {
            return Err(CoreError::InvalidFormat {
                message: format!("Invalid date '{}'", draft.date),
            });
        }
        if !self.companies.iter().any(|c| c.id == draft.company_id) {
            return Err(CoreError::CompanyNotFound {
                id: draft.company_id.clone(),
            });
        }
        if !self.data.accounts.iter().any(|a| a.id == draft.account_id) {
            return Err(CoreError::AccountNotFound {
                id: draft.account_id.clone(),
            });
        }

        if let Some(category) = self.data.categories.iter().find(|c| c.name == draft.category) {
            draft.report_group = category.report_group;
        }
        Ok(draft)
    }

    // ==================== Categories and accounts ====================

    /// Add a category; names are unique
    pub fn add_category(&mut self, draft: CategoryDraft) -> CoreResult<Category> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::ValidationError {
                message: "Category name must not be empty".to_string(),
            });
        }
        if self.data.categories.iter().any(|c| c.name == name) {
            return Err(CoreError::DuplicateEntry { entry: name });
        }

        let category = Category {
            id: ledgerdash_utils::generate_id(),
            name,
            direction: draft.direction,
            report_group: draft.report_group,
        };
        self.data.categories.push(category.clone());
        self.touch();
        Ok(category)
    }

    /// Remove a category. Transactions keep their copied name and group.
    pub fn delete_category(&mut self, id: &str) -> CoreResult<Category> {
        let position = self
            .data
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound { id: id.to_string() })?;
        let category = self.data.categories.remove(position);
        self.touch();
        Ok(category)
    }

    pub fn add_account(&mut self, draft: AccountDraft) -> CoreResult<Account> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::ValidationError {
                message: "Account name must not be empty".to_string(),
            });
        }
        let id = match draft.id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => id,
            _ => ledgerdash_utils::generate_id(),
        };
        if self.data.accounts.iter().any(|a| a.id == id) {
            return Err(CoreError::DuplicateEntry { entry: id });
        }

        let account = Account::new(id, name, draft.kind);
        self.data.accounts.push(account.clone());
        self.touch();
        Ok(account)
    }

    /// Remove an account. Its settled flows show up as unassigned.
    pub fn delete_account(&mut self, id: &str) -> CoreResult<Account> {
        let position = self
            .data
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::AccountNotFound { id: id.to_string() })?;
        let account = self.data.accounts.remove(position);
        self.touch();
        Ok(account)
    }

    // ==================== Backup ====================

    pub fn export(&self) -> BackupDocument {
        BackupDocument::from(&self.data)
    }

    /// Replace the collections present in the document; missing keys leave
    /// the corresponding collection untouched.
    pub fn restore(&mut self, document: BackupDocument) -> RestoreSummary {
        let mut summary = RestoreSummary::default();
        if let Some(transactions) = document.transactions {
            summary.transactions = Some(transactions.len());
            self.data.transactions = transactions;
        }
        if let Some(categories) = document.categories {
            summary.categories = Some(categories.len());
            self.data.categories = categories;
        }
        if let Some(accounts) = document.accounts {
            summary.accounts = Some(accounts.len());
            self.data.accounts = accounts;
        }
        self.touch();
        log::info!(target: "ledgerdash::ledger", "Restored backup: {:?}", summary);
        summary
    }

    // ==================== Reports ====================

    /// Parse a scope selector, rejecting company ids that are not configured
    pub fn parse_scope(&self, value: &str) -> CoreResult<Scope> {
        let scope: Scope = value
            .parse()
            .map_err(|message| CoreError::ValidationError { message })?;
        if let Scope::Company(id) = &scope {
            if !self.companies.iter().any(|c| &c.id == id) {
                return Err(CoreError::CompanyNotFound { id: id.clone() });
            }
        }
        Ok(scope)
    }

    pub fn dashboard(&self, query: &DashboardQuery, today: NaiveDate) -> Dashboard {
        dashboard::build(&self.data, query, today, self.version)
    }

    /// Records the reports will treat with a fallback
    pub fn issues(&self) -> Vec<DataIssue> {
        quality::inspect(&self.data, &self.companies)
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}
