//! Core data models for the ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use ledgerdash_config::CompanyConfig;

use super::types::{AccountKind, Direction, ReportGroup, Status};

/// Account that settled money sits in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Short identifier referenced by transactions (e.g. "stripe")
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "tipo")]
    pub kind: AccountKind,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Category a transaction is filed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "tipo")]
    pub direction: Direction,
    /// Income-statement line copied into transactions filed here
    #[serde(default, alias = "grupoDRE")]
    pub report_group: ReportGroup,
}

/// Company a transaction belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Presentation-only badge color
    pub display_accent: String,
}

impl From<&CompanyConfig> for Company {
    fn from(config: &CompanyConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            display_accent: config.display_accent.clone(),
        }
    }
}

/// A single cash movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(alias = "empresa")]
    pub company_id: String,
    #[serde(default, alias = "descricao")]
    pub description: String,
    /// Unsigned amount; the sign comes from `direction`
    #[serde(alias = "valor")]
    pub amount: Decimal,
    #[serde(alias = "tipo")]
    pub direction: Direction,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "default_account_id", alias = "conta")]
    pub account_id: String,
    /// Transaction date (YYYY-MM-DD format)
    #[serde(alias = "data")]
    pub date: String,
    #[serde(default, alias = "categoria")]
    pub category: String,
    #[serde(default, alias = "grupoDRE")]
    pub report_group: ReportGroup,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Amount used by every aggregate. Negative stored values count by magnitude.
    pub fn amount_value(&self) -> Decimal {
        self.amount.abs()
    }

    /// Contribution to a running balance: positive for inflows
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Inflow => self.amount_value(),
            Direction::Outflow => -self.amount_value(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status == Status::Settled
    }

    pub fn is_inflow(&self) -> bool {
        self.direction == Direction::Inflow
    }

    /// Month key (`YYYY-MM`) for time-series bucketing
    pub fn month_key(&self) -> Option<String> {
        self.date_naive().map(|d| d.format("%Y-%m").to_string())
    }
}

/// Fields supplied by a caller when creating or editing a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(alias = "empresa")]
    pub company_id: String,
    #[serde(alias = "descricao")]
    pub description: String,
    #[serde(alias = "valor")]
    pub amount: Decimal,
    #[serde(alias = "tipo")]
    pub direction: Direction,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "default_account_id", alias = "conta")]
    pub account_id: String,
    #[serde(alias = "data")]
    pub date: String,
    #[serde(alias = "categoria")]
    pub category: String,
    /// Used only when no category with a matching name exists
    #[serde(default, alias = "grupoDRE")]
    pub report_group: ReportGroup,
}

impl TransactionDraft {
    /// Build the stored record under the given id
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            company_id: self.company_id,
            description: self.description,
            amount: self.amount,
            direction: self.direction,
            status: self.status,
            account_id: self.account_id,
            date: self.date,
            category: self.category,
            report_group: self.report_group,
        }
    }
}

/// New category as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "tipo")]
    pub direction: Direction,
    #[serde(default, alias = "grupoDRE")]
    pub report_group: ReportGroup,
}

/// New account as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    /// Optional explicit id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "tipo")]
    pub kind: AccountKind,
}

/// The user-editable collections of the working set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerData {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub accounts: Vec<Account>,
}

impl LedgerData {
    /// Default categories and accounts, no transactions
    pub fn seeded() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
            accounts: default_accounts(),
        }
    }
}

/// Portable backup document. Any key may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(rename = "transacoes", default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(rename = "categorias", default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(rename = "contas", default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Account>>,
}

impl From<&LedgerData> for BackupDocument {
    fn from(data: &LedgerData) -> Self {
        Self {
            transactions: Some(data.transactions.clone()),
            categories: Some(data.categories.clone()),
            accounts: Some(data.accounts.clone()),
        }
    }
}

fn default_account_id() -> String {
    "principal".to_string()
}

/// Older documents carry numeric ids; keep them as their decimal string.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

fn category(id: u32, name: &str, direction: Direction, report_group: ReportGroup) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        direction,
        report_group,
    }
}

fn default_categories() -> Vec<Category> {
    use Direction::{Inflow, Outflow};
    use ReportGroup::*;
    vec![
        category(1, "Receita SaaS", Inflow, GrossRevenue),
        category(2, "Receita Recorrente", Inflow, GrossRevenue),
        category(3, "Vendas", Inflow, GrossRevenue),
        category(4, "Infraestrutura TI", Outflow, Cogs),
        category(5, "Taxas Cartão", Outflow, VariableExpense),
        category(6, "Licenças", Outflow, Cogs),
        category(7, "Compra de Recargas", Outflow, Cogs),
        category(8, "Folha de Pagamento", Outflow, FixedExpense),
        category(9, "Marketing", Outflow, FixedExpense),
        category(10, "Contabilidade", Outflow, FixedExpense),
        category(11, "Aluguel", Outflow, FixedExpense),
        category(12, "Impostos", Outflow, SalesTax),
    ]
}

fn default_accounts() -> Vec<Account> {
    vec![
        Account::new("principal", "Banco Principal", AccountKind::Bank),
        Account::new("caixa", "Caixa Físico", AccountKind::Cash),
        Account::new("stripe", "Stripe (Gateway)", AccountKind::Gateway),
        Account::new("mp", "Mercado Pago", AccountKind::Gateway),
    ]
}
