//! Basic types for the core ledger module
//!
//! Serialized names follow the dashboard's JSON format. Aliases accept the
//! labels written by the legacy Portuguese front end so older backups
//! restore unchanged.

use ledgerdash_config::is_consolidated_alias;
use serde::{Deserialize, Serialize};

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money coming in
    #[serde(alias = "entrada")]
    Inflow,
    /// Money going out
    #[serde(alias = "saida")]
    Outflow,
}

impl std::str::FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inflow" | "entrada" => Ok(Direction::Inflow),
            "outflow" | "saida" => Ok(Direction::Outflow),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Inflow => write!(f, "inflow"),
            Direction::Outflow => write!(f, "outflow"),
        }
    }
}

/// Payment-completion state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(alias = "pago")]
    Settled,
    #[serde(alias = "pendente")]
    Pending,
}

impl Default for Status {
    fn default() -> Self {
        Status::Settled
    }
}

impl Status {
    /// The other state, used by the settle/unsettle toggle
    pub fn toggled(self) -> Self {
        match self {
            Status::Settled => Status::Pending,
            Status::Pending => Status::Settled,
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "settled" | "pago" => Ok(Status::Settled),
            "pending" | "pendente" => Ok(Status::Pending),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Settled => write!(f, "settled"),
            Status::Pending => write!(f, "pending"),
        }
    }
}

/// Income-statement line a transaction rolls up into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportGroup {
    #[serde(rename = "GrossRevenue", alias = "Receita Bruta")]
    GrossRevenue,
    #[serde(rename = "VariableExpense", alias = "Despesas Variáveis")]
    VariableExpense,
    #[serde(rename = "COGS", alias = "Custo do Serviço (CMV)")]
    Cogs,
    #[serde(rename = "FixedExpense", alias = "Despesas Fixas")]
    FixedExpense,
    #[serde(rename = "SalesTax", alias = "Impostos sobre Venda")]
    SalesTax,
    /// Any label outside the closed set; reported as VariableExpense
    #[serde(other)]
    Unclassified,
}

impl Default for ReportGroup {
    fn default() -> Self {
        ReportGroup::Unclassified
    }
}

impl ReportGroup {
    /// The group reports actually use. Unclassified falls back to
    /// VariableExpense so it never drops out of a total.
    pub fn effective(self) -> ReportGroup {
        match self {
            ReportGroup::GrossRevenue => ReportGroup::GrossRevenue,
            ReportGroup::VariableExpense => ReportGroup::VariableExpense,
            ReportGroup::Cogs => ReportGroup::Cogs,
            ReportGroup::FixedExpense => ReportGroup::FixedExpense,
            ReportGroup::SalesTax => ReportGroup::SalesTax,
            ReportGroup::Unclassified => ReportGroup::VariableExpense,
        }
    }
}

impl std::str::FromStr for ReportGroup {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GrossRevenue" | "Receita Bruta" => Ok(ReportGroup::GrossRevenue),
            "VariableExpense" | "Despesas Variáveis" => Ok(ReportGroup::VariableExpense),
            "COGS" | "Custo do Serviço (CMV)" => Ok(ReportGroup::Cogs),
            "FixedExpense" | "Despesas Fixas" => Ok(ReportGroup::FixedExpense),
            "SalesTax" | "Impostos sobre Venda" => Ok(ReportGroup::SalesTax),
            _ => Err(format!("Invalid report group: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportGroup::GrossRevenue => write!(f, "GrossRevenue"),
            ReportGroup::VariableExpense => write!(f, "VariableExpense"),
            ReportGroup::Cogs => write!(f, "COGS"),
            ReportGroup::FixedExpense => write!(f, "FixedExpense"),
            ReportGroup::SalesTax => write!(f, "SalesTax"),
            ReportGroup::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// Kind of place money settles into or out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[serde(alias = "banco")]
    Bank,
    #[serde(alias = "caixa")]
    Cash,
    Gateway,
}

impl Default for AccountKind {
    fn default() -> Self {
        AccountKind::Bank
    }
}

impl std::str::FromStr for AccountKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank" | "banco" => Ok(AccountKind::Bank),
            "cash" | "caixa" => Ok(AccountKind::Cash),
            "gateway" => Ok(AccountKind::Gateway),
            _ => Err(format!("Invalid account kind: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Bank => write!(f, "bank"),
            AccountKind::Cash => write!(f, "cash"),
            AccountKind::Gateway => write!(f, "gateway"),
        }
    }
}

/// Set of companies an aggregation covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scope {
    /// All companies combined
    Consolidated,
    /// A single company id
    Company(String),
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Consolidated
    }
}

impl Scope {
    /// Check whether a company id falls inside this scope
    pub fn includes(&self, company_id: &str) -> bool {
        match self {
            Scope::Consolidated => true,
            Scope::Company(id) => id == company_id,
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("Empty scope".to_string())
        } else if is_consolidated_alias(s) {
            Ok(Scope::Consolidated)
        } else {
            Ok(Scope::Company(s.to_string()))
        }
    }
}

impl TryFrom<String> for Scope {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.to_string()
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Consolidated => write!(f, "consolidated"),
            Scope::Company(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("inflow".parse::<Direction>().unwrap(), Direction::Inflow);
        assert_eq!("saida".parse::<Direction>().unwrap(), Direction::Outflow);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(Status::Settled.toggled(), Status::Pending);
        assert_eq!(Status::Pending.toggled(), Status::Settled);
    }

    #[test]
    fn test_report_group_serde_aliases() {
        let group: ReportGroup = serde_json::from_str("\"Despesas Fixas\"").unwrap();
        assert_eq!(group, ReportGroup::FixedExpense);
        let group: ReportGroup = serde_json::from_str("\"COGS\"").unwrap();
        assert_eq!(group, ReportGroup::Cogs);
        assert_eq!(serde_json::to_string(&ReportGroup::Cogs).unwrap(), "\"COGS\"");
    }

    #[test]
    fn test_unknown_report_group_is_unclassified() {
        let group: ReportGroup = serde_json::from_str("\"Marketing Stuff\"").unwrap();
        assert_eq!(group, ReportGroup::Unclassified);
        assert_eq!(group.effective(), ReportGroup::VariableExpense);
        assert_eq!(ReportGroup::FixedExpense.effective(), ReportGroup::FixedExpense);
    }

    #[test]
    fn test_account_kind_aliases() {
        let kind: AccountKind = serde_json::from_str("\"banco\"").unwrap();
        assert_eq!(kind, AccountKind::Bank);
        assert_eq!("caixa".parse::<AccountKind>().unwrap(), AccountKind::Cash);
    }

    #[test]
    fn test_scope_parse_and_includes() {
        assert_eq!("consolidado".parse::<Scope>().unwrap(), Scope::Consolidated);
        assert_eq!(" Consolidated ".parse::<Scope>().unwrap(), Scope::Consolidated);
        assert!("  ".parse::<Scope>().is_err());
        let scope: Scope = "ps".parse().unwrap();
        assert!(scope.includes("ps"));
        assert!(!scope.includes("afm"));
        assert!(Scope::Consolidated.includes("afm"));
        assert!("  ".parse::<Scope>().is_err());
    }

    #[test]
    fn test_scope_serializes_as_string() {
        let json = serde_json::to_string(&Scope::Company("afm".to_string())).unwrap();
        assert_eq!(json, "\"afm\"");
        let scope: Scope = serde_json::from_str("\"consolidated\"").unwrap();
        assert_eq!(scope, Scope::Consolidated);
    }
}
