//! Data quality checks over a loaded or restored working set
//!
//! Reports never fail on malformed records; they fall back instead. These
//! checks list the records that hit a fallback so they can be logged.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Company, LedgerData, Transaction};
use crate::types::ReportGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// Stored amount below zero; counted by magnitude
    NegativeAmount,
    /// Date is not `YYYY-MM-DD`; kept only under all-time
    InvalidDate,
    /// Report group outside the known set; counted as variable expense
    UnclassifiedGroup,
    UnknownAccount,
    UnknownCompany,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::NegativeAmount => write!(f, "negative amount"),
            IssueKind::InvalidDate => write!(f, "invalid date"),
            IssueKind::UnclassifiedGroup => write!(f, "unclassified report group"),
            IssueKind::UnknownAccount => write!(f, "unknown account"),
            IssueKind::UnknownCompany => write!(f, "unknown company"),
        }
    }
}

/// A single malformed field on a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIssue {
    pub transaction_id: String,
    pub kind: IssueKind,
    /// The offending value as stored
    pub detail: String,
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transaction {}: {} ({})", self.transaction_id, self.kind, self.detail)
    }
}

/// List every fallback the reports will apply to `data`
pub fn inspect(data: &LedgerData, companies: &[Company]) -> Vec<DataIssue> {
    let accounts: HashSet<&str> = data.accounts.iter().map(|a| a.id.as_str()).collect();
    let company_ids: HashSet<&str> = companies.iter().map(|c| c.id.as_str()).collect();

    let mut issues = Vec::new();
    for tx in &data.transactions {
        inspect_transaction(tx, &accounts, &company_ids, &mut issues);
    }
    issues
}

fn inspect_transaction(
    tx: &Transaction,
    accounts: &HashSet<&str>,
    companies: &HashSet<&str>,
    issues: &mut Vec<DataIssue>,
) {
    let mut push = |kind: IssueKind, detail: String| {
        issues.push(DataIssue {
            transaction_id: tx.id.clone(),
            kind,
            detail,
        })
    };

    if tx.amount < Decimal::ZERO {
        push(IssueKind::NegativeAmount, tx.amount.to_string());
    }
    if tx.date_naive().is_none() {
        push(IssueKind::InvalidDate, tx.date.clone());
    }
    if tx.report_group == ReportGroup::Unclassified {
        push(IssueKind::UnclassifiedGroup, tx.category.clone());
    }
    if !accounts.contains(tx.account_id.as_str()) {
        push(IssueKind::UnknownAccount, tx.account_id.clone());
    }
    if !companies.contains(tx.company_id.as_str()) {
        push(IssueKind::UnknownCompany, tx.company_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{companies, on_account, tx};
    use crate::types::{Direction, Status};

    #[test]
    fn test_clean_data_has_no_issues() {
        let mut data = LedgerData::seeded();
        data.transactions.push(tx("1", "ps", "10", Direction::Inflow, Status::Settled, "2024-01-01", ReportGroup::GrossRevenue));
        assert!(inspect(&data, &companies()).is_empty());
    }

    #[test]
    fn test_every_issue_kind() {
        let mut data = LedgerData::seeded();
        data.transactions.push(on_account(
            tx("bad", "acme", "-5", Direction::Outflow, Status::Settled, "05/01/2024", ReportGroup::Unclassified),
            "offshore",
        ));
        let issues = inspect(&data, &companies());
        let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::NegativeAmount,
                IssueKind::InvalidDate,
                IssueKind::UnclassifiedGroup,
                IssueKind::UnknownAccount,
                IssueKind::UnknownCompany,
            ]
        );
        assert_eq!(issues[3].detail, "offshore");
        assert!(issues[0].to_string().starts_with("transaction bad: negative amount"));
    }
}
