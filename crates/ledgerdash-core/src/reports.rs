//! Report structures for API responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::AccountKind;

/// Lifetime settled balance of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRow {
    pub account_id: String,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
}

/// Balance report for all accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// One row per account, in account order
    pub rows: Vec<BalanceRow>,
    /// Sum of `rows`
    pub total: Decimal,
    /// Settled flows booked to account ids that are not in the list
    pub unassigned: Decimal,
}

/// Headline figures over the filtered view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub revenue: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
    /// Profit as a percentage of revenue; 0 without revenue
    pub margin: Decimal,
    pub fee_total: Decimal,
    pub transaction_count: usize,
}

/// Settled position plus what is still pending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treasury {
    pub settled_balance: Decimal,
    pub receivable: Decimal,
    pub payable: Decimal,
    pub projected_balance: Decimal,
}

/// Monthly inflow and outflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowPoint {
    /// `YYYY-MM`
    pub month: String,
    /// `MM/YY`
    pub label: String,
    pub inflow: Decimal,
    pub outflow: Decimal,
}

/// Running balance at the end of a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePoint {
    pub month: String,
    pub label: String,
    pub balance: Decimal,
}

/// Monthly outflows split by report group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStackPoint {
    pub month: String,
    pub label: String,
    pub fixed_expense: Decimal,
    pub variable_expense: Decimal,
    pub cogs: Decimal,
    pub sales_tax: Decimal,
}

/// One slice of the expense category chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of the displayed total
    pub share: Decimal,
    pub color: String,
}

/// Monthly income statement (DRE) waterfall
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub gross_revenue: Decimal,
    pub sales_tax: Decimal,
    pub net_revenue: Decimal,
    pub variable_costs: Decimal,
    pub contribution_margin: Decimal,
    pub fixed_expenses: Decimal,
    pub operating_profit: Decimal,
}

/// Report period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    /// Selector name, e.g. "current-month"
    pub period: String,
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Every report for one scope/period/regime query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub scope: String,
    pub regime: String,
    pub period: ReportPeriod,
    /// Reference date the period was resolved against
    pub today: String,
    pub balances: BalanceReport,
    pub kpis: Kpis,
    pub treasury: Treasury,
    pub flow_series: Vec<FlowPoint>,
    pub cumulative_series: Vec<CumulativePoint>,
    pub expense_stack_series: Vec<ExpenseStackPoint>,
    pub category_breakdown: Vec<CategorySlice>,
    pub income_statement: IncomeStatement,
    /// Working-set version the reports were computed from
    pub version: u64,
}
