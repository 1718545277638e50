//! Assemble every report for one query

use chrono::NaiveDate;
use ledgerdash_config::{DashboardConfig, Regime};
use serde::{Deserialize, Serialize};

use crate::balance::account_balances;
use crate::breakdown::{category_breakdown, DEFAULT_TOP_CATEGORIES};
use crate::filter::{filter_range, scoped, scoped_in_regime};
use crate::income::income_statement;
use crate::kpi::kpis;
use crate::models::LedgerData;
use crate::reports::{Dashboard, ReportPeriod};
use crate::series::{cumulative_series, expense_stack_series, flow_series, DEFAULT_SERIES_MONTHS};
use crate::time::TimeContext;
use crate::treasury::treasury;
use crate::types::Scope;

/// Scope, period and regime selection plus chart sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub scope: Scope,
    pub time: TimeContext,
    pub regime: Regime,
    pub top_categories: usize,
    pub series_months: usize,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            scope: Scope::Consolidated,
            time: TimeContext::default(),
            regime: Regime::Cash,
            top_categories: DEFAULT_TOP_CATEGORIES,
            series_months: DEFAULT_SERIES_MONTHS,
        }
    }
}

impl DashboardQuery {
    pub fn new(scope: Scope, time: TimeContext, regime: Regime) -> Self {
        Self {
            scope,
            time,
            regime,
            ..Self::default()
        }
    }

    /// Take chart sizes from the dashboard configuration
    pub fn with_limits(mut self, config: &DashboardConfig) -> Self {
        self.top_categories = config.top_categories;
        self.series_months = config.series_months;
        self
    }
}

/// Run every report over `data` for the query
pub fn build(data: &LedgerData, query: &DashboardQuery, today: NaiveDate, version: u64) -> Dashboard {
    let txs = &data.transactions;
    let range = query.time.range(today);

    let filtered = filter_range(txs, &query.scope, &range, query.regime);
    let scoped_all = scoped(txs, &query.scope);
    let scoped_regime = scoped_in_regime(txs, &query.scope, query.regime);

    Dashboard {
        scope: query.scope.to_string(),
        regime: query.regime.to_string(),
        period: ReportPeriod {
            period: query.time.period.to_string(),
            description: query.time.description(),
            start_date: range.start.map(|d| d.to_string()),
            end_date: range.end.map(|d| d.to_string()),
        },
        today: today.to_string(),
        balances: account_balances(scoped_all.iter().copied(), &data.accounts),
        kpis: kpis(filtered.iter().copied()),
        treasury: treasury(scoped_all.iter().copied()),
        flow_series: flow_series(scoped_regime.iter().copied(), query.series_months),
        cumulative_series: cumulative_series(scoped_regime.iter().copied(), today),
        expense_stack_series: expense_stack_series(scoped_regime.iter().copied(), query.series_months),
        category_breakdown: category_breakdown(filtered.iter().copied(), query.top_categories),
        income_statement: income_statement(scoped_all.iter().copied()),
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, scenario};
    use ledgerdash_config::Period;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 31).unwrap()
    }

    #[test]
    fn test_company_scope_all_time_cash() {
        let data = scenario();
        let query = DashboardQuery::new(
            Scope::Company("ps".to_string()),
            TimeContext::new(Period::AllTime),
            Regime::Cash,
        );
        let dashboard = build(&data, &query, today(), 3);

        assert_eq!(dashboard.kpis.revenue, dec("15000"));
        assert_eq!(dashboard.kpis.expense, dec("890"));
        assert_eq!(dashboard.kpis.profit, dec("14110"));
        assert_eq!(dashboard.kpis.margin.round_dp(2), dec("94.07"));
        assert_eq!(dashboard.income_statement.operating_profit, dec("14110"));
        assert_eq!(dashboard.period.start_date, None);
        assert_eq!(dashboard.scope, "ps");
        assert_eq!(dashboard.version, 3);
    }

    #[test]
    fn test_consolidated_current_month() {
        let data = scenario();
        let query = DashboardQuery::new(Scope::Consolidated, TimeContext::new(Period::CurrentMonth), Regime::Cash);
        let dashboard = build(&data, &query, today(), 0);

        assert_eq!(dashboard.income_statement.operating_profit, dec("2110"));
        assert_eq!(dashboard.kpis.transaction_count, 3);
        assert_eq!(dashboard.treasury.settled_balance, dec("2110"));
        assert_eq!(dashboard.balances.total, dec("2110"));
        assert_eq!(dashboard.period.start_date.as_deref(), Some("2023-10-01"));
        assert_eq!(dashboard.period.end_date.as_deref(), Some("2023-10-31"));
        assert_eq!(dashboard.category_breakdown.len(), 2);
        assert_eq!(dashboard.cumulative_series.len(), 1);
        assert_eq!(dashboard.cumulative_series[0].balance, dec("2110"));
    }

    #[test]
    fn test_period_outside_data_keeps_lifetime_reports() {
        let data = scenario();
        let query = DashboardQuery::new(Scope::Consolidated, TimeContext::new(Period::PreviousMonth), Regime::Cash);
        let dashboard = build(&data, &query, today(), 0);

        assert_eq!(dashboard.kpis.transaction_count, 0);
        assert!(dashboard.category_breakdown.is_empty());
        assert_eq!(dashboard.balances.total, dec("2110"));
        assert_eq!(dashboard.income_statement.operating_profit, dec("2110"));
    }

    #[test]
    fn test_empty_ledger() {
        let data = LedgerData::seeded();
        let dashboard = build(&data, &DashboardQuery::default(), today(), 0);

        assert_eq!(dashboard.kpis.revenue, Decimal::ZERO);
        assert_eq!(dashboard.kpis.margin, Decimal::ZERO);
        assert_eq!(dashboard.treasury.projected_balance, Decimal::ZERO);
        assert_eq!(dashboard.balances.total, Decimal::ZERO);
        assert_eq!(dashboard.balances.rows.len(), 4);
        assert!(dashboard.category_breakdown.is_empty());
        assert!(dashboard.flow_series.is_empty());
        assert!(dashboard.cumulative_series.is_empty());
        assert_eq!(dashboard.income_statement.operating_profit, Decimal::ZERO);
    }
}
