//! Monthly time series for the dashboard charts
//!
//! All builders take the scoped, regime-filtered set. Transactions whose
//! date does not parse are skipped.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use ledgerdash_utils::month_label;
use rust_decimal::Decimal;

use crate::arith::sat_add;
use crate::models::Transaction;
use crate::reports::{CumulativePoint, ExpenseStackPoint, FlowPoint};
use crate::types::ReportGroup;

/// Default number of trailing months in the flow and stacked series
pub const DEFAULT_SERIES_MONTHS: usize = 6;

/// Inflow and outflow per month, ascending, last `months` months with data
pub fn flow_series<'a, I>(transactions: I, months: usize) -> Vec<FlowPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let Some(month) = tx.month_key() else { continue };
        let entry = buckets.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        if tx.is_inflow() {
            entry.0 = sat_add(entry.0, tx.amount_value());
        } else {
            entry.1 = sat_add(entry.1, tx.amount_value());
        }
    }

    let points: Vec<FlowPoint> = buckets
        .into_iter()
        .map(|(month, (inflow, outflow))| FlowPoint {
            label: month_label(&month),
            month,
            inflow,
            outflow,
        })
        .collect();
    last_n(points, months)
}

/// Running balance per month from the earliest month present through
/// today's month. Months without movement repeat the previous balance.
pub fn cumulative_series<'a, I>(transactions: I, today: NaiveDate) -> Vec<CumulativePoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut deltas: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in transactions {
        let Some(date) = tx.date_naive() else { continue };
        let delta = deltas.entry(month_start(date)).or_insert(Decimal::ZERO);
        *delta = sat_add(*delta, tx.signed_amount());
    }

    let Some(first) = deltas.keys().next().copied() else {
        return Vec::new();
    };
    let last = month_start(today);

    let mut points = Vec::new();
    let mut balance = Decimal::ZERO;
    let mut cursor = first;
    while cursor <= last {
        balance = sat_add(balance, deltas.get(&cursor).copied().unwrap_or(Decimal::ZERO));
        let month = cursor.format("%Y-%m").to_string();
        points.push(CumulativePoint {
            label: month_label(&month),
            month,
            balance,
        });
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    points
}

/// Outflows per month split into the four expense groups
pub fn expense_stack_series<'a, I>(transactions: I, months: usize) -> Vec<ExpenseStackPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<String, ExpenseStackPoint> = BTreeMap::new();
    for tx in transactions.into_iter().filter(|t| !t.is_inflow()) {
        let Some(month) = tx.month_key() else { continue };
        let point = buckets.entry(month.clone()).or_insert_with(|| ExpenseStackPoint {
            label: month_label(&month),
            month,
            fixed_expense: Decimal::ZERO,
            variable_expense: Decimal::ZERO,
            cogs: Decimal::ZERO,
            sales_tax: Decimal::ZERO,
        });
        let amount = tx.amount_value();
        match tx.report_group.effective() {
            ReportGroup::FixedExpense => point.fixed_expense = sat_add(point.fixed_expense, amount),
            ReportGroup::Cogs => point.cogs = sat_add(point.cogs, amount),
            ReportGroup::SalesTax => point.sales_tax = sat_add(point.sales_tax, amount),
            ReportGroup::VariableExpense | ReportGroup::GrossRevenue | ReportGroup::Unclassified => {
                point.variable_expense = sat_add(point.variable_expense, amount)
            }
        }
    }

    last_n(buckets.into_values().collect(), months)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_n<T>(mut points: Vec<T>, n: usize) -> Vec<T> {
    if points.len() > n {
        points.drain(..points.len() - n);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, tx};
    use crate::types::{Direction, Status};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_flow_series_last_six_months() {
        let data: Vec<Transaction> = (1..=8)
            .map(|m| {
                tx(&m.to_string(), "ps", "100", Direction::Inflow, Status::Settled, &format!("2024-{:02}-15", m), ReportGroup::GrossRevenue)
            })
            .chain(std::iter::once(tx("x", "ps", "30", Direction::Outflow, Status::Settled, "2024-08-20", ReportGroup::FixedExpense)))
            .chain(std::iter::once(tx("bad", "ps", "999", Direction::Inflow, Status::Settled, "garbage", ReportGroup::GrossRevenue)))
            .collect();

        let series = flow_series(&data, DEFAULT_SERIES_MONTHS);
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, "2024-03");
        assert_eq!(series[5].month, "2024-08");
        assert_eq!(series[5].label, "08/24");
        assert_eq!(series[5].inflow, dec("100"));
        assert_eq!(series[5].outflow, dec("30"));
    }

    #[test]
    fn test_cumulative_fills_gaps_until_today() {
        let data = vec![
            tx("1", "ps", "100", Direction::Inflow, Status::Settled, "2024-01-10", ReportGroup::GrossRevenue),
            tx("2", "ps", "40", Direction::Outflow, Status::Settled, "2024-03-05", ReportGroup::FixedExpense),
            tx("3", "ps", "500", Direction::Inflow, Status::Settled, "2024-09-01", ReportGroup::GrossRevenue),
        ];
        let series = cumulative_series(&data, date(2024, 4, 2));
        let balances: Vec<Decimal> = series.iter().map(|p| p.balance).collect();
        assert_eq!(series.first().map(|p| p.month.as_str()), Some("2024-01"));
        assert_eq!(series.last().map(|p| p.month.as_str()), Some("2024-04"));
        assert_eq!(balances, vec![dec("100"), dec("100"), dec("60"), dec("60")]);
    }

    #[test]
    fn test_cumulative_prefix_matches_monthly_nets() {
        let data = vec![
            tx("1", "ps", "300", Direction::Inflow, Status::Settled, "2023-11-10", ReportGroup::GrossRevenue),
            tx("2", "ps", "450", Direction::Outflow, Status::Settled, "2023-12-05", ReportGroup::FixedExpense),
            tx("3", "ps", "20", Direction::Inflow, Status::Settled, "2024-01-05", ReportGroup::GrossRevenue),
            tx("4", "ps", "70", Direction::Outflow, Status::Settled, "2024-01-25", ReportGroup::Cogs),
        ];
        let series = cumulative_series(&data, date(2024, 1, 31));
        let nets = [dec("300"), dec("-450"), dec("-50")];
        let mut running = Decimal::ZERO;
        for (point, net) in series.iter().zip(nets.iter()) {
            running += *net;
            assert_eq!(point.balance, running);
        }
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_cumulative_non_decreasing_for_positive_nets() {
        let data = vec![
            tx("1", "ps", "10", Direction::Inflow, Status::Settled, "2024-01-10", ReportGroup::GrossRevenue),
            tx("2", "ps", "5", Direction::Inflow, Status::Settled, "2024-03-10", ReportGroup::GrossRevenue),
        ];
        let series = cumulative_series(&data, date(2024, 6, 1));
        assert!(series.windows(2).all(|w| w[0].balance <= w[1].balance));
    }

    #[test]
    fn test_cumulative_empty() {
        assert!(cumulative_series(&Vec::<Transaction>::new(), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_expense_stack_groups() {
        let data = vec![
            tx("1", "ps", "100", Direction::Outflow, Status::Settled, "2024-02-01", ReportGroup::FixedExpense),
            tx("2", "ps", "10", Direction::Outflow, Status::Settled, "2024-02-02", ReportGroup::Unclassified),
            tx("3", "ps", "5", Direction::Outflow, Status::Settled, "2024-02-03", ReportGroup::GrossRevenue),
            tx("4", "ps", "7", Direction::Outflow, Status::Settled, "2024-02-04", ReportGroup::Cogs),
            tx("5", "ps", "3", Direction::Outflow, Status::Settled, "2024-02-05", ReportGroup::SalesTax),
            tx("6", "ps", "999", Direction::Inflow, Status::Settled, "2024-02-06", ReportGroup::GrossRevenue),
        ];
        let series = expense_stack_series(&data, DEFAULT_SERIES_MONTHS);
        assert_eq!(series.len(), 1);
        let point = &series[0];
        assert_eq!(point.fixed_expense, dec("100"));
        assert_eq!(point.variable_expense, dec("15"));
        assert_eq!(point.cogs, dec("7"));
        assert_eq!(point.sales_tax, dec("3"));
    }
}
