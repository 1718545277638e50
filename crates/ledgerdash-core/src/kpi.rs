//! Revenue, expense, profit and margin over the filtered view

use rust_decimal::Decimal;

use crate::arith::{percent, sat_add, sat_sub};
use crate::models::Transaction;
use crate::reports::Kpis;
use crate::types::ReportGroup;

/// Category name fragments that mark a payment-processing fee
const FEE_MARKERS: [&str; 2] = ["fee", "taxa"];

/// Whether an outflow counts toward the fee total.
///
/// Every variable expense counts, plus any category whose name mentions a fee.
pub fn is_fee(tx: &Transaction) -> bool {
    if tx.is_inflow() {
        return false;
    }
    if tx.report_group.effective() == ReportGroup::VariableExpense {
        return true;
    }
    let category = tx.category.to_lowercase();
    FEE_MARKERS.iter().any(|marker| category.contains(marker))
}

pub fn kpis<'a, I>(transactions: I) -> Kpis
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut revenue = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut fee_total = Decimal::ZERO;
    let mut transaction_count = 0;

    for tx in transactions {
        transaction_count += 1;
        if tx.is_inflow() {
            revenue = sat_add(revenue, tx.amount_value());
        } else {
            expense = sat_add(expense, tx.amount_value());
            if is_fee(tx) {
                fee_total = sat_add(fee_total, tx.amount_value());
            }
        }
    }

    let profit = sat_sub(revenue, expense);
    // Zero without revenue, or when the ratio leaves the representable range
    let margin = if revenue > Decimal::ZERO {
        percent(profit, revenue)
    } else {
        Decimal::ZERO
    };

    Kpis {
        revenue,
        expense,
        profit,
        margin,
        fee_total,
        transaction_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, in_category, tx};
    use crate::types::{Direction, Status};

    #[test]
    fn test_kpis_single_company() {
        let data = vec![
            tx("1", "ps", "15000.00", Direction::Inflow, Status::Settled, "2023-10-01", ReportGroup::GrossRevenue),
            tx("2", "ps", "890.00", Direction::Outflow, Status::Settled, "2023-10-02", ReportGroup::VariableExpense),
        ];
        let k = kpis(&data);
        assert_eq!(k.revenue, dec("15000"));
        assert_eq!(k.expense, dec("890"));
        assert_eq!(k.profit, dec("14110"));
        assert_eq!(k.margin.round_dp(2), dec("94.07"));
        assert_eq!(k.fee_total, dec("890"));
        assert_eq!(k.transaction_count, 2);
    }

    #[test]
    fn test_kpis_empty() {
        let k = kpis(&Vec::<Transaction>::new());
        assert_eq!(k.revenue, Decimal::ZERO);
        assert_eq!(k.profit, Decimal::ZERO);
        assert_eq!(k.margin, Decimal::ZERO);
        assert_eq!(k.transaction_count, 0);
    }

    #[test]
    fn test_margin_zero_without_revenue() {
        let data = vec![tx("1", "ps", "10", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::FixedExpense)];
        let k = kpis(&data);
        assert_eq!(k.margin, Decimal::ZERO);
        assert_eq!(k.profit, dec("-10"));
        assert_eq!(k.profit, k.revenue - k.expense);
    }

    #[test]
    fn test_extreme_amounts_do_not_overflow() {
        let data = vec![
            tx("1", "ps", "0.000001", Direction::Inflow, Status::Settled, "2024-01-01", ReportGroup::GrossRevenue),
            tx("2", "ps", "100000000000000000000000", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::FixedExpense),
        ];
        let k = kpis(&data);
        assert_eq!(k.margin, Decimal::ZERO);
        assert_eq!(k.expense, dec("100000000000000000000000"));

        let huge = vec![
            tx("1", "ps", "50000000000000000000000000000", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::VariableExpense),
            tx("2", "ps", "50000000000000000000000000000", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::VariableExpense),
        ];
        let k = kpis(&huge);
        assert_eq!(k.expense, Decimal::MAX);
        assert_eq!(k.fee_total, Decimal::MAX);
        assert_eq!(k.profit, Decimal::MIN);
        assert_eq!(k.margin, Decimal::ZERO);
    }

    #[test]
    fn test_fee_heuristic() {
        let by_name = in_category(
            tx("1", "ps", "12", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::FixedExpense),
            "Taxas Cartão",
        );
        let english = in_category(
            tx("2", "ps", "3", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::Cogs),
            "Gateway Fee",
        );
        let unclassified = tx("3", "ps", "5", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::Unclassified);
        let rent = in_category(
            tx("4", "ps", "1000", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::FixedExpense),
            "Aluguel",
        );
        let income = in_category(
            tx("5", "ps", "99", Direction::Inflow, Status::Settled, "2024-01-01", ReportGroup::VariableExpense),
            "Taxa reembolsada",
        );

        assert!(is_fee(&by_name));
        assert!(is_fee(&english));
        assert!(is_fee(&unclassified));
        assert!(!is_fee(&rent));
        assert!(!is_fee(&income));

        let k = kpis(&vec![by_name, english, unclassified, rent, income]);
        assert_eq!(k.fee_total, dec("20"));
    }
}
