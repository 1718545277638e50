//! Income statement (DRE) waterfall

use rust_decimal::Decimal;

use crate::arith::{sat_add, sat_sub};
use crate::models::Transaction;
use crate::reports::IncomeStatement;
use crate::types::{Direction, ReportGroup};

/// Build the fixed waterfall over scoped transactions.
///
/// No period or regime is applied. Only the direction each line expects is
/// counted: revenue from inflows, every cost line from outflows.
pub fn income_statement<'a, I>(transactions: I) -> IncomeStatement
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut gross_revenue = Decimal::ZERO;
    let mut sales_tax = Decimal::ZERO;
    let mut cogs = Decimal::ZERO;
    let mut variable = Decimal::ZERO;
    let mut fixed_expenses = Decimal::ZERO;

    for tx in transactions {
        let amount = tx.amount_value();
        match (tx.report_group.effective(), tx.direction) {
            (ReportGroup::GrossRevenue, Direction::Inflow) => gross_revenue = sat_add(gross_revenue, amount),
            (ReportGroup::SalesTax, Direction::Outflow) => sales_tax = sat_add(sales_tax, amount),
            (ReportGroup::Cogs, Direction::Outflow) => cogs = sat_add(cogs, amount),
            (ReportGroup::VariableExpense, Direction::Outflow) => variable = sat_add(variable, amount),
            (ReportGroup::FixedExpense, Direction::Outflow) => fixed_expenses = sat_add(fixed_expenses, amount),
            _ => {}
        }
    }

    let net_revenue = sat_sub(gross_revenue, sales_tax);
    let variable_costs = sat_add(cogs, variable);
    let contribution_margin = sat_sub(net_revenue, variable_costs);

    IncomeStatement {
        gross_revenue,
        sales_tax,
        net_revenue,
        variable_costs,
        contribution_margin,
        fixed_expenses,
        operating_profit: sat_sub(contribution_margin, fixed_expenses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, tx};
    use crate::types::Status;

    #[test]
    fn test_consolidated_scenario() {
        let data = vec![
            tx("1", "ps", "15000.00", Direction::Inflow, Status::Settled, "2023-10-01", ReportGroup::GrossRevenue),
            tx("2", "ps", "890.00", Direction::Outflow, Status::Settled, "2023-10-02", ReportGroup::VariableExpense),
            tx("6", "afm", "12000.00", Direction::Outflow, Status::Settled, "2023-10-25", ReportGroup::FixedExpense),
        ];
        let dre = income_statement(&data);
        assert_eq!(dre.gross_revenue, dec("15000"));
        assert_eq!(dre.net_revenue, dec("15000"));
        assert_eq!(dre.variable_costs, dec("890"));
        assert_eq!(dre.contribution_margin, dec("14110"));
        assert_eq!(dre.fixed_expenses, dec("12000"));
        assert_eq!(dre.operating_profit, dec("2110"));
    }

    #[test]
    fn test_waterfall_identity_and_negatives() {
        let data = vec![
            tx("1", "ps", "100", Direction::Inflow, Status::Pending, "2024-01-01", ReportGroup::GrossRevenue),
            tx("2", "ps", "30", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::SalesTax),
            tx("3", "ps", "50", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::Cogs),
            tx("4", "ps", "25", Direction::Outflow, Status::Settled, "bad-date", ReportGroup::Unclassified),
            tx("5", "ps", "400", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::FixedExpense),
        ];
        let dre = income_statement(&data);
        assert_eq!(dre.variable_costs, dec("75"));
        assert_eq!(dre.contribution_margin, dec("-5"));
        assert_eq!(dre.operating_profit, dec("-405"));
        assert_eq!(
            dre.operating_profit,
            dre.gross_revenue - dre.sales_tax - dre.variable_costs - dre.fixed_expenses
        );
    }

    #[test]
    fn test_wrong_direction_ignored() {
        let data = vec![
            tx("1", "ps", "100", Direction::Outflow, Status::Settled, "2024-01-01", ReportGroup::GrossRevenue),
            tx("2", "ps", "100", Direction::Inflow, Status::Settled, "2024-01-01", ReportGroup::FixedExpense),
        ];
        assert_eq!(income_statement(&data), IncomeStatement::default());
    }

    #[test]
    fn test_empty_is_all_zero() {
        let dre = income_statement(&Vec::<Transaction>::new());
        assert_eq!(dre, IncomeStatement::default());
        assert_eq!(dre.operating_profit, Decimal::ZERO);
    }
}
