//! Scope, period and regime filters
//!
//! The three predicates are independent and commute; the pipeline applies
//! them as scope, then period, then regime and keeps input order.

use chrono::NaiveDate;
use ledgerdash_config::Regime;

use crate::models::Transaction;
use crate::time::{DateRange, TimeContext, TimeFilter};
use crate::types::Scope;

/// Regime policy: cash keeps settled movements only, accrual keeps all
pub fn in_regime(tx: &Transaction, regime: Regime) -> bool {
    match regime {
        Regime::Cash => tx.is_settled(),
        Regime::Accrual => true,
    }
}

pub fn in_scope(tx: &Transaction, scope: &Scope) -> bool {
    scope.includes(&tx.company_id)
}

/// Transactions of the scope, with no period or regime applied
pub fn scoped<'a>(transactions: &'a [Transaction], scope: &Scope) -> Vec<&'a Transaction> {
    transactions.iter().filter(|tx| in_scope(tx, scope)).collect()
}

/// Scoped transactions that also pass the regime policy
pub fn scoped_in_regime<'a>(
    transactions: &'a [Transaction],
    scope: &Scope,
    regime: Regime,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| in_scope(tx, scope) && in_regime(tx, regime))
        .collect()
}

/// Canonical filtered view used by the KPI and category breakdown
pub fn filter<'a>(
    transactions: &'a [Transaction],
    scope: &Scope,
    time: &TimeContext,
    regime: Regime,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    let range = time.range(today);
    filter_range(transactions, scope, &range, regime)
}

/// Same as [`filter`] with an already resolved range
pub fn filter_range<'a>(
    transactions: &'a [Transaction],
    scope: &Scope,
    range: &DateRange,
    regime: Regime,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| in_scope(tx, scope))
        .filter(|tx| tx.filter_by_time(range))
        .filter(|tx| in_regime(tx, regime))
        .collect()
}
