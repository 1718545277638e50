//! Per-account lifetime balances

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::arith::{sat_add, sat_sum};
use crate::models::{Account, Transaction};
use crate::reports::{BalanceReport, BalanceRow};

/// Signed sum of settled transactions per account.
///
/// Takes scoped transactions with no period applied; pending entries never
/// move a balance.
pub fn account_balances<'a, I>(transactions: I, accounts: &[Account]) -> BalanceReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: HashMap<&str, Decimal> = HashMap::new();
    for tx in transactions.into_iter().filter(|t| t.is_settled()) {
        let sum = sums.entry(tx.account_id.as_str()).or_insert(Decimal::ZERO);
        *sum = sat_add(*sum, tx.signed_amount());
    }

    let mut rows = Vec::with_capacity(accounts.len());
    let mut total = Decimal::ZERO;
    for account in accounts {
        let balance = sums.remove(account.id.as_str()).unwrap_or(Decimal::ZERO);
        total = sat_add(total, balance);
        rows.push(BalanceRow {
            account_id: account.id.clone(),
            name: account.name.clone(),
            kind: account.kind,
            balance,
        });
    }

    // Whatever is left was booked to an account id not in the list
    let unassigned = sat_sum(sums.values().copied());

    BalanceReport {
        rows,
        total,
        unassigned,
    }
}
