//! Settled position and pending receivables/payables

use rust_decimal::Decimal;

use crate::arith::{sat_add, sat_sub};
use crate::models::Transaction;
use crate::reports::Treasury;

/// Project the balance once every pending entry settles.
///
/// Takes scoped transactions with neither period nor regime applied.
pub fn treasury<'a, I>(transactions: I) -> Treasury
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut settled_balance = Decimal::ZERO;
    let mut receivable = Decimal::ZERO;
    let mut payable = Decimal::ZERO;

    for tx in transactions {
        if tx.is_settled() {
            settled_balance = sat_add(settled_balance, tx.signed_amount());
        } else if tx.is_inflow() {
            receivable = sat_add(receivable, tx.amount_value());
        } else {
            payable = sat_add(payable, tx.amount_value());
        }
    }

    Treasury {
        settled_balance,
        receivable,
        payable,
        projected_balance: sat_sub(sat_add(settled_balance, receivable), payable),
    }
}
