//! Expense category breakdown for the pie chart

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::arith::{percent, sat_add, sat_sum};
use crate::models::Transaction;
use crate::reports::CategorySlice;

/// Chart palette, assigned by rank
pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#8b5cf6", "#10b981", "#f59e0b", "#ef4444", "#ec4899", "#6366f1", "#14b8a6",
];

/// Default number of categories shown
pub const DEFAULT_TOP_CATEGORIES: usize = 8;

/// Sum outflows per category name and keep the `limit` largest.
///
/// Ties are ordered by name. `share` is relative to the slices returned.
pub fn category_breakdown<'a, I>(transactions: I, limit: usize) -> Vec<CategorySlice>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: HashMap<&str, Decimal> = HashMap::new();
    for tx in transactions.into_iter().filter(|t| !t.is_inflow()) {
        let sum = sums.entry(tx.category.as_str()).or_insert(Decimal::ZERO);
        *sum = sat_add(*sum, tx.amount_value());
    }

    let mut ranked: Vec<(&str, Decimal)> = sums.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    let shown = sat_sum(ranked.iter().map(|(_, amount)| *amount));

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (category, amount))| CategorySlice {
            category: category.to_string(),
            amount,
            share: percent(amount, shown),
            color: PALETTE[rank % PALETTE.len()].to_string(),
        })
        .collect()
}
