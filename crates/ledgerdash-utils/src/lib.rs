//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Group the digits of an unsigned integer string with a thousands separator
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a money amount, e.g. `R$ -1.234,50`
pub fn format_money(
    amount: Decimal,
    symbol: &str,
    decimal_places: u32,
    thousands_separator: &str,
    decimal_separator: &str,
) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let fixed = format!("{:.*}", decimal_places as usize, rounded.abs());

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (fixed.clone(), None),
    };

    let mut out = String::new();
    if !symbol.is_empty() {
        out.push_str(symbol);
        out.push(' ');
    }
    if negative {
        out.push('-');
    }
    out.push_str(&format_number(int_part, thousands_separator));
    if let Some(frac) = frac_part {
        out.push_str(decimal_separator);
        out.push_str(&frac);
    }
    out
}

/// Turn a `YYYY-MM` month key into the short `MM/YY` chart label
pub fn month_label(month_key: &str) -> String {
    match month_key.split_once('-') {
        Some((year, month)) if year.len() == 4 => format!("{}/{}", month, &year[2..]),
        _ => month_key.to_string(),
    }
}

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
