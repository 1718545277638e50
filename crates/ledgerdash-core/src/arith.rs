//! Saturating money arithmetic for the report builders
//!
//! Totals clamp to `Decimal::MAX` or `Decimal::MIN` instead of overflowing.
//! A percentage that cannot be represented is reported as zero.

use rust_decimal::Decimal;

/// `a + b`, clamped to the representable range
pub fn sat_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `a - b`, clamped to the representable range
pub fn sat_sub(a: Decimal, b: Decimal) -> Decimal {
    // The range is symmetric, so negation never overflows
    sat_add(a, -b)
}

/// Saturating sum of an iterator of amounts
pub fn sat_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, sat_add)
}

/// `part / whole * 100`; zero when `whole` is zero or the ratio overflows
pub fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dec;

    #[test]
    fn test_sat_add_clamps_both_ways() {
        assert_eq!(sat_add(dec("1.5"), dec("2")), dec("3.5"));
        assert_eq!(sat_add(Decimal::MAX, dec("1")), Decimal::MAX);
        assert_eq!(sat_add(Decimal::MIN, dec("-1")), Decimal::MIN);
        assert_eq!(sat_sub(Decimal::MIN, dec("1")), Decimal::MIN);
        assert_eq!(sat_sub(Decimal::MAX, dec("-1")), Decimal::MAX);
    }

    #[test]
    fn test_sat_sum() {
        assert_eq!(sat_sum(vec![dec("50000000000000000000000000000"); 2]), Decimal::MAX);
        assert_eq!(sat_sum(vec![dec("1"), dec("2"), dec("-0.5")]), dec("2.5"));
        assert_eq!(sat_sum(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec("25"), dec("200")), dec("12.5"));
        assert_eq!(percent(dec("25"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent(dec("-100000000000000000000000"), dec("0.000001")), Decimal::ZERO);
    }
}
