//! Coercion of cell input to non-negative numbers
//!
//! Invalid numeric input is never an error: anything that does not parse,
//! or parses negative, becomes zero. Prices stay in `Decimal` so totals
//! compare exactly against the capital limit.
//!
//! Stored values are bounded by what a spreadsheet number cell (an IEEE
//! double) holds exactly, so an exported table reads back unchanged.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Significant digits kept in a price.
pub const PRICE_SIGNIFICANT_DIGITS: u32 = 15;

/// Largest storable quantity (2^53).
pub const MAX_QUANTITY: i64 = 1 << 53;

/// Clamp a price to the non-negative range and round it to
/// [`PRICE_SIGNIFICANT_DIGITS`].
pub fn clamp_price(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        return Decimal::ZERO;
    }

    value
        .round_sf_with_strategy(PRICE_SIGNIFICANT_DIGITS, RoundingStrategy::MidpointNearestEven)
        .unwrap_or(value)
}

/// Clamp a signed quantity to `0..=MAX_QUANTITY`.
pub fn clamp_quantity(value: i64) -> u64 {
    u64::try_from(value.clamp(0, MAX_QUANTITY)).unwrap_or(0)
}

/// Parse free-text price input.
///
/// Accepts plain and scientific notation, ignoring a leading `₹`,
/// thousands separators and surrounding whitespace.
pub fn parse_price(raw: &str) -> Decimal {
    parse_decimal(raw).map(clamp_price).unwrap_or(Decimal::ZERO)
}

/// Parse free-text quantity input.
///
/// Fractional input is truncated toward zero; values above
/// [`MAX_QUANTITY`] saturate.
pub fn parse_quantity(raw: &str) -> u64 {
    parse_decimal(raw)
        .map(|d| d.trunc().clamp(Decimal::ZERO, Decimal::from(MAX_QUANTITY)))
        .and_then(|d| d.to_i64())
        .map(clamp_quantity)
        .unwrap_or(0)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned = clean_numeric(raw);
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

fn clean_numeric(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '₹' | ',' | '_') && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_price_plain() {
        assert_eq!(parse_price("3500"), Decimal::from(3500));
        assert_eq!(parse_price("3500.25"), Decimal::from_str("3500.25").unwrap());
    }

    #[test]
    fn test_parse_price_strips_currency_and_grouping() {
        assert_eq!(parse_price("₹ 1,00,000"), Decimal::from(100_000));
        assert_eq!(parse_price(" 2,450.5 "), Decimal::from_str("2450.5").unwrap());
    }

    #[test]
    fn test_parse_price_scientific() {
        assert_eq!(parse_price("1e3"), Decimal::from(1000));
    }

    #[test]
    fn test_parse_price_invalid_is_zero() {
        assert_eq!(parse_price("abc"), Decimal::ZERO);
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("NaN"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_negative_is_zero() {
        assert_eq!(parse_price("-12.5"), Decimal::ZERO);
    }

    #[test]
    fn test_clamp_price_negative_zero() {
        let negative_zero = -Decimal::new(0, 2);
        assert!(!clamp_price(negative_zero).is_sign_negative());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("20"), 20);
        assert_eq!(parse_quantity("1,200"), 1200);
        assert_eq!(parse_quantity("12.9"), 12);
        assert_eq!(parse_quantity("-4"), 0);
        assert_eq!(parse_quantity("-4.5"), 0);
        assert_eq!(parse_quantity("ten"), 0);
        assert_eq!(parse_quantity(""), 0);
    }

    #[test]
    fn test_parse_quantity_saturates() {
        let max = MAX_QUANTITY as u64;
        assert_eq!(parse_quantity("9007199254740992"), max);
        assert_eq!(parse_quantity("9007199254740993"), max);
        assert_eq!(parse_quantity("18446744073709551615"), max);
        assert_eq!(parse_quantity("18446744073709551616"), max);
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(-1), 0);
        assert_eq!(clamp_quantity(0), 0);
        assert_eq!(clamp_quantity(42), 42);
        assert_eq!(clamp_quantity(i64::MAX), MAX_QUANTITY as u64);
    }

    #[test]
    fn test_parse_price_rounds_to_significant_digits() {
        assert_eq!(
            parse_price("1234.5678901234567891"),
            Decimal::from_str("1234.56789012346").unwrap()
        );
        assert_eq!(parse_price("3500.25"), Decimal::from_str("3500.25").unwrap());
    }

    #[test]
    fn test_clamp_price_max() {
        assert_eq!(
            clamp_price(Decimal::MAX),
            Decimal::from_str("79228162514264300000000000000").unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_parse_price_never_negative(raw in ".{0,24}") {
            prop_assert!(!parse_price(&raw).is_sign_negative());
        }

        #[test]
        fn prop_clamped_price_survives_f64(mantissa in any::<i64>(), scale in 0u32..=12) {
            let price = clamp_price(Decimal::new(mantissa, scale));
            let cell: f64 = price.to_string().parse().unwrap();
            let reread = Decimal::from_str(&cell.to_string()).unwrap();
            prop_assert_eq!(reread, price);
        }

        #[test]
        fn prop_clamped_quantity_survives_f64(q in any::<i64>()) {
            let quantity = clamp_quantity(q);
            let cell = quantity as f64;
            prop_assert_eq!(cell as u64, quantity);
        }

        #[test]
        fn prop_parse_quantity_matches_integer_input(q in 0u32..1_000_000) {
            prop_assert_eq!(parse_quantity(&q.to_string()), q as u64);
        }
    }
}
